//! Rule-based English morphology: a lemmatization pass that strips
//! inflectional endings, followed by a light stemming pass that strips
//! derivational suffixes. Running both stages catches variants (plurals,
//! tense, agent nouns) that either stage alone misses.
//!
//! This is a best-effort reducer, not a full morphological analyzer; the
//! legality filter only needs two forms of the same root to converge on the
//! same string.

/// Irregular plural/past forms that no suffix rule recovers.
const IRREGULAR: &[(&str, &str)] = &[
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("ran", "run"),
    ("spoke", "speak"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
];

/// Collapse a trailing doubled consonant ("runn" -> "run"). Doubled `l` and
/// `s` are left alone ("fall", "glass" are base forms themselves).
fn undouble(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() >= 3 {
        let last = chars[chars.len() - 1];
        let prev = chars[chars.len() - 2];
        if last == prev && last.is_ascii_alphabetic() && !"aeiouls".contains(last) {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    word.to_string()
}

/// Reduce an inflected form to its base form: plural nouns and common verb
/// endings.
pub fn lemmatize(word: &str) -> String {
    let word = word.to_ascii_lowercase();

    for &(form, base) in IRREGULAR {
        if word == form {
            return base.to_string();
        }
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..suffix.len() - 2]);
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() >= 3 {
            return undouble(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.len() >= 3 {
            return undouble(stem);
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is")
    {
        let stem = &word[..word.len() - 1];
        if stem.len() >= 3 {
            return stem.to_string();
        }
    }

    word
}

/// Derivational suffixes stripped by the stemming pass, longest first so the
/// greedy match never leaves a partial suffix behind.
const DERIVATIONAL: &[&str] = &[
    "fulness", "ousness", "iveness", "ization", "isation", "ness", "ment", "ship", "hood", "able",
    "ible", "less", "ful", "ish", "ize", "ise", "ous", "ive", "est", "er", "ly",
];

/// Strip derivational suffixes and normalize the remainder. Applied after
/// [`lemmatize`]; the combination maps e.g. "runner" and "running" to the
/// same root as "run".
pub fn stem(word: &str) -> String {
    let word = word.to_ascii_lowercase();

    let mut stemmed = word.clone();
    for suffix in DERIVATIONAL {
        if let Some(rest) = word.strip_suffix(suffix) {
            if rest.len() >= 3 {
                stemmed = rest.to_string();
                break;
            }
        }
    }

    // Dropping the silent final "e" makes "make"/"making" and "axe"/"axes"
    // converge.
    if stemmed.len() >= 3 && stemmed.ends_with('e') {
        stemmed.truncate(stemmed.len() - 1);
    }

    undouble(&stemmed)
}

/// The two-stage normalized root used for legality comparisons.
pub fn root_form(word: &str) -> String {
    stem(&lemmatize(word))
}
