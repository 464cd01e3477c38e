use tracing::trace;

use crate::engine::lexicon::Dictionary;
use crate::engine::morph::root_form;

/// Why a candidate clue was rejected. Used for diagnostics only; callers
/// branch on legal/illegal, not on the specific rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Candidate shares a normalized root with a board word.
    RootCollision,
    /// Candidate contains a board word or a board word contains it.
    SubstringContainment,
    /// Candidate is not a recognized dictionary word.
    NotInDictionary,
    /// Candidate contains a non-alphabetic character.
    NonAlphabetic,
}

/// Decides whether a candidate word may legally be spoken as a clue given
/// the full visible board. Pure function of its inputs for fixed dictionary
/// and morphology backends.
pub struct LegalityFilter {
    dictionary: Dictionary,
}

impl LegalityFilter {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// A candidate is legal only if no rule fires. Board words are treated
    /// as opaque single lexical units; an empty board leaves only the
    /// dictionary and character-class rules in play.
    pub fn is_legal(&self, candidate: &str, board_words: &[String]) -> bool {
        match self.check(candidate, board_words) {
            None => true,
            Some(violation) => {
                trace!(candidate, ?violation, "rejected candidate");
                false
            }
        }
    }

    /// First rule violated by the candidate, if any.
    pub fn check(&self, candidate: &str, board_words: &[String]) -> Option<Violation> {
        if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(Violation::NonAlphabetic);
        }
        if !self.dictionary.contains(candidate) {
            return Some(Violation::NotInDictionary);
        }

        let candidate_lower = candidate.to_ascii_lowercase();
        let candidate_root = root_form(&candidate_lower);
        for board_word in board_words {
            let board_lower = board_word.to_ascii_lowercase();
            // A string contains itself, so candidate == board word is caught
            // here too.
            if candidate_lower.contains(&board_lower) || board_lower.contains(&candidate_lower) {
                return Some(Violation::SubstringContainment);
            }
            if candidate_root == root_form(&board_lower) {
                return Some(Violation::RootCollision);
            }
        }

        None
    }
}
