use std::collections::BTreeMap;
use std::fmt::Write as _;

use thiserror::Error;

use crate::board::{BoardAssignment, ROLES_BY_NAME, Role};
use crate::engine::search::{HintOutcome, NO_HINT_SCORE, RankedHint};

/// Column widths of the tabulated hint section. The targets column holds the
/// comma-joined subset, the hint column the clue word; the score takes the
/// rest of the line. A field that outgrows its column is followed by a single
/// space instead of padding, so the row always stays whitespace-separable
/// (large subsets at high overlap levels exceed the targets column).
const TARGETS_WIDTH: usize = 40;
const HINT_WIDTH: usize = 20;

/// Rendering of the absent-hint variant at the serialization boundary. In
/// memory the absence is always the tagged [`HintOutcome::NotFound`].
const NO_HINT_LABEL: &str = "NO HINT FOUND";

/// Complete output of one round: the team assignment and the ranked hints
/// per overlap level.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport {
    pub assignment: BoardAssignment,
    pub levels: BTreeMap<usize, Vec<RankedHint>>,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unexpected report layout: expected {expected:?}, got {got:?}")]
    UnexpectedLayout { expected: &'static str, got: String },
    #[error("unknown role name: {0}")]
    UnknownRole(String),
    #[error("invalid level line: {0}")]
    InvalidLevel(String),
    #[error("hint row too short: {0}")]
    ShortRow(String),
    #[error("invalid score in hint row: {0}")]
    InvalidScore(String),
}

impl RoundReport {
    /// Fixed textual layout: a Teams section (one `role: word - word` line
    /// per role, roles sorted by name), then a Hints section with one
    /// fixed-width table per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Teams:\n");
        for role in ROLES_BY_NAME {
            let words = self.assignment.words(role).join(" - ");
            let _ = writeln!(out, "{}: {}", role.as_str(), words);
        }
        out.push_str("Hints:\n");
        for (level, hints) in &self.levels {
            let _ = writeln!(out, "Level: {level}");
            let _ = writeln!(
                out,
                "{:<TARGETS_WIDTH$}{:<HINT_WIDTH$}{}",
                "Target", "Hint", "Score"
            );
            for hint in hints {
                let targets = hint.targets.join(",");
                let (word, score) = match &hint.outcome {
                    HintOutcome::Found { word, score } => (word.as_str(), *score),
                    HintOutcome::NotFound => (NO_HINT_LABEL, NO_HINT_SCORE),
                };
                let _ = writeln!(
                    out,
                    "{}{}{score:.3}",
                    pad_field(&targets, TARGETS_WIDTH),
                    pad_field(word, HINT_WIDTH)
                );
            }
        }
        out
    }

    /// Parse a rendered report back. Re-parsing the Teams section of a
    /// rendered report recovers the exact role-to-word-list mapping.
    pub fn parse(text: &str) -> Result<Self, ReportError> {
        let mut lines = text.lines().peekable();

        expect_line(&mut lines, "Teams:")?;
        let mut assignment = BoardAssignment::default();
        for _ in 0..ROLES_BY_NAME.len() {
            let line = lines.next().ok_or(ReportError::UnexpectedLayout {
                expected: "role line",
                got: "<eof>".into(),
            })?;
            let (name, words) =
                line.split_once(": ")
                    .ok_or_else(|| ReportError::UnexpectedLayout {
                        expected: "role: words",
                        got: line.to_string(),
                    })?;
            let role =
                Role::from_str(name).ok_or_else(|| ReportError::UnknownRole(name.to_string()))?;
            *assignment.words_mut(role) = words
                .split(" - ")
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();
        }

        expect_line(&mut lines, "Hints:")?;
        let mut levels = BTreeMap::new();
        while let Some(line) = lines.next() {
            let level: usize = line
                .strip_prefix("Level: ")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| ReportError::InvalidLevel(line.to_string()))?;

            // Column header row.
            let header = lines.next().unwrap_or_default();
            if !header.starts_with("Target") {
                return Err(ReportError::UnexpectedLayout {
                    expected: "Target/Hint/Score header",
                    got: header.to_string(),
                });
            }

            let mut hints = Vec::new();
            while let Some(&row) = lines.peek() {
                if row.starts_with("Level: ") {
                    break;
                }
                lines.next();
                hints.push(parse_hint_row(row)?);
            }
            levels.insert(level, hints);
        }

        Ok(Self { assignment, levels })
    }
}

fn expect_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<(), ReportError> {
    match lines.next() {
        Some(line) if line == expected => Ok(()),
        other => Err(ReportError::UnexpectedLayout {
            expected,
            got: other.unwrap_or("<eof>").to_string(),
        }),
    }
}

/// Pad a field to its column width, or append a single separating space when
/// the content does not fit. Either way the next field never fuses with this
/// one.
fn pad_field(field: &str, width: usize) -> String {
    if field.len() >= width {
        format!("{field} ")
    } else {
        format!("{field:<width$}")
    }
}

/// Rows are split on whitespace rather than sliced at the column offsets:
/// the targets field contains no spaces, the score is the last token, and
/// whatever sits between them is the hint word (possibly the multi-word
/// absence label). This reads fixed-width and overflowed rows alike.
fn parse_hint_row(row: &str) -> Result<RankedHint, ReportError> {
    let row = row.trim_end();
    let Some((targets_field, rest)) = row.split_once(char::is_whitespace) else {
        return Err(ReportError::ShortRow(row.to_string()));
    };
    let Some((word_field, score_field)) = rest.trim().rsplit_once(char::is_whitespace) else {
        return Err(ReportError::ShortRow(row.to_string()));
    };

    let targets: Vec<String> = targets_field
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    let word = word_field.trim();
    let score: f32 = score_field
        .trim()
        .parse()
        .map_err(|_| ReportError::InvalidScore(row.to_string()))?;

    let outcome = if word == NO_HINT_LABEL {
        HintOutcome::NotFound
    } else {
        HintOutcome::Found {
            word: word.to_string(),
            score,
        }
    };
    Ok(RankedHint { targets, outcome })
}
