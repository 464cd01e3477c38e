use std::fmt::Write as _;

use tracing::{debug, info};

use crate::board::ROLES_BY_NAME;
use crate::engine::report::RoundReport;
use crate::engine::search::HintOutcome;
use crate::oracle::SimilarityOracle;

/// Score given to a board word the relatedness backend cannot compare at
/// all. Sorts below every real similarity.
pub const UNRELATED_SCORE: f32 = -9.999;

/// The guessing side of the table: given a revealed hint, ranks the visible
/// board words by semantic relatedness so the most plausible guesses come
/// first.
pub struct FieldOperative<'a, O: SimilarityOracle> {
    oracle: &'a O,
}

impl<'a, O: SimilarityOracle> FieldOperative<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Pairwise-score every board word against the hint, descending. Words
    /// the oracle cannot score get [`UNRELATED_SCORE`] instead of being
    /// dropped; the operative still has to consider them.
    pub fn rank_board(&self, hint: &str, board_words: &[String]) -> Vec<(String, f32)> {
        let mut scored: Vec<(String, f32)> = board_words
            .iter()
            .map(|word| {
                let score = self
                    .oracle
                    .similarity(hint, word)
                    .unwrap_or(UNRELATED_SCORE);
                (word.clone(), score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    /// Evaluate every hint of a round report: one ranked board listing per
    /// hint, in the fixed textual layout.
    pub fn evaluate_report(&self, report: &RoundReport) -> String {
        let board_words = report.assignment.board_words();
        let mut out = String::new();
        out.push_str("Teams:\n");
        for role in ROLES_BY_NAME {
            let words = report.assignment.words(role).join(" - ");
            let _ = writeln!(out, "{}: {}", role.as_str(), words);
        }
        out.push_str("Hint Evaluation:\n");
        for (level, hints) in &report.levels {
            info!(level, hints = hints.len(), "evaluating level");
            let _ = writeln!(out, "Level: {level}");
            for hint in hints {
                let HintOutcome::Found { word, score } = &hint.outcome else {
                    debug!(targets = ?hint.targets, "skipping absent hint");
                    continue;
                };
                let _ = writeln!(
                    out,
                    "Target: {:<30} Hint: {:<20} WM Score: {:.3}",
                    hint.targets.join(","),
                    word,
                    score
                );
                let ranked = self.rank_board(word, &board_words);
                let listing = ranked
                    .iter()
                    .map(|(w, s)| format!("{w}-{s:.3}"))
                    .collect::<Vec<_>>()
                    .join(" - ");
                let _ = writeln!(out, "Ranked by embedding: {listing}");
            }
        }
        out
    }
}

/// ConceptNet relatedness scorer, the original evaluation backend. Network
/// access is optional; everything else works without it.
#[cfg(feature = "network")]
pub mod conceptnet {
    use anyhow::{Context, Result};

    const RELATEDNESS_URL: &str = "https://api.conceptnet.io/relatedness";

    pub struct ConceptNet {
        client: reqwest::blocking::Client,
    }

    impl ConceptNet {
        pub fn new() -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .user_agent(concat!("cluesmith/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Self { client })
        }

        /// Relatedness of two English terms in [-1, 1].
        pub fn relatedness(&self, a: &str, b: &str) -> Result<f32> {
            let response: serde_json::Value = self
                .client
                .get(RELATEDNESS_URL)
                .query(&[("node1", format!("/c/en/{a}")), ("node2", format!("/c/en/{b}"))])
                .send()?
                .error_for_status()?
                .json()?;
            response
                .get("value")
                .and_then(|v| v.as_f64())
                .map(|v| v as f32)
                .context("relatedness response missing \"value\"")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::board::BoardAssignment;
    use crate::engine::search::RankedHint;
    use crate::oracle::embedding::WordEmbeddings;

    fn oracle() -> WordEmbeddings {
        WordEmbeddings::from_vectors(vec![
            ("fruit".into(), vec![1.0, 0.0]),
            ("apple".into(), vec![0.95, 0.1]),
            ("orange".into(), vec![0.9, 0.2]),
            ("chair".into(), vec![0.0, 1.0]),
            ("axe".into(), vec![0.1, 0.8]),
        ])
        .unwrap()
    }

    fn board() -> Vec<String> {
        ["apple", "orange", "chair", "axe"]
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn test_rank_board_descending() {
        let oracle = oracle();
        let operative = FieldOperative::new(&oracle);
        let ranked = operative.rank_board("fruit", &board());
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].0, "apple");
        for pair in ranked.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_unknown_board_word_gets_sentinel() {
        let oracle = oracle();
        let operative = FieldOperative::new(&oracle);
        let ranked = operative.rank_board("fruit", &["apple".into(), "zeppelin".into()]);
        let zeppelin = ranked.iter().find(|(w, _)| w == "zeppelin").unwrap();
        assert_eq!(zeppelin.1, UNRELATED_SCORE);
        assert_eq!(ranked.last().unwrap().0, "zeppelin");
    }

    #[test]
    fn test_evaluate_report_layout() {
        let oracle = oracle();
        let operative = FieldOperative::new(&oracle);
        let mut levels = BTreeMap::new();
        levels.insert(
            1,
            vec![
                RankedHint {
                    targets: vec!["apple".into()],
                    outcome: HintOutcome::Found {
                        word: "fruit".into(),
                        score: 0.9,
                    },
                },
                RankedHint {
                    targets: vec!["orange".into()],
                    outcome: HintOutcome::NotFound,
                },
            ],
        );
        let report = RoundReport {
            assignment: BoardAssignment {
                target: vec!["apple".into(), "orange".into()],
                opponent: vec![],
                bystander: vec!["chair".into()],
                assassin: vec!["axe".into()],
            },
            levels,
        };
        let text = operative.evaluate_report(&report);
        assert!(text.starts_with("Teams:\n"));
        assert!(text.contains("Hint Evaluation:\n"));
        assert!(text.contains("Hint: fruit"));
        assert!(text.contains("Ranked by embedding: apple-"));
        // Absent hints are skipped, not evaluated.
        assert!(!text.contains("NO HINT FOUND"));
    }
}
