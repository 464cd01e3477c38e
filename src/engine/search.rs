use itertools::Itertools;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{Role, TeamWeights};
use crate::engine::legality::LegalityFilter;
use crate::oracle::{OracleError, SimilarityOracle, WeightedWord};

/// Sentinel score used when a hint slot has no legal candidate. Guaranteed
/// to sort below any real similarity.
pub const NO_HINT_SCORE: f32 = -9999.0;

/// Result of searching one target subset: either a legal clue word with its
/// similarity score, or an explicit absence marker.
#[derive(Clone, Debug, PartialEq)]
pub enum HintOutcome {
    Found { word: String, score: f32 },
    NotFound,
}

impl HintOutcome {
    /// Ranking key. Higher is better everywhere in this crate.
    pub fn score(&self) -> f32 {
        match self {
            HintOutcome::Found { score, .. } => *score,
            HintOutcome::NotFound => NO_HINT_SCORE,
        }
    }
}

/// One entry of a level's ranked output: the target subset a clue is meant
/// to cover and the outcome for it.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedHint {
    pub targets: Vec<String>,
    pub outcome: HintOutcome,
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// Every subset at the level failed its oracle query, so the level has
    /// no output at all. Individual subset failures are skipped with a
    /// warning as long as at least one subset produced an entry.
    #[error("all {failed} subsets at level {level} failed their oracle query")]
    AllSubsetsFailed { level: usize, failed: usize },
}

/// Enumerates target subsets per overlap level and turns oracle candidates
/// into legality-filtered, ranked hints.
pub struct HintSearch<'a, O: SimilarityOracle> {
    oracle: &'a O,
    legality: &'a LegalityFilter,
    weights: TeamWeights,
    /// Raw candidates requested from the oracle per subset.
    oracle_top_n: usize,
    /// Entries retained per level after ranking; 0 keeps everything.
    max_top_hints: usize,
}

impl<'a, O: SimilarityOracle> HintSearch<'a, O> {
    pub fn new(
        oracle: &'a O,
        legality: &'a LegalityFilter,
        weights: TeamWeights,
        oracle_top_n: usize,
        max_top_hints: usize,
    ) -> Self {
        Self {
            oracle,
            legality,
            weights,
            oracle_top_n,
            max_top_hints,
        }
    }

    /// Ranked hints for one overlap level: all C(N, level) target subsets
    /// are queried (in parallel; they are independent and the oracle is
    /// read-only), filtered, aggregated, and sorted by score descending.
    ///
    /// A level below 1 is clamped to 1 with a warning. A level above the
    /// target count yields no subsets and therefore an empty ranking.
    pub fn search_level(
        &self,
        level: usize,
        targets: &[String],
        avoid: &[(Role, Vec<String>)],
    ) -> Result<Vec<RankedHint>, SearchError> {
        let level = if level < 1 {
            warn!(level, "overlap level below 1, clamping to 1");
            1
        } else {
            level
        };

        let board_words: Vec<String> = targets
            .iter()
            .cloned()
            .chain(avoid.iter().flat_map(|(_, words)| words.iter().cloned()))
            .collect();
        let negative: Vec<WeightedWord> = avoid
            .iter()
            .flat_map(|(role, words)| {
                let weight = self.weights.weight(*role) as f32;
                words.iter().map(move |w| WeightedWord::new(w.clone(), weight))
            })
            .collect();

        let subsets: Vec<Vec<String>> = targets.iter().cloned().combinations(level).collect();
        let subset_count = subsets.len();
        debug!(level, subsets = subset_count, "searching level");

        let results: Vec<(Vec<String>, Result<Vec<RankedHint>, OracleError>)> = subsets
            .into_par_iter()
            .map(|subset| {
                let outcome = self.search_subset(&subset, &negative, &board_words);
                (subset, outcome)
            })
            .collect();

        let mut entries = Vec::new();
        let mut failed = 0usize;
        for (subset, result) in results {
            match result {
                Ok(hints) => entries.extend(hints),
                Err(err) => {
                    failed += 1;
                    warn!(?subset, %err, "subset query failed, skipping");
                }
            }
        }

        if entries.is_empty() && failed > 0 {
            return Err(SearchError::AllSubsetsFailed { level, failed });
        }

        entries.sort_by(|a, b| b.outcome.score().total_cmp(&a.outcome.score()));
        if self.max_top_hints > 0 {
            entries.truncate(self.max_top_hints);
        }
        Ok(entries)
    }

    /// Query one subset and filter the raw candidates. Zero survivors still
    /// produce exactly one entry, so downstream ranking never silently drops
    /// a subset.
    fn search_subset(
        &self,
        subset: &[String],
        negative: &[WeightedWord],
        board_words: &[String],
    ) -> Result<Vec<RankedHint>, OracleError> {
        // Damp the per-word pull as more targets are merged so no single
        // target dominates a combined query.
        let weight = self.weights.target as f32 / (subset.len() as f32).sqrt();
        let positive: Vec<WeightedWord> = subset
            .iter()
            .map(|w| WeightedWord::new(w.clone(), weight))
            .collect();

        let raw = self
            .oracle
            .most_similar(&positive, negative, self.oracle_top_n)?;

        let legal: Vec<RankedHint> = raw
            .into_iter()
            .filter(|(word, _)| self.legality.is_legal(word, board_words))
            .map(|(word, score)| RankedHint {
                targets: subset.to_vec(),
                outcome: HintOutcome::Found { word, score },
            })
            .collect();

        if legal.is_empty() {
            debug!(?subset, "no legal candidate survived");
            return Ok(vec![RankedHint {
                targets: subset.to_vec(),
                outcome: HintOutcome::NotFound,
            }]);
        }
        Ok(legal)
    }
}
