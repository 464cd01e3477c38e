use std::collections::BTreeMap;
use std::io::Write;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{BoardAssignment, Role, TeamSizes};
use crate::config::Config;
use crate::engine::legality::LegalityFilter;
use crate::engine::report::RoundReport;
use crate::engine::search::{HintSearch, SearchError};
use crate::oracle::SimilarityOracle;

/// How the board is dealt for a round.
pub enum Assignment {
    /// Shuffle the vocabulary pool and partition it by the configured team
    /// sizes. A fixed seed reproduces the same board.
    Random { seed: Option<u64> },
    /// Externally supplied role lists (e.g. an ongoing game's remaining
    /// words). Words unknown to the oracle are dropped.
    Explicit(BoardAssignment),
}

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("vocabulary has {available} words but the board needs {needed}")]
    VocabularyTooSmall { needed: usize, available: usize },
    #[error("no target words known to the oracle; a hint needs at least one valid target")]
    NoValidTargets,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to write round report")]
    Io(#[from] std::io::Error),
}

/// Drives one complete round: deal the board, sweep every overlap level,
/// collect the ranked hints into a report.
///
/// The controller borrows its collaborators immutably and owns no state
/// between rounds, so a failed round never corrupts the next one.
pub struct RoundController<'a, O: SimilarityOracle> {
    oracle: &'a O,
    search: HintSearch<'a, O>,
    vocabulary: &'a [String],
    sizes: TeamSizes,
    max_levels: usize,
}

impl<'a, O: SimilarityOracle> RoundController<'a, O> {
    pub fn new(
        oracle: &'a O,
        legality: &'a LegalityFilter,
        config: &Config,
        vocabulary: &'a [String],
    ) -> Self {
        let search = HintSearch::new(
            oracle,
            legality,
            config.weights,
            config.oracle_top_n,
            config.max_top_hints,
        );
        Self {
            oracle,
            search,
            vocabulary,
            sizes: config.sizes,
            max_levels: config.max_levels,
        }
    }

    /// Run one round and return the in-memory report.
    pub fn run_round(&self, assignment: Assignment) -> Result<RoundReport, RoundError> {
        let assignment = match assignment {
            Assignment::Random { seed } => self.deal_random(seed)?,
            Assignment::Explicit(given) => self.filter_known(given),
        };
        // A clue cannot be generated with zero valid target terms; an empty
        // hint report would just hide the problem.
        if assignment.target.is_empty() {
            return Err(RoundError::NoValidTargets);
        }
        for role in [Role::Target, Role::Opponent, Role::Bystander, Role::Assassin] {
            debug!(role = role.as_str(), words = ?assignment.words(role), "team dealt");
        }

        let avoid = assignment.avoid_words();
        let mut levels = BTreeMap::new();
        for level in 1..=self.max_levels {
            let hints = self
                .search
                .search_level(level, &assignment.target, &avoid)?;
            info!(level, hints = hints.len(), "level searched");
            levels.insert(level, hints);
        }

        Ok(RoundReport { assignment, levels })
    }

    /// Run one round and serialize the report to a sink instead of
    /// returning it.
    pub fn run_round_to(
        &self,
        assignment: Assignment,
        sink: &mut dyn Write,
    ) -> Result<(), RoundError> {
        let report = self.run_round(assignment)?;
        sink.write_all(report.render().as_bytes())?;
        Ok(())
    }

    /// Uniform shuffle, then consecutive non-overlapping slices per role,
    /// consumed left to right without replacement.
    fn deal_random(&self, seed: Option<u64>) -> Result<BoardAssignment, RoundError> {
        let needed = self.sizes.total();
        if needed > self.vocabulary.len() {
            return Err(RoundError::VocabularyTooSmall {
                needed,
                available: self.vocabulary.len(),
            });
        }

        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut pool = self.vocabulary.to_vec();
        pool.shuffle(&mut rng);

        let mut drawn = pool.into_iter();
        let mut assignment = BoardAssignment::default();
        for role in [Role::Target, Role::Opponent, Role::Assassin, Role::Bystander] {
            *assignment.words_mut(role) = drawn.by_ref().take(self.sizes.size(role)).collect();
        }
        Ok(assignment)
    }

    /// Keep only words the oracle can score; dropped words are reported but
    /// never fatal (a board may legitimately end up smaller than supplied).
    fn filter_known(&self, mut assignment: BoardAssignment) -> BoardAssignment {
        for role in [Role::Target, Role::Opponent, Role::Bystander, Role::Assassin] {
            let words = assignment.words_mut(role);
            let before = words.len();
            words.retain(|w| {
                let known = self.oracle.contains(w);
                if !known {
                    warn!(role = role.as_str(), word = %w, "dropping word unknown to the oracle");
                }
                known
            });
            if words.len() < before {
                debug!(
                    role = role.as_str(),
                    dropped = before - words.len(),
                    "assignment shrunk"
                );
            }
        }
        assignment
    }
}
