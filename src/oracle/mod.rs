pub mod embedding;

use thiserror::Error;

/// One term of a similarity query: a word and its signed weight. Positive
/// weights pull the query toward the word, negative weights push away.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedWord {
    pub word: String,
    pub weight: f32,
}

impl WeightedWord {
    pub fn new(word: impl Into<String>, weight: f32) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    /// Every positive query term was out of vocabulary. A clue cannot be
    /// generated with zero valid target terms, so this is a hard failure for
    /// the querying subset.
    #[error("all positive query terms are out of vocabulary: {0:?}")]
    EmptyPositiveQuery(Vec<String>),

    #[error("word is out of vocabulary: {0}")]
    UnknownWord(String),
}

/// Embedding-backed nearest-neighbor service consumed by the hint search.
///
/// Scores are similarities with a single convention everywhere: higher is
/// better, and `most_similar` results are ordered descending.
pub trait SimilarityOracle: Sync {
    /// Vocabulary membership.
    fn contains(&self, word: &str) -> bool;

    /// Top-N nearest words to the weighted combination of `positive` and
    /// `negative` terms (negative terms carry their negative weights
    /// already). Query words themselves never appear in the result.
    ///
    /// Out-of-vocabulary negative terms are dropped silently; if no positive
    /// term is in vocabulary the query fails with
    /// [`OracleError::EmptyPositiveQuery`].
    fn most_similar(
        &self,
        positive: &[WeightedWord],
        negative: &[WeightedWord],
        top_n: usize,
    ) -> Result<Vec<(String, f32)>, OracleError>;

    /// Pairwise similarity between two vocabulary words.
    fn similarity(&self, a: &str, b: &str) -> Result<f32, OracleError>;
}
