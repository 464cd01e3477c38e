use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::oracle::SimilarityOracle;

const BOARD_WORDS: &str = include_str!("../assets/board-words.txt");

/// Pool of candidate board words, filtered against the active oracle's
/// vocabulary so a random assignment never deals out a word the similarity
/// backend cannot score.
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Built-in board word list.
    pub fn embedded(oracle: &dyn SimilarityOracle) -> Self {
        Self::from_lines(BOARD_WORDS, oracle)
    }

    pub fn from_file(path: &Path, oracle: &dyn SimilarityOracle) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read board words from {}", path.display()))?;
        Ok(Self::from_lines(&content, oracle))
    }

    fn from_lines(content: &str, oracle: &dyn SimilarityOracle) -> Self {
        let mut words = Vec::new();
        let mut missing = Vec::new();
        for line in content.lines() {
            let word = line.trim().to_ascii_lowercase();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            if oracle.contains(&word) {
                words.push(word);
            } else {
                missing.push(word);
            }
        }
        if !missing.is_empty() {
            warn!(
                dropped = missing.len(),
                words = ?missing,
                "board words absent from the embedding vocabulary"
            );
        }
        info!(kept = words.len(), "board vocabulary loaded");
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
