use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const DICTIONARY_EN: &str = include_str!("../../assets/dictionary-en.txt");

/// Reference dictionary used by the legality filter to reject proper nouns,
/// fragments, and embedding-vocabulary noise tokens.
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Built-in English word list, one word per line. Lines starting with
    /// `#` are comments.
    pub fn embedded() -> Self {
        Self::from_lines(DICTIONARY_EN)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary from {}", path.display()))?;
        Ok(Self::from_lines(&content))
    }

    fn from_lines(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.to_ascii_lowercase())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
