use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{BOARD_TOTAL, TeamSizes, TeamWeights};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Hints retained per overlap level after ranking; 0 keeps everything.
    #[serde(default = "default_max_top_hints")]
    pub max_top_hints: usize,
    /// Highest overlap level searched in a round.
    #[serde(default = "default_max_levels")]
    pub max_levels: usize,
    /// Raw candidates requested from the similarity oracle per subset.
    #[serde(default = "default_oracle_top_n")]
    pub oracle_top_n: usize,
    #[serde(default)]
    pub weights: TeamWeights,
    #[serde(default)]
    pub sizes: TeamSizes,
    /// Embedding backend selector. Only the GloVe/word2vec text format is
    /// built in.
    #[serde(default = "default_embedding_backend")]
    pub embedding_backend: String,
    /// Path to the embedding vectors file. Empty means the caller must
    /// supply one on the command line.
    #[serde(default)]
    pub vectors_file: String,
    /// Cap on how many embedding vectors are loaded; 0 = unlimited.
    #[serde(default = "default_vocab_limit")]
    pub vocab_limit: usize,
    /// Board vocabulary file; empty uses the embedded word list.
    #[serde(default)]
    pub words_file: String,
    /// Reference dictionary file; empty uses the embedded word list.
    #[serde(default)]
    pub dictionary_file: String,
}

fn default_max_top_hints() -> usize {
    10
}
fn default_max_levels() -> usize {
    2
}
fn default_oracle_top_n() -> usize {
    20
}
fn default_embedding_backend() -> String {
    "glove".to_string()
}
fn default_vocab_limit() -> usize {
    500_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_top_hints: default_max_top_hints(),
            max_levels: default_max_levels(),
            oracle_top_n: default_oracle_top_n(),
            weights: TeamWeights::default(),
            sizes: TeamSizes::default(),
            embedding_backend: default_embedding_backend(),
            vectors_file: String::new(),
            vocab_limit: default_vocab_limit(),
            words_file: String::new(),
            dictionary_file: String::new(),
        }
    }
}

impl Config {
    /// Load from the user config dir; on first run the defaults are written
    /// there so the file exists to edit.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            if let Err(err) = config.save() {
                warn!(%err, "could not write default config");
            }
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cluesmith")
            .join("config.toml")
    }

    /// Repair values a stale or hand-edited config file may carry. Invalid
    /// combinations fall back to defaults with a warning rather than
    /// failing startup.
    pub fn normalize(&mut self) {
        if !self.weights.is_valid() {
            warn!(
                weights = ?self.weights,
                "team weights violate target > 0 > bystander >= opponent >= assassin, using defaults"
            );
            self.weights = TeamWeights::default();
        }
        if self.sizes.target + self.sizes.opponent + self.sizes.assassin > BOARD_TOTAL {
            warn!(sizes = ?self.sizes, "team sizes exceed the board total, using defaults");
            self.sizes = TeamSizes::default();
        }
        if self.max_levels < 1 {
            warn!("max_levels below 1, using 1");
            self.max_levels = 1;
        }
        if self.oracle_top_n < 1 {
            warn!("oracle_top_n below 1, using default");
            self.oracle_top_n = default_oracle_top_n();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.max_top_hints, 10);
        assert_eq!(config.max_levels, 2);
        assert_eq!(config.oracle_top_n, 20);
        assert_eq!(config.weights, TeamWeights::default());
        assert_eq!(config.sizes.bystander(), 8);
        assert_eq!(config.vocab_limit, 500_000);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let toml_str = r#"
max_top_hints = 5
max_levels = 3

[weights]
target = 20
bystander = -2
opponent = -4
assassin = -9
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.max_top_hints, 5);
        assert_eq!(config.max_levels, 3);
        assert_eq!(config.weights.target, 20);
        // Missing keys fall back to defaults.
        assert_eq!(config.oracle_top_n, 20);
        assert_eq!(config.sizes, TeamSizes::default());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.max_top_hints, deserialized.max_top_hints);
        assert_eq!(config.weights, deserialized.weights);
        assert_eq!(config.sizes, deserialized.sizes);
    }

    #[test]
    fn test_save_to_then_load_from_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings").join("config.toml");

        let mut config = Config::default();
        config.max_top_hints = 7;
        config.vectors_file = "vectors/glove.txt".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.max_top_hints, 7);
        assert_eq!(loaded.vectors_file, "vectors/glove.txt");
        assert_eq!(loaded.weights, TeamWeights::default());
    }

    #[test]
    fn test_normalize_repairs_invalid_weights() {
        let mut config = Config::default();
        config.weights.target = -1;
        config.normalize();
        assert_eq!(config.weights, TeamWeights::default());
    }

    #[test]
    fn test_normalize_repairs_oversized_teams() {
        let mut config = Config::default();
        config.sizes.target = 30;
        config.normalize();
        assert_eq!(config.sizes, TeamSizes::default());
    }

    #[test]
    fn test_normalize_clamps_max_levels() {
        let mut config = Config::default();
        config.max_levels = 0;
        config.normalize();
        assert_eq!(config.max_levels, 1);
    }
}
