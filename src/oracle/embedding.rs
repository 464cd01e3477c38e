use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::oracle::{OracleError, SimilarityOracle, WeightedWord};

/// Pretrained word embeddings loaded from the GloVe/word2vec text format:
/// one word per line followed by its whitespace-separated vector components.
///
/// Vectors are unit-normalized at load time so every similarity is a cosine
/// computed as a plain dot product.
pub struct WordEmbeddings {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

impl WordEmbeddings {
    /// Load embeddings from a text file, keeping at most `limit` words when
    /// `limit > 0` (the most frequent words come first in these files, so a
    /// cap keeps the useful head of the vocabulary).
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open embeddings at {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut words = Vec::new();
        let mut index = HashMap::new();
        let mut vectors: Vec<Vec<f32>> = Vec::new();
        let mut dimension = 0usize;

        for line in reader.lines() {
            if limit > 0 && words.len() >= limit {
                break;
            }
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            // A component that fails to parse means a corrupt or multi-token
            // row; dropping the row is safer than loading a distorted vector.
            let Ok(mut vector) = parts.map(str::parse).collect::<Result<Vec<f32>, _>>() else {
                debug!(word, "skipping row with malformed component");
                continue;
            };

            // Some files open with a "<count> <dim>" header line; skip it and
            // anything else that does not look like a vector row.
            if vector.len() < 2 {
                continue;
            }
            if dimension == 0 {
                dimension = vector.len();
            }
            if vector.len() != dimension {
                debug!(word, "skipping row with mismatched dimension");
                continue;
            }

            let word = word.to_ascii_lowercase();
            if index.contains_key(&word) {
                continue;
            }
            normalize(&mut vector);
            index.insert(word.clone(), words.len());
            words.push(word);
            vectors.push(vector);
        }

        if words.is_empty() {
            bail!("no vectors found in {}", path.display());
        }
        info!(
            words = words.len(),
            dimension,
            "loaded word embeddings from {}",
            path.display()
        );

        Ok(Self {
            words,
            index,
            vectors,
            dimension,
        })
    }

    /// Build embeddings directly from (word, vector) pairs. Rows with a
    /// dimension different from the first are rejected.
    pub fn from_vectors(entries: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let Some(dimension) = entries.first().map(|(_, v)| v.len()) else {
            bail!("no vectors supplied");
        };

        let mut words = Vec::with_capacity(entries.len());
        let mut index = HashMap::new();
        let mut vectors = Vec::with_capacity(entries.len());
        for (word, mut vector) in entries {
            if vector.len() != dimension {
                bail!("vector for {word:?} has dimension {}, expected {dimension}", vector.len());
            }
            let word = word.to_ascii_lowercase();
            if index.contains_key(&word) {
                continue;
            }
            normalize(&mut vector);
            index.insert(word.clone(), words.len());
            words.push(word);
            vectors.push(vector);
        }

        Ok(Self {
            words,
            index,
            vectors,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Weighted sum of the query terms' vectors, unit-normalized. Unknown
    /// terms are reported back so the caller can decide whether the query is
    /// still viable.
    fn query_vector(&self, terms: &[&WeightedWord]) -> (Vec<f32>, Vec<String>) {
        let mut query = vec![0.0f32; self.dimension];
        let mut missing = Vec::new();
        for term in terms {
            let word = term.word.to_ascii_lowercase();
            match self.index.get(&word) {
                Some(&i) => {
                    for (q, v) in query.iter_mut().zip(&self.vectors[i]) {
                        *q += term.weight * v;
                    }
                }
                None => missing.push(term.word.clone()),
            }
        }
        normalize(&mut query);
        (query, missing)
    }
}

impl SimilarityOracle for WordEmbeddings {
    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.to_ascii_lowercase())
    }

    fn most_similar(
        &self,
        positive: &[WeightedWord],
        negative: &[WeightedWord],
        top_n: usize,
    ) -> Result<Vec<(String, f32)>, OracleError> {
        let known_positive: Vec<&WeightedWord> = positive
            .iter()
            .filter(|t| self.contains(&t.word))
            .collect();
        if known_positive.is_empty() {
            return Err(OracleError::EmptyPositiveQuery(
                positive.iter().map(|t| t.word.clone()).collect(),
            ));
        }

        let terms: Vec<&WeightedWord> = known_positive
            .iter()
            .copied()
            .chain(negative.iter().filter(|t| self.contains(&t.word)))
            .collect();
        let (query, missing) = self.query_vector(&terms);
        if !missing.is_empty() {
            debug!(?missing, "query terms out of vocabulary");
        }

        let query_words: HashSet<String> = positive
            .iter()
            .chain(negative)
            .map(|t| t.word.to_ascii_lowercase())
            .collect();

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .par_iter()
            .enumerate()
            .filter(|(i, _)| !query_words.contains(&self.words[*i]))
            .map(|(i, v)| (i, v.iter().zip(&query).map(|(a, b)| a * b).sum::<f32>()))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_n);

        Ok(scored
            .into_iter()
            .map(|(i, score)| (self.words[i].clone(), score))
            .collect())
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, OracleError> {
        let ia = self
            .index
            .get(&a.to_ascii_lowercase())
            .ok_or_else(|| OracleError::UnknownWord(a.to_string()))?;
        let ib = self
            .index
            .get(&b.to_ascii_lowercase())
            .ok_or_else(|| OracleError::UnknownWord(b.to_string()))?;
        Ok(self.vectors[*ia]
            .iter()
            .zip(&self.vectors[*ib])
            .map(|(x, y)| x * y)
            .sum())
    }
}
