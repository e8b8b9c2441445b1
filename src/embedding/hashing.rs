//! Feature-hashing embedder over character n-grams.
//!
//! Each lowercase word is padded as `<word>` and split into character
//! n-grams. Every n-gram (and optionally the whole word) is hashed with
//! CRC32 into one of `dimension` buckets with a hash-derived sign. The
//! result is L2-normalised, so cosine similarity reflects shared sub-word
//! structure. Hashing is seedless, so vectors are identical across runs.

use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
use crate::embedding::embedder::Embedder;
use crate::error::{Result, SemretError};
use crate::vector::Vector;

/// Parameters of a [`HashingEmbedder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingEmbedderConfig {
    /// Number of hash buckets, i.e. the embedding dimension.
    pub dimension: usize,
    /// Inclusive range of character n-gram lengths.
    pub ngram_range: (usize, usize),
    /// Whether whole words are hashed as features too.
    pub include_words: bool,
}

impl Default for HashingEmbedderConfig {
    fn default() -> Self {
        Self {
            dimension: 256,
            ngram_range: (3, 5),
            include_words: true,
        }
    }
}

impl HashingEmbedderConfig {
    /// Check the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(SemretError::configuration(
                "embedding dimension must be positive",
            ));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SemretError::configuration(format!(
                "invalid n-gram range ({min_n}, {max_n})"
            )));
        }
        Ok(())
    }
}

/// Deterministic embedder needing no model files.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    config: HashingEmbedderConfig,
    analyzer: PipelineAnalyzer,
}

impl HashingEmbedder {
    /// Create an embedder from a validated configuration.
    pub fn new(config: HashingEmbedderConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = AnalyzerConfig {
            min_token_length: 1,
            ..AnalyzerConfig::default()
        }
        .build()?
        .with_name("hashing");

        Ok(Self { config, analyzer })
    }

    /// Create an embedder with the given dimension and default n-grams.
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        Self::new(HashingEmbedderConfig {
            dimension,
            ..HashingEmbedderConfig::default()
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &HashingEmbedderConfig {
        &self.config
    }

    fn add_feature(&self, data: &mut [f32], feature: &str) {
        let hash = crc32fast::hash(feature.as_bytes());
        let bucket = hash as usize % self.config.dimension;
        let sign = if hash & 0x8000_0000 == 0 { 1.0 } else { -1.0 };
        data[bucket] += sign;
    }

    fn add_word(&self, data: &mut [f32], word: &str) {
        if self.config.include_words {
            self.add_feature(data, &format!("w:{word}"));
        }

        let padded: Vec<char> = format!("<{word}>").chars().collect();
        let (min_n, max_n) = self.config.ngram_range;
        for n in min_n..=max_n {
            if n > padded.len() {
                break;
            }
            for window in padded.windows(n) {
                let gram: String = window.iter().collect();
                self.add_feature(data, &gram);
            }
        }
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vector> {
        let mut data = vec![0.0f32; self.config.dimension];
        for word in self.analyzer.terms(text)? {
            self.add_word(&mut data, &word);
        }

        let mut vector = Vector::new(data);
        vector.normalize();
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
