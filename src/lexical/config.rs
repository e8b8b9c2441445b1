//! TF-IDF parameters.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;
use crate::error::{Result, SemretError};

/// Configuration of the lexical model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Tokenization rule shared by documents and queries.
    pub analyzer: AnalyzerConfig,
    /// Use `ln((1 + N) / (1 + df)) + 1` instead of `ln(N / df) + 1`.
    pub smooth_idf: bool,
    /// Replace raw term counts with `1 + ln(tf)`.
    pub sublinear_tf: bool,
    /// Keep only the terms with the highest corpus frequency.
    pub max_features: Option<usize>,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            smooth_idf: true,
            sublinear_tf: false,
            max_features: None,
        }
    }
}

impl LexicalConfig {
    /// Check the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.max_features == Some(0) {
            return Err(SemretError::configuration(
                "max_features must be positive when set",
            ));
        }
        Ok(())
    }
}
