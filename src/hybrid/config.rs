//! Configuration for hybrid search.
//!
//! # Examples
//!
//! ```
//! use semret::hybrid::config::{FusionWeights, SearchConfig};
//!
//! let config = SearchConfig::default();
//! assert_eq!(config.weights, FusionWeights::new(1.0, 1.0));
//! assert!(config.top_k.is_none());
//!
//! // Semantic-focused search
//! let semantic_focused = FusionWeights::new(0.3, 0.7);
//! assert!(semantic_focused.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::embedding::HashingEmbedderConfig;
use crate::error::{Result, SemretError};
use crate::lexical::LexicalConfig;

/// Relative contribution of each signal to the combined score.
///
/// Weights need not sum to 1: fusion divides by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    /// Weight of the normalised lexical score.
    pub lexical_weight: f32,
    /// Weight of the normalised semantic score.
    pub semantic_weight: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            lexical_weight: 1.0,
            semantic_weight: 1.0,
        }
    }
}

impl FusionWeights {
    pub fn new(lexical_weight: f32, semantic_weight: f32) -> Self {
        Self {
            lexical_weight,
            semantic_weight,
        }
    }

    /// Weights must be finite and non-negative, and not both zero.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("lexical_weight", self.lexical_weight),
            ("semantic_weight", self.semantic_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SemretError::configuration(format!(
                    "{name} must be a non-negative number, got {weight}"
                )));
            }
        }
        if self.total() == 0.0 {
            return Err(SemretError::configuration(
                "lexical_weight and semantic_weight cannot both be zero",
            ));
        }
        Ok(())
    }

    /// Sum of both weights.
    pub fn total(&self) -> f32 {
        self.lexical_weight + self.semantic_weight
    }
}

/// Complete configuration of a search session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fusion weights.
    pub weights: FusionWeights,
    /// Truncate results to this many hits; `None` returns the full ranking.
    pub top_k: Option<usize>,
    /// TF-IDF parameters.
    pub lexical: LexicalConfig,
    /// Parameters of the built-in hashing embedder.
    pub embedding: HashingEmbedderConfig,
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check every ranking parameter.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        validate_top_k(self.top_k)?;
        self.lexical.validate()
    }
}

/// `top_k`, when given, must be positive.
pub fn validate_top_k(top_k: Option<usize>) -> Result<()> {
    if top_k == Some(0) {
        return Err(SemretError::configuration("top_k must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_weight_validation() {
        assert!(FusionWeights::default().validate().is_ok());
        assert!(FusionWeights::new(0.0, 2.0).validate().is_ok());
        assert!(FusionWeights::new(0.0, 0.0).validate().unwrap_err().is_configuration());
        assert!(FusionWeights::new(-0.1, 1.0).validate().is_err());
        assert!(FusionWeights::new(f32::NAN, 1.0).validate().is_err());
        assert!(FusionWeights::new(1.0, f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_top_k_validation() {
        assert!(validate_top_k(None).is_ok());
        assert!(validate_top_k(Some(1)).is_ok());
        assert!(validate_top_k(Some(0)).unwrap_err().is_configuration());
    }

    #[test]
    fn test_from_file_with_partial_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"weights": {{"semantic_weight": 3.0}}, "top_k": 5, "lexical": {{"sublinear_tf": true}}}}"#
        )
        .unwrap();

        let config = SearchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.weights, FusionWeights::new(1.0, 3.0));
        assert_eq!(config.top_k, Some(5));
        assert!(config.lexical.sublinear_tf);
        assert!(config.lexical.smooth_idf);
        assert_eq!(config.embedding.dimension, 256);
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            SearchConfig::from_file(file.path()),
            Err(SemretError::Json(_))
        ));
    }
}
