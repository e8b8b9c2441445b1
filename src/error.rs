//! Error types for the semret library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SemretError`] enum. Degenerate inputs (empty queries, zero vectors,
//! constant score vectors) are not errors; they have defined scores.
//!
//! # Examples
//!
//! ```
//! use semret::error::{Result, SemretError};
//!
//! fn validate_top_k(top_k: usize) -> Result<()> {
//!     if top_k == 0 {
//!         return Err(SemretError::configuration("top_k must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_top_k(0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for semret operations.
#[derive(Error, Debug)]
pub enum SemretError {
    /// Invalid weights, non-positive top_k, empty corpus at fit time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Embedding dimensions disagree between the query and a document,
    /// or between two documents.
    #[error("Dimension mismatch ({context}): expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Malformed corpus input (duplicate ids, bad JSONL line, missing folder).
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Analysis errors (invalid tokenizer pattern).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// An embedder failed to produce a vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SemretError.
pub type Result<T> = std::result::Result<T, SemretError>;

impl SemretError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SemretError::Configuration(msg.into())
    }

    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch<S: Into<String>>(expected: usize, actual: usize, context: S) -> Self {
        SemretError::DimensionMismatch {
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        SemretError::Corpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SemretError::Analysis(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        SemretError::Embedding(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SemretError::Other(msg.into())
    }

    /// Whether this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SemretError::Configuration(_))
    }

    /// Whether this error is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, SemretError::DimensionMismatch { .. })
    }
}
