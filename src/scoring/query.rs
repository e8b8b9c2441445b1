//! Search queries.

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// A free-text query, optionally carrying its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Raw query text.
    pub text: String,
    /// Embedding of the text, if one was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vector>,
}

impl Query {
    /// Create a query without embedding.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            embedding: None,
        }
    }

    /// Attach an embedding.
    pub fn with_embedding(mut self, embedding: Vector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// First whitespace-separated word, lowercased.
    pub fn keyword(&self) -> Option<String> {
        self.text.split_whitespace().next().map(str::to_lowercase)
    }
}
