//! Corpus documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Document identifier, unique within a corpus.
pub type DocId = u64;

/// Metadata key holding the source file name of a document.
pub const FILENAME_METADATA_KEY: &str = "filename";

/// A single corpus document.
///
/// The embedding is absent until an embedder has run over the corpus, and
/// stays absent for documents whose embedding failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: DocId,
    /// Raw document text.
    pub text: String,
    /// Dense embedding of the text, if one was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vector>,
    /// Additional metadata (e.g. source file name).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a new document without embedding or metadata.
    pub fn new<S: Into<String>>(id: DocId, text: S) -> Self {
        Self {
            id,
            text: text.into(),
            embedding: None,
            metadata: HashMap::new(),
        }
    }

    /// Attach an embedding.
    pub fn with_embedding(mut self, embedding: Vector) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether this document carries an embedding.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    /// Human-readable label: the source file name if known, else `doc-<id>`.
    pub fn label(&self) -> String {
        self.metadata
            .get(FILENAME_METADATA_KEY)
            .cloned()
            .unwrap_or_else(|| format!("doc-{}", self.id))
    }
}
