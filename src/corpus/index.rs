//! Immutable, ordered document collection with lookup by id.

use ahash::AHashMap;

use crate::corpus::document::{DocId, Document};
use crate::error::{Result, SemretError};
use crate::vector::Vector;

/// Ordered sequence of documents, fixed for the lifetime of a session.
///
/// Iteration follows load order. Every document that carries an embedding
/// has the same dimension.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    documents: Vec<Document>,
    positions: AHashMap<DocId, usize>,
    dimension: Option<usize>,
}

impl CorpusIndex {
    /// Build an index from documents in load order.
    ///
    /// Fails on duplicate ids and on embeddings of differing dimension.
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let mut positions = AHashMap::with_capacity(documents.len());
        let mut dimension: Option<usize> = None;

        for (position, doc) in documents.iter().enumerate() {
            if positions.insert(doc.id, position).is_some() {
                return Err(SemretError::corpus(format!(
                    "duplicate document id {}",
                    doc.id
                )));
            }

            if let Some(embedding) = &doc.embedding {
                match dimension {
                    None => dimension = Some(embedding.dimension()),
                    Some(expected) => embedding
                        .validate_dimension(expected, &format!("document {}", doc.id))?,
                }
            }
        }

        Ok(Self {
            documents,
            positions,
            dimension,
        })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by id.
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.positions.get(&id).map(|&pos| &self.documents[pos])
    }

    /// Load-order position of a document id.
    pub fn position(&self, id: DocId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Document at a load-order position.
    pub fn document_at(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    /// Iterate documents in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// All documents in load order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Document ids in load order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.documents.iter().map(|doc| doc.id).collect()
    }

    /// Embedding dimension shared by every embedded document, if any has one.
    pub fn embedding_dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of documents carrying an embedding.
    pub fn embedded_count(&self) -> usize {
        self.documents.iter().filter(|d| d.has_embedding()).count()
    }

    /// Replace every document's embedding, aligned with load order.
    pub fn with_embeddings(self, embeddings: Vec<Option<Vector>>) -> Result<Self> {
        if embeddings.len() != self.documents.len() {
            return Err(SemretError::corpus(format!(
                "expected {} embeddings, got {}",
                self.documents.len(),
                embeddings.len()
            )));
        }

        let documents = self
            .documents
            .into_iter()
            .zip(embeddings)
            .map(|(mut doc, embedding)| {
                doc.embedding = embedding;
                doc
            })
            .collect();

        Self::new(documents)
    }
}

impl<'a> IntoIterator for &'a CorpusIndex {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
