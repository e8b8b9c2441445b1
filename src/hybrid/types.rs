//! Ranked output of the hybrid ranker.

use serde::{Deserialize, Serialize};

use crate::corpus::DocId;

/// One ranked document with its per-signal breakdown.
///
/// `lexical_score` and `semantic_score` are the normalised values that went
/// into `combined_score`; the raw scorer outputs are kept alongside so a
/// sink can render them without recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    pub document_id: DocId,
    /// Weighted average of the normalised scores, in `[0, 1]`.
    pub combined_score: f32,
    /// Normalised lexical score, in `[0, 1]`.
    pub lexical_score: f32,
    /// Normalised semantic score, in `[0, 1]`.
    pub semantic_score: f32,
    /// TF-IDF cosine similarity before normalization.
    pub raw_lexical_score: f32,
    /// Embedding cosine similarity before normalization.
    pub raw_semantic_score: f32,
    /// False when the document (or the query) had no embedding.
    pub semantic_scored: bool,
}

/// Hits sorted by descending combined score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedResult {
    /// Ranked hits, possibly truncated to top-k.
    pub hits: Vec<RankedHit>,
    /// Number of documents that were ranked before truncation.
    pub total_documents: usize,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedHit> {
        self.hits.iter()
    }

    /// Document ids in rank order.
    pub fn document_ids(&self) -> Vec<DocId> {
        self.hits.iter().map(|hit| hit.document_id).collect()
    }

    /// The best hit, if any.
    pub fn top(&self) -> Option<&RankedHit> {
        self.hits.first()
    }

    /// Rank position of a document, if it was returned.
    pub fn position_of(&self, id: DocId) -> Option<usize> {
        self.hits.iter().position(|hit| hit.document_id == id)
    }
}

impl IntoIterator for RankedResult {
    type Item = RankedHit;
    type IntoIter = std::vec::IntoIter<RankedHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedHit;
    type IntoIter = std::slice::Iter<'a, RankedHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}
