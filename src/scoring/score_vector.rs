//! Per-document scores produced by one signal.

use crate::corpus::DocId;
use crate::error::{Result, SemretError};

/// One scalar score per corpus document, in corpus load order.
///
/// Scores are always finite: non-finite inputs are stored as `0.0`. A
/// document can be flagged as unscored when its signal was unavailable
/// (e.g. no embedding); it still carries a score of `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector {
    doc_ids: Vec<DocId>,
    scores: Vec<f32>,
    scored: Vec<bool>,
}

fn sanitize(score: f32) -> f32 {
    if score.is_finite() { score } else { 0.0 }
}

impl ScoreVector {
    /// Create a score vector where every document was scored.
    pub fn new(doc_ids: Vec<DocId>, scores: Vec<f32>) -> Result<Self> {
        let scored = vec![true; doc_ids.len()];
        Self::with_flags(doc_ids, scores, scored)
    }

    /// Create a score vector with explicit per-document scored flags.
    ///
    /// Unscored documents are forced to `0.0`.
    pub fn with_flags(doc_ids: Vec<DocId>, scores: Vec<f32>, scored: Vec<bool>) -> Result<Self> {
        if scores.len() != doc_ids.len() || scored.len() != doc_ids.len() {
            return Err(SemretError::configuration(format!(
                "score vector needs one entry per document: {} ids, {} scores, {} flags",
                doc_ids.len(),
                scores.len(),
                scored.len()
            )));
        }

        let scores = scores
            .into_iter()
            .zip(&scored)
            .map(|(score, &is_scored)| if is_scored { sanitize(score) } else { 0.0 })
            .collect();

        Ok(Self {
            doc_ids,
            scores,
            scored,
        })
    }

    /// A vector of zeros, every document scored.
    pub fn zeros(doc_ids: Vec<DocId>) -> Self {
        let len = doc_ids.len();
        Self {
            doc_ids,
            scores: vec![0.0; len],
            scored: vec![true; len],
        }
    }

    /// Build from `(id, score)` pairs, every document scored.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DocId, f32)>,
    {
        let (doc_ids, scores): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(doc_ids, scores)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    /// Whether there are no documents.
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Document ids in order.
    pub fn doc_ids(&self) -> &[DocId] {
        &self.doc_ids
    }

    /// Scores in document order.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Score of the document at `index`.
    pub fn score_at(&self, index: usize) -> Option<f32> {
        self.scores.get(index).copied()
    }

    /// Score of a document by id.
    pub fn score_of(&self, id: DocId) -> Option<f32> {
        self.doc_ids
            .iter()
            .position(|&doc_id| doc_id == id)
            .map(|index| self.scores[index])
    }

    /// Whether the document at `index` carries a real score.
    pub fn is_scored(&self, index: usize) -> bool {
        self.scored.get(index).copied().unwrap_or(false)
    }

    /// Number of documents flagged unscored.
    pub fn unscored_count(&self) -> usize {
        self.scored.iter().filter(|s| !**s).count()
    }

    /// Iterate `(id, score, scored)` in document order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, f32, bool)> + '_ {
        self.doc_ids
            .iter()
            .zip(&self.scores)
            .zip(&self.scored)
            .map(|((&id, &score), &scored)| (id, score, scored))
    }
}
