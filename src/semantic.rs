//! Semantic relevance signal: cosine similarity over embeddings.
//!
//! Embeddings are produced upstream (see [`crate::embedding`]). A document
//! without one still gets an entry, scored `0.0` and flagged unscored, so the
//! ranker can place it on the lexical signal alone.

use crate::corpus::{CorpusIndex, DocId};
use crate::error::{Result, SemretError};
use crate::scoring::{Query, ScoreVector, Scorer};
use crate::vector::batch_cosine_similarity;

/// Cosine similarity between a query embedding and each document embedding.
///
/// `document_embeddings` is aligned with `doc_ids`; `None` marks a document
/// without embedding. Every present embedding must have the query's
/// dimension. Results are clamped to `[-1, 1]`.
pub fn score(
    query_embedding: &[f32],
    doc_ids: &[DocId],
    document_embeddings: &[Option<&[f32]>],
) -> Result<ScoreVector> {
    if doc_ids.len() != document_embeddings.len() {
        return Err(SemretError::configuration(format!(
            "{} document ids but {} embeddings",
            doc_ids.len(),
            document_embeddings.len()
        )));
    }

    let expected = query_embedding.len();
    for (id, embedding) in doc_ids.iter().zip(document_embeddings) {
        if let Some(embedding) = embedding
            && embedding.len() != expected
        {
            return Err(SemretError::dimension_mismatch(
                expected,
                embedding.len(),
                format!("document {id}"),
            ));
        }
    }

    let present: Vec<&[f32]> = document_embeddings.iter().flatten().copied().collect();
    let similarities = batch_cosine_similarity(query_embedding, &present)?;

    let mut similarities = similarities.into_iter();
    let scores: Vec<f32> = document_embeddings
        .iter()
        .map(|embedding| match embedding {
            Some(_) => similarities.next().unwrap_or(0.0),
            None => 0.0,
        })
        .collect();

    let scored = document_embeddings.iter().map(Option::is_some).collect();
    ScoreVector::with_flags(doc_ids.to_vec(), scores, scored)
}

/// Scores a query's embedding against the corpus embeddings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddingScorer;

impl EmbeddingScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for EmbeddingScorer {
    /// A query without embedding leaves every document unscored.
    fn score(&self, corpus: &CorpusIndex, query: &Query) -> Result<ScoreVector> {
        let doc_ids = corpus.doc_ids();
        let Some(query_embedding) = &query.embedding else {
            let len = doc_ids.len();
            return ScoreVector::with_flags(doc_ids, vec![0.0; len], vec![false; len]);
        };

        if let Some(dimension) = corpus.embedding_dimension() {
            query_embedding.validate_dimension(dimension, "query")?;
        }

        let embeddings: Vec<Option<&[f32]>> = corpus
            .iter()
            .map(|doc| doc.embedding.as_ref().map(|e| e.as_slice()))
            .collect();
        score(query_embedding.as_slice(), &doc_ids, &embeddings)
    }

    fn name(&self) -> &str {
        "semantic"
    }
}
