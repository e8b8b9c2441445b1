//! Text embedding support for the semantic signal.
//!
//! Embedding generation sits outside the ranking core: the scorers only
//! consume vectors that are already attached to documents and queries. This
//! module defines the [`Embedder`] trait, ships a deterministic
//! [`HashingEmbedder`] that needs no model files, and provides the helpers
//! that run an embedder over a corpus or a query.
//!
//! A failed embedding is never fatal. The affected document keeps no
//! embedding and is ranked on the lexical signal alone.
//!
//! # Custom implementation
//!
//! ```
//! use semret::embedding::Embedder;
//! use semret::error::Result;
//! use semret::vector::Vector;
//!
//! struct ConstantEmbedder;
//!
//! impl Embedder for ConstantEmbedder {
//!     fn embed(&self, _text: &str) -> Result<Vector> {
//!         Ok(Vector::new(vec![1.0, 0.0]))
//!     }
//!
//!     fn dimension(&self) -> usize {
//!         2
//!     }
//! }
//! ```

pub mod embedder;
pub mod hashing;

use log::{debug, warn};
use rayon::prelude::*;

use crate::corpus::CorpusIndex;
use crate::error::{Result, SemretError};
use crate::scoring::Query;
use crate::vector::Vector;

pub use embedder::Embedder;
pub use hashing::{HashingEmbedder, HashingEmbedderConfig};

/// Embed one text and check the result against the embedder's dimension.
fn embed_checked(embedder: &dyn Embedder, text: &str) -> Result<Vector> {
    let vector = embedder.embed(text)?;
    vector.validate_dimension(embedder.dimension(), embedder.name())?;
    if !vector.is_valid() {
        return Err(SemretError::embedding(format!(
            "{} produced non-finite values",
            embedder.name()
        )));
    }
    Ok(vector)
}

/// Attach an embedding to every document of the corpus.
///
/// Documents are embedded in parallel. A document whose embedding fails, or
/// comes back with the wrong dimension, is left without one and a warning
/// is logged. Existing embeddings are replaced, with a warning naming how
/// many were dropped.
pub fn embed_corpus(corpus: CorpusIndex, embedder: &dyn Embedder) -> Result<CorpusIndex> {
    let precomputed = corpus.embedded_count();
    if precomputed > 0 {
        warn!(
            "Replacing {precomputed} precomputed embeddings with {}-dimensional {} vectors",
            embedder.dimension(),
            embedder.name()
        );
    }

    let embeddings: Vec<Option<Vector>> = corpus
        .documents()
        .par_iter()
        .map(|doc| match embed_checked(embedder, &doc.text) {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!("Failed to embed document {}: {e}", doc.label());
                None
            }
        })
        .collect();

    let embedded = embeddings.iter().filter(|e| e.is_some()).count();
    debug!(
        "Embedded {embedded}/{} documents with {}",
        embeddings.len(),
        embedder.name()
    );

    corpus.with_embeddings(embeddings)
}

/// Build a query, embedding its text when possible.
///
/// A failed embedding yields a query without one, so ranking falls back to
/// the lexical signal.
pub fn embed_query(text: &str, embedder: &dyn Embedder) -> Query {
    match embed_checked(embedder, text) {
        Ok(vector) => Query::new(text).with_embedding(vector),
        Err(e) => {
            warn!("Failed to embed query: {e}");
            Query::new(text)
        }
    }
}
