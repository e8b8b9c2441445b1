//! # semret
//!
//! Hybrid relevance ranking for small text corpora.
//!
//! A query is scored against every document twice: lexically with TF-IDF
//! cosine similarity and semantically with embedding cosine similarity.
//! Both score vectors are min-max normalised, fused with configurable
//! weights and sorted into a deterministic ranking.
//!
//! ## Features
//!
//! - TF-IDF model with smoothed IDF, sublinear TF and vocabulary capping
//! - Pluggable embedders with a deterministic feature-hashing default
//! - Pure, stateless ranking with a total tie-break order
//! - Parallel scoring and batch search on rayon
//! - Directory and JSON Lines corpus loaders
//! - Text and JSON reports
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use semret::corpus::{CorpusIndex, Document};
//! use semret::hybrid::{HybridSearchEngine, SearchConfig};
//!
//! let corpus = CorpusIndex::new(vec![
//!     Document::new(0, "ownership and borrowing in rust"),
//!     Document::new(1, "garbage collection in java"),
//! ])
//! .unwrap();
//!
//! let engine = HybridSearchEngine::new(Arc::new(corpus), SearchConfig::default(), None).unwrap();
//! let result = engine.search("borrowing").unwrap();
//! assert_eq!(result.top().unwrap().document_id, 0);
//! ```

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod hybrid;
pub mod lexical;
pub mod report;
pub mod scoring;
pub mod semantic;
pub mod vector;

pub mod prelude {
    pub use crate::corpus::{CorpusIndex, CorpusLoader, DirectoryLoader, Document, JsonlLoader};
    pub use crate::embedding::{Embedder, HashingEmbedder, embed_corpus, embed_query};
    pub use crate::error::{Result, SemretError};
    pub use crate::hybrid::{
        FusionWeights, HybridRanker, HybridSearchEngine, RankedHit, RankedResult, SearchConfig,
        rank,
    };
    pub use crate::lexical::{LexicalConfig, LexicalModel, TfIdfScorer};
    pub use crate::scoring::{Query, ScoreVector, Scorer};
    pub use crate::semantic::EmbeddingScorer;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
