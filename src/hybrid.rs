//! Hybrid ranking: fusing the lexical and semantic signals.
//!
//! Both score vectors are min-max normalised to `[0, 1]` independently,
//! combined as a weighted average and sorted into a deterministic total
//! order. [`ranker::rank`] is a pure function; [`engine::HybridSearchEngine`]
//! wires the scorers, the embedder and the ranker together for a corpus.
//!
//! # Example
//!
//! ```
//! use semret::hybrid::{rank, FusionWeights};
//! use semret::scoring::ScoreVector;
//!
//! let lexical = ScoreVector::new(vec![0, 1, 2], vec![0.9, 0.1, 0.0]).unwrap();
//! let semantic = ScoreVector::new(vec![0, 1, 2], vec![0.2, 0.8, 0.5]).unwrap();
//!
//! let result = rank(&lexical, &semantic, &FusionWeights::default(), Some(3)).unwrap();
//! assert_eq!(result.document_ids(), vec![1, 0, 2]);
//! ```

pub mod config;
pub mod engine;
pub mod normalizer;
pub mod ranker;
pub mod types;

pub use config::{FusionWeights, SearchConfig};
pub use engine::HybridSearchEngine;
pub use normalizer::{MIDPOINT, min_max_normalize};
pub use ranker::{HybridRanker, rank};
pub use types::{RankedHit, RankedResult};
