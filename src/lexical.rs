//! Lexical relevance signal based on TF-IDF weighting.
//!
//! [`LexicalModel::fit`] builds the vocabulary and inverse document
//! frequencies once per corpus. Scoring a query computes its TF-IDF vector
//! with the same analyzer and returns the cosine similarity against every
//! document vector. Out-of-vocabulary query terms contribute nothing.
//!
//! # Examples
//!
//! ```
//! use semret::corpus::{CorpusIndex, Document};
//! use semret::lexical::{LexicalConfig, LexicalModel};
//! use semret::scoring::Query;
//!
//! let corpus = CorpusIndex::new(vec![
//!     Document::new(0, "rust ownership and borrowing"),
//!     Document::new(1, "python garbage collection"),
//! ])
//! .unwrap();
//!
//! let model = LexicalModel::fit(&corpus, &LexicalConfig::default()).unwrap();
//! let scores = model.score(&Query::new("ownership")).unwrap();
//! assert!(scores.scores()[0] > scores.scores()[1]);
//! ```

pub mod config;
pub mod model;
pub mod scorer;

pub use config::LexicalConfig;
pub use model::LexicalModel;
pub use scorer::TfIdfScorer;
