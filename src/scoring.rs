//! Types shared by both relevance signals.
//!
//! Each signal implements [`Scorer`] and produces one [`ScoreVector`] per
//! query: exactly one finite score for every corpus document, in corpus
//! load order. The hybrid ranker only sees score vectors, so it can be
//! exercised with synthetic scorers.

pub mod query;
pub mod score_vector;

use crate::corpus::CorpusIndex;
use crate::error::Result;

pub use query::Query;
pub use score_vector::ScoreVector;

/// Produces a score for every corpus document given a query.
///
/// Implementations read shared immutable state only, so one scorer can
/// serve concurrent queries.
pub trait Scorer: Send + Sync {
    /// Score every document of `corpus` against `query`.
    fn score(&self, corpus: &CorpusIndex, query: &Query) -> Result<ScoreVector>;

    /// Name of the signal, e.g. "lexical".
    fn name(&self) -> &str;
}
