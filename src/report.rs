//! Result presentation.
//!
//! A [`SearchReport`] joins a ranked result with document labels and
//! optional keyword statistics. A [`ResultSink`] renders it, either as the
//! human-readable text layout or as JSON. Nothing here feeds back into the
//! ranking.

pub mod keyword;
pub mod sink;

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::corpus::CorpusIndex;
use crate::hybrid::{FusionWeights, RankedHit, RankedResult};
use crate::scoring::Query;

pub use keyword::KeywordStats;
pub use sink::{JsonSink, ResultSink, TextSink};

/// One ranked document as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// 1-based rank.
    pub rank: usize,
    /// File name of the document, or `doc-<id>`.
    pub label: String,
    #[serde(flatten)]
    pub hit: RankedHit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_stats: Option<KeywordStats>,
}

/// A rendered-ready search outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub query: String,
    pub generated_at: DateTime<Local>,
    /// Documents ranked before top-k truncation.
    pub total_documents: usize,
    pub weights: FusionWeights,
    pub hits: Vec<ReportEntry>,
}

impl SearchReport {
    /// Build a report for `result`, looking labels up in `corpus`.
    pub fn new(
        query: &str,
        result: &RankedResult,
        corpus: &CorpusIndex,
        weights: FusionWeights,
    ) -> Self {
        let hits = result
            .iter()
            .enumerate()
            .map(|(i, hit)| ReportEntry {
                rank: i + 1,
                label: corpus
                    .get(hit.document_id)
                    .map(|doc| doc.label())
                    .unwrap_or_else(|| format!("doc-{}", hit.document_id)),
                hit: hit.clone(),
                keyword_stats: None,
            })
            .collect();

        Self {
            query: query.to_string(),
            generated_at: Local::now(),
            total_documents: result.total_documents,
            weights,
            hits,
        }
    }

    /// Attach occurrence statistics of the query's first word to every hit.
    ///
    /// A blank query leaves the report unchanged.
    pub fn with_keyword_stats(mut self, corpus: &CorpusIndex) -> Self {
        let Some(keyword) = Query::new(self.query.as_str()).keyword() else {
            return self;
        };
        for entry in &mut self.hits {
            if let Some(doc) = corpus.get(entry.hit.document_id) {
                entry.keyword_stats = Some(KeywordStats::compute(&doc.text, &keyword));
            }
        }
        self
    }

    /// Override the generation timestamp.
    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

/// File name for a saved report: `search_results_YYYYMMDD_HHMMSS.txt`.
pub fn report_file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("search_results_{}.txt", timestamp.format("%Y%m%d_%H%M%S"))
}
