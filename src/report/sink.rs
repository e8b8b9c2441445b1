//! Sinks that render a [`SearchReport`].

use std::io::Write;

use crate::error::Result;
use crate::report::SearchReport;

const SEPARATOR_WIDTH: usize = 50;

/// Consumer of search reports.
pub trait ResultSink {
    fn write(&mut self, report: &SearchReport) -> Result<()>;
}

/// Human-readable layout with 4-decimal scores.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for TextSink<W> {
    fn write(&mut self, report: &SearchReport) -> Result<()> {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        let w = &mut self.writer;

        writeln!(w, "Search Results")?;
        writeln!(
            w,
            "Date and Time: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(w, "Query: {}", report.query)?;
        writeln!(
            w,
            "Weights: lexical={}, semantic={}",
            report.weights.lexical_weight, report.weights.semantic_weight
        )?;
        writeln!(
            w,
            "Documents Returned: {} of {}",
            report.hits.len(),
            report.total_documents
        )?;
        writeln!(w, "{separator}")?;
        writeln!(w)?;

        for entry in &report.hits {
            let hit = &entry.hit;
            writeln!(
                w,
                "Document {} - Title: {} (id {})",
                entry.rank, entry.label, hit.document_id
            )?;
            writeln!(w, "Combined Score: {:.4}", hit.combined_score)?;
            writeln!(
                w,
                "Lexical Score: {:.4} (raw {:.4})",
                hit.lexical_score, hit.raw_lexical_score
            )?;
            if hit.semantic_scored {
                writeln!(
                    w,
                    "Semantic Score: {:.4} (raw {:.4})",
                    hit.semantic_score, hit.raw_semantic_score
                )?;
            } else {
                writeln!(w, "Semantic Score: {:.4} (no embedding)", hit.semantic_score)?;
            }

            if let Some(stats) = &entry.keyword_stats {
                let keyword = &stats.keyword;
                writeln!(w, "Occurrences of Keyword '{keyword}': {}", stats.count)?;
                writeln!(
                    w,
                    "Percentage of Keyword '{keyword}': {:.2}%",
                    stats.percentage
                )?;
                match stats.average_position {
                    Some(position) => writeln!(
                        w,
                        "Average Position of Keyword '{keyword}': {position:.1}"
                    )?,
                    None => writeln!(w, "The keyword '{keyword}' is not present in the text.")?,
                }
            }
            writeln!(w, "{separator}")?;
            writeln!(w)?;
        }

        w.flush()?;
        Ok(())
    }
}

/// JSON output, one document per report.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn write(&mut self, report: &SearchReport) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, report)?;
        } else {
            serde_json::to_writer(&mut self.writer, report)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusIndex, Document};
    use crate::hybrid::{FusionWeights, rank};
    use crate::scoring::ScoreVector;

    fn report() -> SearchReport {
        let corpus = CorpusIndex::new(vec![
            Document::new(0, "alpha beta alpha"),
            Document::new(1, "gamma"),
            Document::new(2, "delta alpha"),
        ])
        .unwrap();
        let lexical = ScoreVector::new(vec![0, 1, 2], vec![0.9, 0.1, 0.0]).unwrap();
        let semantic =
            ScoreVector::with_flags(vec![0, 1, 2], vec![0.2, 0.8, 0.0], vec![true, true, false])
                .unwrap();
        let result = rank(&lexical, &semantic, &FusionWeights::default(), None).unwrap();
        SearchReport::new("alpha", &result, &corpus, FusionWeights::default())
            .with_keyword_stats(&corpus)
    }

    #[test]
    fn test_text_sink_one_block_per_hit() {
        let mut sink = TextSink::new(Vec::new());
        sink.write(&report()).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();

        assert!(output.starts_with("Search Results\n"));
        assert_eq!(output.matches("Combined Score: ").count(), 3);
        assert!(output.contains("Documents Returned: 3 of 3"));
        assert!(output.contains("Combined Score: 0.5000"));
        assert!(output.contains("Semantic Score: 0.0000 (no embedding)"));
        assert!(output.contains("The keyword 'alpha' is not present in the text."));
        assert!(output.contains("Average Position of Keyword 'alpha': 1.0"));
        // header separator plus one per hit
        assert_eq!(output.matches(&"-".repeat(SEPARATOR_WIDTH)).count(), 4);
    }

    #[test]
    fn test_json_sink_fields() {
        let mut sink = JsonSink::new(Vec::new(), false);
        sink.write(&report()).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["query"], "alpha");
        let hits = value["hits"].as_array().unwrap();
        assert_eq!(hits.len(), 3);
        for hit in hits {
            for field in [
                "document_id",
                "combined_score",
                "lexical_score",
                "semantic_score",
            ] {
                assert!(hit.get(field).is_some(), "missing {field}");
            }
        }
    }

    #[test]
    fn test_json_sink_pretty_round_trip() {
        let report = report();
        let mut sink = JsonSink::new(Vec::new(), true);
        sink.write(&report).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.lines().count() > 1);

        let parsed: SearchReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.query, report.query);
        assert_eq!(parsed.total_documents, 3);
        let labels: Vec<_> = parsed.hits.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["doc-1", "doc-0", "doc-2"]);
        assert!(!parsed.hits[2].hit.semantic_scored);
        assert_eq!(parsed.hits[0].keyword_stats.as_ref().unwrap().count, 0);
    }
}
