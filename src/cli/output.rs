//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SemretArgs};
use crate::error::Result;
use crate::report::{JsonSink, ResultSink, SearchReport, TextSink};

/// One term of the `terms` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f32,
}

/// Result of the `terms` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsSummary {
    pub documents: usize,
    pub vocabulary_size: usize,
    pub terms: Vec<TermWeight>,
}

/// Write a search report to stdout in the selected format.
pub fn output_report(report: &SearchReport, args: &SemretArgs) -> Result<()> {
    let stdout = io::stdout().lock();
    match args.output_format {
        OutputFormat::Human => TextSink::new(stdout).write(report),
        OutputFormat::Json => JsonSink::new(stdout, args.pretty).write(report),
    }
}

/// Write the term listing to stdout in the selected format.
pub fn output_terms(summary: &TermsSummary, args: &SemretArgs) -> Result<()> {
    let mut out = io::stdout().lock();
    match args.output_format {
        OutputFormat::Human => write_terms_human(&mut out, summary)?,
        OutputFormat::Json => {
            if args.pretty {
                serde_json::to_writer_pretty(&mut out, summary)?;
            } else {
                serde_json::to_writer(&mut out, summary)?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_terms_human<W: Write>(out: &mut W, summary: &TermsSummary) -> Result<()> {
    writeln!(
        out,
        "Top Terms ({} documents, {} terms in vocabulary):",
        summary.documents, summary.vocabulary_size
    )?;
    writeln!(out, "{}", "=".repeat(40))?;
    let width = summary
        .terms
        .iter()
        .map(|t| t.term.chars().count())
        .max()
        .unwrap_or(0);
    for (i, entry) in summary.terms.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<width$}  {:.4}",
            i + 1,
            entry.term,
            entry.weight
        )?;
    }
    Ok(())
}

/// Print a status line in human mode unless quiet.
pub fn output_message(message: &str, args: &SemretArgs) {
    if args.output_format == OutputFormat::Human && args.verbosity() > 0 {
        println!("{message}");
    }
}
