//! Command line argument parsing for the semret CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// semret - hybrid TF-IDF and embedding document retrieval
#[derive(Parser, Debug, Clone)]
#[command(name = "semret")]
#[command(about = "Rank text documents against a query with lexical and semantic signals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SemretArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SemretArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank the corpus against one query
    Search(SearchArgs),

    /// Rank the corpus against every query of a file, in parallel
    Batch(BatchArgs),

    /// Show the heaviest TF-IDF terms of the corpus
    Terms(TermsArgs),
}

/// Where the corpus comes from.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Folder of text documents
    #[arg(long, env = "SEMRET_DOCS", value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// JSON Lines corpus file (takes precedence over --folder)
    #[arg(long, value_name = "FILE")]
    pub jsonl: Option<PathBuf>,

    /// File extension picked up from --folder
    #[arg(long, default_value = "txt")]
    pub extension: String,
}

/// Ranking parameters shared by `search` and `batch`.
#[derive(Args, Debug, Clone)]
pub struct RankingArgs {
    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Weight of the lexical signal
    #[arg(long)]
    pub lexical_weight: Option<f32>,

    /// Weight of the semantic signal
    #[arg(long)]
    pub semantic_weight: Option<f32>,

    /// Return at most this many results
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Embedding dimension of the hashing embedder
    #[arg(long)]
    pub dimension: Option<usize>,

    /// Skip embedding; rank on the lexical signal only
    #[arg(long)]
    pub no_embeddings: bool,

    /// Stop word list applied by the lexical analyzer
    #[arg(long, value_name = "LIST")]
    pub stop_words: Option<StopWordsArg>,
}

/// Arguments for a single search
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Also write the results to search_results_<timestamp>.txt
    #[arg(long)]
    pub save_report: bool,

    /// Show occurrence statistics of the query's first word
    #[arg(long)]
    pub keyword_stats: bool,
}

/// Arguments for batch search
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,

    /// File with one query per line
    #[arg(long, value_name = "FILE")]
    pub queries: PathBuf,

    /// Worker threads (default: number of CPUs)
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Arguments for the term listing
#[derive(Args, Debug, Clone)]
pub struct TermsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of terms to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Stop word list applied by the lexical analyzer
    #[arg(long, value_name = "LIST")]
    pub stop_words: Option<StopWordsArg>,
}

/// Stop word lists selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordsArg {
    /// Keep every token
    None,
    /// Built-in English list
    English,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let args = SemretArgs::try_parse_from([
            "semret",
            "search",
            "--folder",
            "docs",
            "rust ownership",
            "--lexical-weight",
            "0.3",
            "--semantic-weight",
            "0.7",
            "--top-k",
            "5",
            "--stop-words",
            "english",
            "--keyword-stats",
        ])
        .unwrap();

        let Command::Search(search) = args.command else {
            panic!("expected search command");
        };
        assert_eq!(search.query, "rust ownership");
        assert_eq!(search.corpus.folder, Some(PathBuf::from("docs")));
        assert_eq!(search.ranking.lexical_weight, Some(0.3));
        assert_eq!(search.ranking.semantic_weight, Some(0.7));
        assert_eq!(search.ranking.top_k, Some(5));
        assert_eq!(search.ranking.stop_words, Some(StopWordsArg::English));
        assert!(search.keyword_stats);
        assert!(!search.save_report);
        assert!(!search.ranking.no_embeddings);
    }

    #[test]
    fn test_parse_batch() {
        let args = SemretArgs::try_parse_from([
            "semret",
            "-f",
            "json",
            "--pretty",
            "batch",
            "--jsonl",
            "corpus.jsonl",
            "--queries",
            "queries.txt",
            "--threads",
            "4",
            "--no-embeddings",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        let Command::Batch(batch) = args.command else {
            panic!("expected batch command");
        };
        assert_eq!(batch.corpus.jsonl, Some(PathBuf::from("corpus.jsonl")));
        assert_eq!(batch.queries, PathBuf::from("queries.txt"));
        assert_eq!(batch.threads, Some(4));
        assert!(batch.ranking.no_embeddings);
    }

    #[test]
    fn test_parse_terms() {
        let args =
            SemretArgs::try_parse_from(["semret", "terms", "--folder", "docs", "--limit", "3"])
                .unwrap();
        let Command::Terms(terms) = args.command else {
            panic!("expected terms command");
        };
        assert_eq!(terms.limit, 3);
        assert_eq!(terms.corpus.extension, "txt");
    }

    #[test]
    fn test_verbosity() {
        let args = SemretArgs::try_parse_from(["semret", "-vvv", "terms"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = SemretArgs::try_parse_from(["semret", "-q", "-v", "terms"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = SemretArgs::try_parse_from(["semret", "terms"]).unwrap();
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_missing_query_is_rejected() {
        assert!(SemretArgs::try_parse_from(["semret", "search", "--folder", "docs"]).is_err());
        assert!(SemretArgs::try_parse_from(["semret", "batch", "--folder", "docs"]).is_err());
    }
}
