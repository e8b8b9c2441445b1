//! Text analysis for lexical scoring.
//!
//! Raw text flows through a tokenizer and a chain of token filters:
//!
//! ```text
//! Raw Text → RegexTokenizer → LowercaseFilter → MinLengthFilter → StopFilter → terms
//! ```
//!
//! The default pipeline implements the fixed tokenization rule used by the
//! lexical scorer: lowercase, split on non-alphanumeric boundaries, drop
//! tokens shorter than 2 characters.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, AnalyzerConfig, PipelineAnalyzer, StopWords};
pub use token::{Token, TokenStream};
