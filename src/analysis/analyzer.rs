//! Analyzers combine a tokenizer with a chain of token filters.
//!
//! # Examples
//!
//! ```
//! use semret::analysis::analyzer::{Analyzer, AnalyzerConfig};
//!
//! let analyzer = AnalyzerConfig::default().build().unwrap();
//! let terms = analyzer.terms("Hello, World! a I/O x2").unwrap();
//!
//! assert_eq!(terms, vec!["hello", "world", "x2"]);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LowercaseFilter, MinLengthFilter, StopFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;

/// Trait for the complete text-to-token pipeline.
pub trait Analyzer: Send + Sync {
    /// Analyze text into a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyze text and collect the token texts in order.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
///
/// Filters are applied in the order they were added.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Stop word policy applied after lowercasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// Keep every token.
    #[default]
    None,
    /// Drop the built-in English stop word list.
    English,
    /// Drop a caller-supplied list (matched after lowercasing).
    Custom(Vec<String>),
}

/// Tokenization parameters for the lexical scorer.
///
/// The defaults implement the fixed rule: lowercase, split on
/// non-alphanumeric boundaries, drop tokens shorter than 2 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Tokens with fewer characters than this are dropped.
    pub min_token_length: usize,
    /// Whether to lowercase tokens.
    pub lowercase: bool,
    /// Stop word policy.
    pub stop_words: StopWords,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 2,
            lowercase: true,
            stop_words: StopWords::None,
        }
    }
}

impl AnalyzerConfig {
    /// Build the analysis pipeline described by this configuration.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        let mut analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?));

        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if self.min_token_length > 1 {
            analyzer = analyzer.add_filter(Arc::new(MinLengthFilter::new(self.min_token_length)));
        }
        match &self.stop_words {
            StopWords::None => {}
            StopWords::English => {
                analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
            }
            StopWords::Custom(words) => {
                let words = words.iter().map(|w| {
                    if self.lowercase {
                        w.to_lowercase()
                    } else {
                        w.clone()
                    }
                });
                analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(words)));
            }
        }

        Ok(analyzer.with_name("lexical"))
    }
}
