//! Minimum length filter.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Removes tokens whose text has fewer than `min_length` characters.
///
/// Length is measured in Unicode scalar values, not bytes.
#[derive(Clone, Debug)]
pub struct MinLengthFilter {
    min_length: usize,
}

impl MinLengthFilter {
    /// Create a filter dropping tokens shorter than `min_length` characters.
    pub fn new(min_length: usize) -> Self {
        MinLengthFilter { min_length }
    }

    /// The configured minimum length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for MinLengthFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for MinLengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_length = self.min_length;
        let kept: Vec<Token> = tokens
            .filter(|token| token.char_len() >= min_length)
            .collect();

        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_short_tokens() {
        let filter = MinLengthFilter::default();
        let tokens = vec![
            Token::new("a", 0),
            Token::new("io", 1),
            Token::new("x", 2),
            Token::new("rust", 3),
        ];

        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["io", "rust"]);
    }

    #[test]
    fn test_multibyte_single_char_is_dropped() {
        let filter = MinLengthFilter::new(2);
        let tokens = vec![Token::new("é", 0), Token::new("éa", 1)];

        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["éa"]);
    }
}
