//! Token filters that transform token streams.
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`length::MinLengthFilter`] - Drops tokens shorter than a character count
//! - [`stop::StopFilter`] - Removes stop words

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod length;
pub mod lowercase;
pub mod stop;

pub use length::MinLengthFilter;
pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;
