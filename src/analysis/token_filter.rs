//! Token filters that transform token streams.
//!
//! Filters receive a stream of tokens and produce a new stream, dropping or
//! rewriting tokens along the way. They are chained in an analyzer:
//!
//! ```text
//! Tokenizer → MinLength → Spelling → counts
//! ```

use crate::analysis::token::TokenStream;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> TokenStream;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod min_length;
pub mod spelling;

pub use min_length::MinLengthFilter;
pub use spelling::SpellingFilter;
