//! Minimum length filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// Tokens shorter than this are dropped by default.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// A filter that removes tokens shorter than a minimum character count.
///
/// # Examples
///
/// ```
/// use vibescore::analysis::token::Token;
/// use vibescore::analysis::token_filter::{Filter, MinLengthFilter};
///
/// let filter = MinLengthFilter::new();
/// let tokens = vec![Token::new("a", 0), Token::new("cozy", 1)];
/// let kept: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
///
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].text, "cozy");
/// ```
#[derive(Clone, Debug)]
pub struct MinLengthFilter {
    min_length: usize,
}

impl MinLengthFilter {
    /// Create a filter with the default minimum length of two characters.
    pub fn new() -> Self {
        Self::with_min_length(DEFAULT_MIN_LENGTH)
    }

    /// Create a filter with a custom minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        MinLengthFilter { min_length }
    }

    /// Get the minimum length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for MinLengthFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for MinLengthFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let min_length = self.min_length;
        Box::new(tokens.filter(move |token| token.char_len() >= min_length))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}
