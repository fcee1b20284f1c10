//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the pipeline: they split raw text into
//! an ordered stream of tokens. Tokenization here is total, an empty or
//! punctuation-only input simply yields an empty stream.

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase_word;

pub use lowercase_word::LowercaseWordTokenizer;
