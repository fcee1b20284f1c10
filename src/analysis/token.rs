//! Token types for text analysis.
//!
//! A [`Token`] carries its text plus where it came from, so filters can drop
//! or rewrite tokens without losing track of the original ordering.
//!
//! # Examples
//!
//! ```
//! use vibescore::analysis::token::Token;
//!
//! let token = Token::with_offsets("cozy", 1, 5, 9);
//! assert_eq!(token.text, "cozy");
//! assert_eq!(token.position, 1);
//! assert_eq!(token.end_offset, 9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single unit of text produced by a tokenizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the lowercased text
    pub start_offset: usize,

    /// The byte offset where this token ends in the lowercased text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Get the length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text of this token, keeping its position and offsets.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.position)
    }
}

/// A stream of tokens flowing through the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("warm", 3);
        assert_eq!(token.text, "warm");
        assert_eq!(token.position, 3);
        assert_eq!(token.char_len(), 4);
        assert!(!token.is_empty());
    }

    #[test]
    fn test_with_text_keeps_offsets() {
        let token = Token::with_offsets("color", 0, 4, 9).with_text("colour");
        assert_eq!(token.text, "colour");
        assert_eq!(token.start_offset, 4);
        assert_eq!(token.end_offset, 9);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new("steam", 2).to_string(), "steam@2");
    }
}
