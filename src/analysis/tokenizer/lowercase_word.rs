//! Lowercasing word tokenizer.

use std::sync::LazyLock;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};

/// Maximal runs of lowercase ASCII letters, digits and apostrophes.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9']+").expect("word pattern is a valid regex")
});

/// A tokenizer that lowercases its input and keeps runs of `[a-z0-9']`.
///
/// Every other character (punctuation, whitespace, non-ASCII letters) acts
/// as a separator. Duplicates are kept and tokens come out in input order,
/// since downstream frequency math depends on multiplicity.
///
/// # Examples
///
/// ```
/// use vibescore::analysis::tokenizer::{LowercaseWordTokenizer, Tokenizer};
///
/// let tokenizer = LowercaseWordTokenizer::new();
/// let tokens: Vec<_> = tokenizer.tokenize("Don't PANIC, cozy!").map(|t| t.text).collect();
/// assert_eq!(tokens, vec!["don't", "panic", "cozy"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LowercaseWordTokenizer;

impl LowercaseWordTokenizer {
    /// Create a new lowercasing word tokenizer.
    pub fn new() -> Self {
        LowercaseWordTokenizer
    }
}

impl Tokenizer for LowercaseWordTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let lower = text.to_lowercase();

        let tokens: Vec<Token> = WORD_PATTERN
            .find_iter(&lower)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "lowercase_word"
    }
}
