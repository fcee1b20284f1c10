//! Spelling normalization filter.
//!
//! Folds regional spelling variants onto one canonical form so that
//! "color" and "colour" count as the same feature. The built-in table maps
//! American spellings onto Canadian ones; tokens not in the table pass
//! through unchanged.
//!
//! # Examples
//!
//! ```
//! use vibescore::analysis::token::Token;
//! use vibescore::analysis::token_filter::{Filter, SpellingFilter};
//!
//! let filter = SpellingFilter::new();
//! let tokens = vec![Token::new("favorite", 0), Token::new("mitten", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result[0].text, "favourite");
//! assert_eq!(result[1].text, "mitten");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// American to Canadian spelling pairs.
const DEFAULT_SPELLING_VARIANTS: &[(&str, &str)] = &[
    ("color", "colour"),
    ("favorite", "favourite"),
    ("center", "centre"),
    ("neighbor", "neighbour"),
    ("neighbors", "neighbours"),
    ("meter", "metre"),
];

static DEFAULT_SPELLING_TABLE: LazyLock<Arc<HashMap<String, String>>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_SPELLING_VARIANTS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect(),
    )
});

/// A filter that rewrites tokens through a fixed spelling table.
#[derive(Clone, Debug)]
pub struct SpellingFilter {
    table: Arc<HashMap<String, String>>,
}

impl SpellingFilter {
    /// Create a filter using the built-in spelling table.
    pub fn new() -> Self {
        SpellingFilter {
            table: Arc::clone(&DEFAULT_SPELLING_TABLE),
        }
    }

    /// Create a filter from custom `(variant, canonical)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        SpellingFilter {
            table: Arc::new(
                pairs
                    .into_iter()
                    .map(|(from, to)| (from.into(), to.into()))
                    .collect(),
            ),
        }
    }

    /// Look up the canonical spelling of a single token.
    pub fn normalize<'a>(&'a self, token: &'a str) -> &'a str {
        self.table.get(token).map(String::as_str).unwrap_or(token)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for SpellingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for SpellingFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let table = Arc::clone(&self.table);
        Box::new(tokens.map(move |token| match table.get(&token.text) {
            Some(canonical) => token.with_text(canonical.clone()),
            None => token,
        }))
    }

    fn name(&self) -> &'static str {
        "spelling"
    }
}
