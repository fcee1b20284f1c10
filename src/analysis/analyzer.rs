//! Analyzers combining a tokenizer with a chain of filters.
//!
//! [`VibeAnalyzer`] is the pipeline every classifier in this crate uses. The
//! free function [`tokenize`] runs the default pipeline and returns plain
//! token strings.

use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, MinLengthFilter, SpellingFilter};
use crate::analysis::tokenizer::{LowercaseWordTokenizer, Tokenizer};

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> TokenStream;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer followed by filters applied in the order they were added.
///
/// # Examples
///
/// ```
/// use vibescore::analysis::analyzer::{Analyzer, VibeAnalyzer};
///
/// let analyzer = VibeAnalyzer::new();
/// let tokens: Vec<_> = analyzer.analyze("A favorite, COZY color!").map(|t| t.text).collect();
/// assert_eq!(tokens, vec!["favourite", "cozy", "colour"]);
/// ```
#[derive(Clone)]
pub struct VibeAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl VibeAnalyzer {
    /// Create the default pipeline: lowercase word tokenizer, drop tokens
    /// shorter than two characters, then normalize spelling variants.
    pub fn new() -> Self {
        VibeAnalyzer::with_tokenizer(Arc::new(LowercaseWordTokenizer::new()))
            .add_filter(Arc::new(MinLengthFilter::new()))
            .add_filter(Arc::new(SpellingFilter::new()))
    }

    /// Create an analyzer with the given tokenizer and no filters.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        VibeAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the end of the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Analyze text and collect the token strings.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).map(|token| token.text).collect()
    }
}

impl Default for VibeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for VibeAnalyzer {
    fn analyze(&self, text: &str) -> TokenStream {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    fn name(&self) -> &'static str {
        "vibe"
    }
}

impl std::fmt::Debug for VibeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VibeAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

static DEFAULT_ANALYZER: LazyLock<VibeAnalyzer> = LazyLock::new(VibeAnalyzer::new);

/// Normalize raw text into an ordered sequence of tokens.
///
/// Pure and total: lowercases, keeps runs of `[a-z0-9']`, drops tokens
/// shorter than two characters and canonicalizes spelling variants.
/// Duplicates and input order are preserved.
///
/// ```
/// use vibescore::analysis::tokenize;
///
/// assert!(tokenize("").is_empty());
/// assert_eq!(tokenize("Cozy, Cozy!"), vec!["cozy", "cozy"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT_ANALYZER.terms(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("Cozy, Cozy!"), vec!["cozy", "cozy"]);
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert_eq!(tokenize("I ate a mitten"), vec!["ate", "mitten"]);
        assert_eq!(tokenize("x y z"), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_keeps_apostrophes_and_digits() {
        assert_eq!(tokenize("Don't eat 42 mittens"), vec!["don't", "eat", "42", "mittens"]);
    }

    #[test]
    fn test_tokenize_normalizes_after_length_filter() {
        assert_eq!(
            tokenize("My NEIGHBOR's favorite color"),
            vec!["my", "neighbor's", "favourite", "colour"]
        );
        assert_eq!(tokenize("the neighbors"), vec!["the", "neighbours"]);
    }

    #[test]
    fn test_pipeline_without_filters() {
        let analyzer = VibeAnalyzer::with_tokenizer(Arc::new(LowercaseWordTokenizer::new()));
        assert_eq!(analyzer.terms("a Color"), vec!["a", "color"]);
        assert!(analyzer.filters().is_empty());
        assert_eq!(analyzer.name(), "vibe");
    }
}
