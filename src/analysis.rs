//! Text analysis for vibe classification.
//!
//! Raw story text flows through a small pipeline before any counting happens:
//!
//! ```text
//! Raw Text → LowercaseWordTokenizer → MinLengthFilter → SpellingFilter → tokens
//! ```
//!
//! The NB trainer, predictor and explainer all share this pipeline through
//! [`analyzer::tokenize`], so training-time and inference-time tokens always
//! agree.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, VibeAnalyzer, tokenize};
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
