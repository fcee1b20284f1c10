//! Lexical heuristic vibe scoring.
//!
//! A deterministic, hand-authored scorer: it counts configured keyword
//! phrases found in a story, mixes in how many choices the player got wrong,
//! and clamps the weighted sum into a small range that is bucketed into a
//! [`VibeLabel`](crate::label::VibeLabel). It never looks at a trained model.
//!
//! # Example
//!
//! ```
//! use vibescore::heuristic::{self, HeuristicConfig};
//! use vibescore::label::VibeLabel;
//!
//! let config = HeuristicConfig::default()
//!     .with_weird_words(vec!["weird"])
//!     .with_cozy_words(vec!["cozy"]);
//!
//! let result = heuristic::score("this is weird and cozy", 2, 3, &config);
//! assert_eq!(result.breakdown.raw, 3.0);
//! assert_eq!(result.label, VibeLabel::Wholesome);
//! ```

mod config;
mod scorer;
mod types;

// Public exports
pub use config::{HeuristicConfig, HeuristicWeights};
pub use scorer::{HeuristicScorer, hit_words, score};
pub use types::{ScoreBreakdown, ScoreResult};
