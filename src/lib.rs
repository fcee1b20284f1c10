//! # vibescore
//!
//! Scores how "unhinged" an interactive children's story turned out.
//!
//! Two independent classifiers share one tokenizer:
//!
//! - a lexical heuristic that counts configured weird, cozy and
//!   self-aware phrases plus wrong choices, clamps the weighted sum and
//!   buckets it into a [`VibeLabel`]
//! - a multinomial Naive Bayes classifier trained from labeled CSV
//!   corpora, with per-token explanations of each prediction
//!
//! ## Example
//!
//! ```
//! use vibescore::prelude::*;
//!
//! let model = NbTrainer::new().train(&[
//!     LabeledDocument::new("a warm cozy mitten", "wholesome"),
//!     LabeledDocument::new("the mitten screamed and ate the moon", "totally unhinged"),
//! ]);
//!
//! let prediction = predict("so cozy and warm", &model);
//! assert_eq!(prediction.label, "wholesome");
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod heuristic;
pub mod label;
pub mod nb;
pub mod report;
pub mod util;

pub mod prelude {
    pub use crate::analysis::tokenize;
    pub use crate::error::{Result, VibeError};
    pub use crate::heuristic::{HeuristicConfig, HeuristicScorer, HeuristicWeights, ScoreResult, score};
    pub use crate::label::VibeLabel;
    pub use crate::nb::{
        CorpusReader, LabeledDocument, NbModel, NbTrainer, Prediction, TokenContribution, explain,
        predict, train,
    };
    pub use crate::report::{AnnotatedRun, RunAnnotator, RunInput};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
