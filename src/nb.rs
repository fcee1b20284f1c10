//! Multinomial Naive Bayes vibe classification.
//!
//! The pipeline is strictly one-way:
//!
//! ```text
//! CSV corpora → CorpusReader → NbTrainer → NbModel (JSON) → predict / explain
//! ```
//!
//! - [`NbTrainer`] builds an immutable [`NbModel`] from labeled documents in
//!   one pass. Retraining always produces a brand-new model.
//! - [`predict`] computes smoothed log-space scores and softmax probabilities.
//! - [`explain`] ranks tokens by how much they favor the winning label over
//!   the runner-up.
//!
//! Every inference call takes the model explicitly. The model is never
//! mutated after training, so one instance can be shared by reference across
//! threads.
//!
//! # Example
//!
//! ```
//! use vibescore::nb::{self, LabeledDocument, NbTrainer};
//!
//! let docs = vec![
//!     LabeledDocument::new("warm steam and soft mittens", "wholesome"),
//!     LabeledDocument::new("the mitten cracked with a wet crunch", "totally unhinged"),
//! ];
//! let model = NbTrainer::new().train(&docs);
//!
//! let prediction = nb::predict("soft warm mittens", &model);
//! assert_eq!(prediction.label, "wholesome");
//!
//! let top = nb::explain("soft warm mittens", &model, 2);
//! assert!(top.len() <= 2);
//! ```

mod corpus;
mod explain;
mod model;
mod predictor;
mod trainer;

// Public exports
pub use corpus::{CorpusReader, DEFAULT_LABEL_COLUMN, DEFAULT_TEXT_COLUMN};
pub use explain::{TokenContribution, explain, explain_tokens};
pub use model::{DEFAULT_ALPHA, MODEL_VERSION, NbModel};
pub use predictor::{Prediction, predict, predict_tokens};
pub use trainer::{LabeledDocument, NbTrainer, train};
