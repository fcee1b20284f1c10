//! Error types for vibescore.
//!
//! Scoring, prediction and explanation never fail on ordinary input, so
//! errors only surface at the I/O boundary: reading corpora, loading or
//! saving model artifacts and heuristic configs, and building a trainer
//! from an unusable label set.
//!
//! # Examples
//!
//! ```
//! use vibescore::error::{Result, VibeError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VibeError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for vibescore operations.
#[derive(Error, Debug)]
pub enum VibeError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Structurally invalid model artifacts
    #[error("Model error: {0}")]
    Model(String),

    /// Training corpus errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with VibeError.
pub type Result<T> = std::result::Result<T, VibeError>;

impl VibeError {
    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        VibeError::Model(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        VibeError::Corpus(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VibeError::InvalidArgument(msg.into())
    }
}
