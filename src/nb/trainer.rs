//! NB model training.

use std::collections::BTreeMap;

use ahash::AHashSet;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::model::{DEFAULT_ALPHA, NbModel};
use crate::analysis::tokenize;
use crate::error::{Result, VibeError};
use crate::label::VibeLabel;

/// A training document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDocument {
    /// Free text body.
    pub text: String,
    /// Label name; documents with labels outside the trainer's set are ignored.
    pub label: String,
}

impl LabeledDocument {
    /// Create a new labeled document.
    pub fn new<T: Into<String>, L: Into<String>>(text: T, label: L) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Builds an [`NbModel`] from a labeled corpus in a single pass.
///
/// The label set and smoothing constant are fixed inputs, not derived from
/// the data. Defaults are the three vibe labels and `alpha = 1`.
#[derive(Debug, Clone)]
pub struct NbTrainer {
    labels: Vec<String>,
    alpha: f64,
}

impl Default for NbTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl NbTrainer {
    /// Create a trainer with the default labels and alpha.
    pub fn new() -> Self {
        Self {
            labels: VibeLabel::names(),
            alpha: DEFAULT_ALPHA,
        }
    }

    /// Use a custom label set. Order is kept (it is the tie-break order at
    /// prediction time) and duplicates are dropped.
    pub fn with_labels<I, S>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        if unique.is_empty() {
            return Err(VibeError::invalid_argument("label set must not be empty"));
        }

        self.labels = unique;
        Ok(self)
    }

    /// Use a custom smoothing constant. Must be positive and finite.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(VibeError::invalid_argument(format!(
                "alpha must be a positive number, got {alpha}"
            )));
        }
        self.alpha = alpha;
        Ok(self)
    }

    /// The configured labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The configured smoothing constant.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Train a model over the whole corpus.
    pub fn train(&self, documents: &[LabeledDocument]) -> NbModel {
        let mut doc_count: BTreeMap<String, u64> =
            self.labels.iter().map(|l| (l.clone(), 0)).collect();
        let mut token_count: BTreeMap<String, u64> =
            self.labels.iter().map(|l| (l.clone(), 0)).collect();
        let mut token_freq: BTreeMap<String, BTreeMap<String, u64>> = self
            .labels
            .iter()
            .map(|l| (l.clone(), BTreeMap::new()))
            .collect();

        // Only its cardinality survives into the model.
        let mut vocabulary: AHashSet<String> = AHashSet::new();
        let mut skipped = 0usize;

        for document in documents {
            let Some(frequencies) = token_freq.get_mut(&document.label) else {
                skipped += 1;
                continue;
            };

            *doc_count.entry(document.label.clone()).or_insert(0) += 1;

            let tokens = tokenize(&document.text);
            *token_count.entry(document.label.clone()).or_insert(0) += tokens.len() as u64;

            for token in tokens {
                if !vocabulary.contains(&token) {
                    vocabulary.insert(token.clone());
                }
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        if skipped > 0 {
            debug!("ignored {skipped} documents with labels outside {:?}", self.labels);
        }

        let vocab_size = vocabulary.len() as u64;
        info!(
            "trained on {} of {} documents, vocabulary size {vocab_size}",
            documents.len() - skipped,
            documents.len()
        );

        NbModel::from_parts(
            self.labels.clone(),
            self.alpha,
            doc_count,
            token_count,
            token_freq,
            vocab_size,
        )
    }
}

/// Train a model with the default labels and alpha.
pub fn train(documents: &[LabeledDocument]) -> NbModel {
    NbTrainer::new().train(documents)
}
