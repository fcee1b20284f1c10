//! NB inference: smoothed log-space scoring and softmax normalization.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::model::NbModel;
use crate::analysis::tokenize;

/// Output of [`predict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Winning label, always one of the model's labels.
    pub label: String,
    /// Posterior probability per label, summing to one.
    pub probs: BTreeMap<String, f64>,
}

impl Prediction {
    /// Probability assigned to `label`, or zero for unknown labels.
    pub fn probability(&self, label: &str) -> f64 {
        self.probs.get(label).copied().unwrap_or(0.0)
    }

    /// Probability of the winning label.
    pub fn confidence(&self) -> f64 {
        self.probability(&self.label)
    }
}

/// Unnormalized `ln P(label) + sum ln P(token | label)`, one entry per model
/// label in label order. Tokens are visited in document order.
pub(crate) fn log_scores(model: &NbModel, tokens: &[String]) -> Vec<f64> {
    model
        .labels()
        .iter()
        .map(|label| {
            tokens
                .iter()
                .fold(model.log_prior(label), |score, token| {
                    score + model.log_likelihood(label, token)
                })
        })
        .collect()
}

/// Index of the highest score. Ties go to the earliest index, so label
/// order decides between equal scores.
pub(crate) fn best_index(scores: &[f64]) -> usize {
    let mut best = 0;
    for (idx, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = idx;
        }
    }
    best
}

/// Index of the highest score other than `best`, with the same tie rule.
/// Falls back to `best` when there is no other entry.
pub(crate) fn runner_up_index(scores: &[f64], best: usize) -> usize {
    let mut runner_up: Option<usize> = None;
    for (idx, score) in scores.iter().enumerate() {
        if idx == best {
            continue;
        }
        match runner_up {
            Some(current) if *score <= scores[current] => {}
            _ => runner_up = Some(idx),
        }
    }
    runner_up.unwrap_or(best)
}

/// Softmax with max-subtraction for numerical stability.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        let uniform = 1.0 / scores.len().max(1) as f64;
        return vec![uniform; scores.len()];
    }

    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    let sum = if sum == 0.0 { 1.0 } else { sum };

    exps.into_iter().map(|e| e / sum).collect()
}

/// Classify already-tokenized text.
pub fn predict_tokens(tokens: &[String], model: &NbModel) -> Prediction {
    let scores = log_scores(model, tokens);
    let best = best_index(&scores);
    let probs = softmax(&scores);

    let label = model.labels()[best].clone();
    debug!(
        "nb prediction over {} tokens: {label} (log scores {scores:?})",
        tokens.len()
    );

    Prediction {
        label,
        probs: model.labels().iter().cloned().zip(probs).collect(),
    }
}

/// Classify raw text against a model.
///
/// With an empty text or an empty model the result is driven by the priors
/// alone; it is never an error.
pub fn predict(text: &str, model: &NbModel) -> Prediction {
    predict_tokens(&tokenize(text), model)
}
