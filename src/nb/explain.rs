//! Token-level attribution for NB predictions.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::model::NbModel;
use super::predictor::{best_index, log_scores, runner_up_index};
use crate::analysis::tokenize;
use crate::util::round_to;

/// How much one distinct token pushed the prediction toward the winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenContribution {
    pub token: String,
    /// Summed `ln P(token | best) - ln P(token | runner-up)` over every
    /// occurrence, rounded to 3 decimals.
    pub contrib: f64,
}

/// Rank the distinct tokens of already-tokenized text.
pub fn explain_tokens(tokens: &[String], model: &NbModel, k: usize) -> Vec<TokenContribution> {
    let scores = log_scores(model, tokens);
    let best = best_index(&scores);
    let runner_up = runner_up_index(&scores, best);

    let best_label = &model.labels()[best];
    let runner_up_label = &model.labels()[runner_up];

    // First-occurrence order, so equal contributions keep document order.
    let mut order: Vec<(&str, f64)> = Vec::new();
    let mut index: AHashMap<&str, usize> = AHashMap::new();

    for token in tokens {
        let diff = model.log_likelihood(best_label, token)
            - model.log_likelihood(runner_up_label, token);

        match index.get(token.as_str()) {
            Some(&idx) => order[idx].1 += diff,
            None => {
                index.insert(token.as_str(), order.len());
                order.push((token.as_str(), diff));
            }
        }
    }

    order.sort_by(|a, b| b.1.total_cmp(&a.1));
    order.truncate(k);

    order
        .into_iter()
        .map(|(token, contrib)| TokenContribution {
            token: token.to_string(),
            contrib: round_to(contrib, 3),
        })
        .collect()
}

/// Return up to `k` tokens of `text` that most favor the predicted label
/// over its closest competitor, strongest first.
///
/// With a single-label model the runner-up is the winner itself, so every
/// contribution is zero.
pub fn explain(text: &str, model: &NbModel, k: usize) -> Vec<TokenContribution> {
    explain_tokens(&tokenize(text), model, k)
}
