//! Keyword-hit heuristic scorer.

use std::sync::Arc;

use log::debug;

use super::config::HeuristicConfig;
use super::types::{ScoreBreakdown, ScoreResult};
use crate::label::VibeLabel;

/// Collect the configured phrases that occur in `lowered_text`.
///
/// Matching is case-insensitive substring containment rather than token
/// matching, so multi-word phrases like "nooks and crannies" are found
/// without a phrase tokenizer. Empty phrases never match. The returned
/// phrases keep their configured casing.
pub fn hit_words(lowered_text: &str, phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .filter(|phrase| !phrase.is_empty())
        .filter(|phrase| lowered_text.contains(phrase.to_lowercase().as_str()))
        .cloned()
        .collect()
}

/// Clamp `value` into `[min, max]`, preferring `min` when the bounds cross.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Score a story against a heuristic config.
///
/// `correct_count` may exceed `total_steps`; wrong choices bottom out at zero.
pub fn score(text: &str, correct_count: u32, total_steps: u32, config: &HeuristicConfig) -> ScoreResult {
    let lowered = text.to_lowercase();

    let wrong_choices = total_steps.saturating_sub(correct_count);

    let weird_hit_words = hit_words(&lowered, &config.weird_words);
    let cozy_hit_words = hit_words(&lowered, &config.cozy_words);
    let self_aware_hit_words = hit_words(&lowered, &config.self_aware_words);

    let weights = &config.weights;
    let raw = weights.wrong_choice * f64::from(wrong_choices)
        + weights.weird_hit * weird_hit_words.len() as f64
        + weights.self_aware_hit * self_aware_hit_words.len() as f64
        + weights.cozy_hit * cozy_hit_words.len() as f64;

    let score = clamp(raw, config.clamp_min, config.clamp_max);
    let label = VibeLabel::from_score(score);

    debug!(
        "heuristic score: raw={raw} clamped={score} label={label} (wrong={wrong_choices}, weird={}, cozy={}, self_aware={})",
        weird_hit_words.len(),
        cozy_hit_words.len(),
        self_aware_hit_words.len()
    );

    ScoreResult {
        score,
        label,
        breakdown: ScoreBreakdown {
            wrong_choices,
            weird_hits: weird_hit_words.len(),
            cozy_hits: cozy_hit_words.len(),
            self_aware_hits: self_aware_hit_words.len(),
            raw,
            weird_hit_words,
            cozy_hit_words,
            self_aware_hit_words,
        },
    }
}

/// A heuristic scorer bound to one config.
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    config: Arc<HeuristicConfig>,
}

impl HeuristicScorer {
    /// Create a scorer for the given config.
    pub fn new(config: HeuristicConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Get the config.
    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Score a story.
    pub fn score(&self, text: &str, correct_count: u32, total_steps: u32) -> ScoreResult {
        score(text, correct_count, total_steps, &self.config)
    }
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(HeuristicConfig::default())
    }
}
