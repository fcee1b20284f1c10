//! Result types for heuristic scoring.

use serde::{Deserialize, Serialize};

use crate::label::VibeLabel;

/// Intermediate signals behind a heuristic score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// `totalSteps - correctCount`, never negative.
    pub wrong_choices: u32,
    pub weird_hits: usize,
    pub cozy_hits: usize,
    pub self_aware_hits: usize,
    /// Weighted sum before clamping.
    pub raw: f64,
    /// Configured weird phrases found in the text, in config order.
    pub weird_hit_words: Vec<String>,
    pub cozy_hit_words: Vec<String>,
    pub self_aware_hit_words: Vec<String>,
}

/// Output of [`score`](super::score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Clamped score in `[clampMin, clampMax]`.
    pub score: f64,
    pub label: VibeLabel,
    pub breakdown: ScoreBreakdown,
}
