//! Hand-authored heuristic configuration.
//!
//! Configs are written as camelCase JSON, usually alongside story content.
//! Every field is optional: missing word lists behave as empty, missing
//! weights fall back to their defaults, and `null` entries inside a word
//! list are skipped.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Key under which story files embed their heuristic config.
const STORY_CONFIG_KEY: &str = "unhingedModel";

/// Weights applied to each signal in the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WeightsRecord")]
pub struct HeuristicWeights {
    /// Weight per wrong choice.
    pub wrong_choice: f64,
    /// Weight per weird phrase found.
    pub weird_hit: f64,
    /// Weight per self-aware phrase found.
    pub self_aware_hit: f64,
    /// Weight per cozy phrase found (usually negative).
    pub cozy_hit: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            wrong_choice: 2.0,
            weird_hit: 2.0,
            self_aware_hit: 1.0,
            cozy_hit: -1.0,
        }
    }
}

/// Authored weights; a missing or `null` weight takes its default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WeightsRecord {
    wrong_choice: Option<f64>,
    weird_hit: Option<f64>,
    self_aware_hit: Option<f64>,
    cozy_hit: Option<f64>,
}

impl From<WeightsRecord> for HeuristicWeights {
    fn from(record: WeightsRecord) -> Self {
        let defaults = HeuristicWeights::default();
        HeuristicWeights {
            wrong_choice: record.wrong_choice.unwrap_or(defaults.wrong_choice),
            weird_hit: record.weird_hit.unwrap_or(defaults.weird_hit),
            self_aware_hit: record.self_aware_hit.unwrap_or(defaults.self_aware_hit),
            cozy_hit: record.cozy_hit.unwrap_or(defaults.cozy_hit),
        }
    }
}

/// Keyword lists, weights and clamp bounds for the heuristic scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ConfigRecord")]
pub struct HeuristicConfig {
    /// Phrases that make a story weirder.
    pub weird_words: Vec<String>,

    /// Phrases that make a story cozier.
    pub cozy_words: Vec<String>,

    /// Phrases where the narrator notices how odd things are.
    pub self_aware_words: Vec<String>,

    /// Signal weights.
    pub weights: HeuristicWeights,

    /// Lower bound of the final score.
    pub clamp_min: f64,

    /// Upper bound of the final score.
    pub clamp_max: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            weird_words: Vec::new(),
            cozy_words: Vec::new(),
            self_aware_words: Vec::new(),
            weights: HeuristicWeights::default(),
            clamp_min: 0.0,
            clamp_max: 10.0,
        }
    }
}

/// The authored shape, where any field may be missing or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigRecord {
    #[serde(deserialize_with = "phrase_list")]
    weird_words: Vec<String>,
    #[serde(deserialize_with = "phrase_list")]
    cozy_words: Vec<String>,
    #[serde(deserialize_with = "phrase_list")]
    self_aware_words: Vec<String>,
    weights: Option<HeuristicWeights>,
    clamp_min: Option<f64>,
    clamp_max: Option<f64>,
}

impl From<ConfigRecord> for HeuristicConfig {
    fn from(record: ConfigRecord) -> Self {
        let defaults = HeuristicConfig::default();
        HeuristicConfig {
            weird_words: record.weird_words,
            cozy_words: record.cozy_words,
            self_aware_words: record.self_aware_words,
            weights: record.weights.unwrap_or_default(),
            clamp_min: record.clamp_min.unwrap_or(defaults.clamp_min),
            clamp_max: record.clamp_max.unwrap_or(defaults.clamp_max),
        }
    }
}

impl HeuristicConfig {
    /// Parse a config from JSON.
    ///
    /// Accepts either a bare config object or a story object that carries
    /// the config under `unhingedModel`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;

        if let Some(inner) = value
            .as_object_mut()
            .and_then(|obj| obj.remove(STORY_CONFIG_KEY))
        {
            value = inner;
        }

        if value.is_null() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Load a config from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Set the weird phrases.
    pub fn with_weird_words<S: Into<String>>(mut self, words: Vec<S>) -> Self {
        self.weird_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the cozy phrases.
    pub fn with_cozy_words<S: Into<String>>(mut self, words: Vec<S>) -> Self {
        self.cozy_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the self-aware phrases.
    pub fn with_self_aware_words<S: Into<String>>(mut self, words: Vec<S>) -> Self {
        self.self_aware_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the signal weights.
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the clamp bounds.
    pub fn with_clamp(mut self, min: f64, max: f64) -> Self {
        self.clamp_min = min;
        self.clamp_max = max;
        self
    }
}

/// Phrase lists tolerate `null` (skipped) and scalar entries, which are
/// matched by their text form.
fn phrase_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let phrases: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(phrases
        .unwrap_or_default()
        .into_iter()
        .filter_map(|phrase| match phrase {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect())
}
