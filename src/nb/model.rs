//! The trained NB model artifact.
//!
//! A model is exchanged as a flat camelCase JSON record:
//!
//! ```json
//! {
//!   "version": 1,
//!   "labels": ["wholesome", "kinda odd", "totally unhinged"],
//!   "alpha": 1.0,
//!   "docCount": {"wholesome": 12, ...},
//!   "tokenCount": {"wholesome": 804, ...},
//!   "tokenFreq": {"wholesome": {"warm": 9, ...}, ...},
//!   "vocabSize": 311
//! }
//! ```
//!
//! Loading is lenient because artifacts may be hand-edited or partially
//! written: every field except `labels` falls back to a default. A record
//! without a usable `labels` list is rejected since no label set can be
//! inferred from it.

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VibeError};

/// Current artifact format version.
pub const MODEL_VERSION: u32 = 1;

/// Default additive smoothing constant.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// A trained multinomial Naive Bayes model.
///
/// Immutable once built: the trainer creates it in one pass and every
/// consumer only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ModelRecord")]
pub struct NbModel {
    version: u32,
    labels: Vec<String>,
    alpha: f64,
    doc_count: BTreeMap<String, u64>,
    token_count: BTreeMap<String, u64>,
    token_freq: BTreeMap<String, BTreeMap<String, u64>>,
    vocab_size: u64,
}

/// The on-disk shape, with every optional field made explicit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRecord {
    #[serde(default)]
    version: Option<u32>,
    labels: Vec<String>,
    #[serde(default)]
    alpha: Option<f64>,
    #[serde(default)]
    doc_count: Option<BTreeMap<String, Option<u64>>>,
    #[serde(default)]
    token_count: Option<BTreeMap<String, Option<u64>>>,
    #[serde(default)]
    token_freq: Option<BTreeMap<String, Option<BTreeMap<String, Option<u64>>>>>,
    #[serde(default)]
    vocab_size: Option<u64>,
    /// Older artifacts kept the whole vocabulary instead of its size.
    #[serde(default)]
    vocab: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TryFrom<ModelRecord> for NbModel {
    type Error = VibeError;

    fn try_from(record: ModelRecord) -> Result<Self> {
        let labels = dedup_labels(record.labels);
        if labels.is_empty() {
            return Err(VibeError::model("model record has an empty labels list"));
        }

        let alpha = match record.alpha {
            Some(alpha) if alpha.is_finite() && alpha > 0.0 => alpha,
            Some(alpha) => {
                warn!("model alpha {alpha} is not a positive number, using {DEFAULT_ALPHA}");
                DEFAULT_ALPHA
            }
            None => DEFAULT_ALPHA,
        };

        let vocab_size = record
            .vocab_size
            .or_else(|| record.vocab.as_ref().map(|vocab| vocab.len() as u64))
            .unwrap_or(0);

        let token_freq: BTreeMap<String, BTreeMap<String, u64>> = record
            .token_freq
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(label, frequencies)| {
                let frequencies: BTreeMap<String, u64> = frequencies?
                    .into_iter()
                    .filter_map(|(token, count)| count.filter(|c| *c > 0).map(|c| (token, c)))
                    .collect();
                Some((label, frequencies))
            })
            .collect();

        Ok(NbModel {
            version: record.version.unwrap_or(MODEL_VERSION),
            labels,
            alpha,
            doc_count: present_counts(record.doc_count),
            token_count: present_counts(record.token_count),
            token_freq,
            vocab_size,
        })
    }
}

/// Keep the counts that are present; a `null` count reads as absent.
fn present_counts(counts: Option<BTreeMap<String, Option<u64>>>) -> BTreeMap<String, u64> {
    counts
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(label, count)| Some((label, count?)))
        .collect()
}

/// Drop repeated labels, keeping the first occurrence of each.
fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if unique.contains(&label) {
            warn!("duplicate label {label:?} ignored");
        } else {
            unique.push(label);
        }
    }
    unique
}

impl NbModel {
    /// Assemble a model from trainer output.
    pub(crate) fn from_parts(
        labels: Vec<String>,
        alpha: f64,
        doc_count: BTreeMap<String, u64>,
        token_count: BTreeMap<String, u64>,
        token_freq: BTreeMap<String, BTreeMap<String, u64>>,
        vocab_size: u64,
    ) -> Self {
        NbModel {
            version: MODEL_VERSION,
            labels,
            alpha,
            doc_count,
            token_count,
            token_freq,
            vocab_size,
        }
    }

    /// Artifact format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Labels in tie-break order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Additive smoothing constant.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of distinct tokens seen across all labels.
    pub fn vocab_size(&self) -> u64 {
        self.vocab_size
    }

    /// Training documents seen for `label`.
    pub fn doc_count(&self, label: &str) -> u64 {
        self.doc_count.get(label).copied().unwrap_or(0)
    }

    /// Total token occurrences seen for `label`.
    pub fn token_count(&self, label: &str) -> u64 {
        self.token_count.get(label).copied().unwrap_or(0)
    }

    /// Occurrences of `token` under `label`.
    pub fn token_freq(&self, label: &str, token: &str) -> u64 {
        self.token_freq
            .get(label)
            .and_then(|frequencies| frequencies.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// All token frequencies recorded for `label`.
    pub fn token_frequencies(&self, label: &str) -> Option<&BTreeMap<String, u64>> {
        self.token_freq.get(label)
    }

    /// Training documents across all labels.
    pub fn total_docs(&self) -> u64 {
        self.labels.iter().map(|label| self.doc_count(label)).sum()
    }

    /// Smoothed `ln P(label)`, add-one over documents.
    pub fn log_prior(&self, label: &str) -> f64 {
        let total_docs = self.total_docs().max(1) as f64;
        let prior = (self.doc_count(label) as f64 + 1.0) / (total_docs + self.labels.len() as f64);
        prior.ln()
    }

    /// Smoothed `ln P(token | label)`, add-alpha over the shared vocabulary.
    ///
    /// Unseen tokens still get a positive probability.
    pub fn log_likelihood(&self, label: &str, token: &str) -> f64 {
        let denom = (self.token_count(label) as f64 + self.alpha * self.vocab_size as f64).max(1.0);
        ((self.token_freq(label, token) as f64 + self.alpha) / denom).ln()
    }

    /// Parse a model from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a model from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the model as JSON, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
