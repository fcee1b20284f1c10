//! The three vibe labels shared by the heuristic scorer and the NB classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VibeError;

/// Score at or above which a story is "totally unhinged".
pub const UNHINGED_THRESHOLD: f64 = 7.0;

/// Score at or above which a story is "kinda odd".
pub const ODD_THRESHOLD: f64 = 4.0;

/// Vibe classification of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VibeLabel {
    /// Nothing strange happened.
    #[serde(rename = "wholesome")]
    Wholesome,
    /// Something was off.
    #[serde(rename = "kinda odd")]
    KindaOdd,
    /// Fully off the rails.
    #[serde(rename = "totally unhinged")]
    TotallyUnhinged,
}

impl VibeLabel {
    /// All labels in their canonical order.
    pub const ALL: [VibeLabel; 3] = [
        VibeLabel::Wholesome,
        VibeLabel::KindaOdd,
        VibeLabel::TotallyUnhinged,
    ];

    /// The wire name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            VibeLabel::Wholesome => "wholesome",
            VibeLabel::KindaOdd => "kinda odd",
            VibeLabel::TotallyUnhinged => "totally unhinged",
        }
    }

    /// Bucket a clamped heuristic score. Thresholds are checked from the top.
    pub fn from_score(score: f64) -> Self {
        if score >= UNHINGED_THRESHOLD {
            VibeLabel::TotallyUnhinged
        } else if score >= ODD_THRESHOLD {
            VibeLabel::KindaOdd
        } else {
            VibeLabel::Wholesome
        }
    }

    /// Wire names of all labels, in canonical order.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|l| l.as_str().to_string()).collect()
    }
}

impl fmt::Display for VibeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VibeLabel {
    type Err = VibeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VibeLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| VibeError::invalid_argument(format!("unknown vibe label: {s:?}")))
    }
}
