//! Mood classification.
//!
//! Turns free text into a [`MoodAssessment`]. The [`MoodClassifier`] tries a
//! remote language model first and falls back to a local keyword heuristic
//! whenever the remote strategy fails, so classification never errors.

pub mod classifier;
pub mod fallback;
pub mod lexicon;
pub mod remote;

pub use classifier::{ClassifierStrategy, MoodClassifier};
pub use fallback::KeywordStrategy;
pub use lexicon::{MoodLexicon, TIE_BREAK_ORDER};
pub use remote::{RemoteConfig, RemoteStrategy};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Inferred emotional state of the user.
///
/// The set is closed: nothing outside these five values can appear in a
/// [`MoodAssessment`] or reach the reorganization engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mood {
    Happy,
    Tired,
    Stressed,
    Focused,
    Energetic,
}

impl Mood {
    /// All moods in declaration order.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Tired,
        Mood::Stressed,
        Mood::Focused,
        Mood::Energetic,
    ];

    /// Canonical label, as used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Tired => "Tired",
            Mood::Stressed => "Stressed",
            Mood::Focused => "Focused",
            Mood::Energetic => "Energetic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Parses a mood label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownMood(trimmed.to_string()))
    }
}

/// Which strategy produced an assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentSource {
    /// Remote language model
    Remote,
    /// Local keyword heuristic
    Fallback,
}

impl AssessmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentSource::Remote => "remote",
            AssessmentSource::Fallback => "fallback",
        }
    }
}

impl FromStr for AssessmentSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(AssessmentSource::Remote),
            "fallback" => Ok(AssessmentSource::Fallback),
            other => Err(ValidationError::InvalidValue {
                field: "source".to_string(),
                message: format!("unknown assessment source '{other}'"),
            }),
        }
    }
}

/// Result of classifying a piece of text.
///
/// `confidence` is always within [0.0, 1.0]. For the keyword fallback it is
/// a match-density heuristic, not a calibrated probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodAssessment {
    pub mood: Mood,
    pub confidence: f64,
    pub explanation: String,
    pub source: AssessmentSource,
}
