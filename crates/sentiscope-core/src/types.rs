//! Core types for Sentiscope

use crate::error::{Error, ErrorBody, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One label/score pair produced by a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Classifier output after label remapping and top-label selection
///
/// `label` and `score` always belong to the first maximum of `all_scores`.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Canonical top label
    pub label: String,

    /// Score of the top label
    pub score: f32,

    /// Full distribution in classifier output order
    pub all_scores: Vec<LabelScore>,
}

impl Classification {
    /// Build from a remapped distribution, picking the first highest score.
    ///
    /// Returns `None` for an empty distribution.
    pub fn from_scores(all_scores: Vec<LabelScore>) -> Option<Self> {
        let top = top_score(&all_scores)?.clone();
        Some(Self {
            label: top.label,
            score: top.score,
            all_scores,
        })
    }
}

/// First entry with the highest score; later ties never replace it.
pub fn top_score(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores.iter().fold(None, |best: Option<&LabelScore>, item| match best {
        Some(b) if b.score >= item.score => Some(b),
        _ => Some(item),
    })
}

/// Kind of analysis, also used as the batch mode and history entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Sentiment,
    Emotion,
    Aspect,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Emotion => "emotion",
            Self::Aspect => "aspect",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sentiment" => Ok(Self::Sentiment),
            "emotion" => Ok(Self::Emotion),
            "aspect" => Ok(Self::Aspect),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Response for sentiment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub label: String,
    pub confidence: f32,
    pub all_scores: BTreeMap<String, f32>,
    pub timestamp: DateTime<Utc>,
}

/// Response for emotion detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionReport {
    pub primary_emotion: String,
    pub confidence: f32,
    pub all_emotions: BTreeMap<String, f32>,
    pub timestamp: DateTime<Utc>,
}

/// Sentiment attached to one aspect keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSentiment {
    pub aspect: String,
    pub sentiment: String,
    pub confidence: f32,
    /// Presentation color keyed by the sentiment label
    pub color: String,
}

/// Response for aspect-based analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectReport {
    pub aspects: Vec<AspectSentiment>,
    pub aspect_count: usize,
    pub dominant_sentiment: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of any single analysis, or the error that replaced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Sentiment(SentimentReport),
    Emotion(EmotionReport),
    Aspect(AspectReport),
    Failed(ErrorBody),
}

impl AnalysisOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl<T: Into<AnalysisOutcome>> From<Result<T>> for AnalysisOutcome {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(report) => report.into(),
            Err(err) => Self::Failed(ErrorBody::from(&err)),
        }
    }
}

impl From<SentimentReport> for AnalysisOutcome {
    fn from(report: SentimentReport) -> Self {
        Self::Sentiment(report)
    }
}

impl From<EmotionReport> for AnalysisOutcome {
    fn from(report: EmotionReport) -> Self {
        Self::Emotion(report)
    }
}

impl From<AspectReport> for AnalysisOutcome {
    fn from(report: AspectReport) -> Self {
        Self::Aspect(report)
    }
}

impl From<ErrorBody> for AnalysisOutcome {
    fn from(body: ErrorBody) -> Self {
        Self::Failed(body)
    }
}

/// Response for batch analysis
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<AnalysisOutcome>,
    pub count: usize,
    /// The mode exactly as requested, even when it was not recognized
    pub mode: String,
}
