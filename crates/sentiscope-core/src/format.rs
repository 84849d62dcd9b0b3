//! Response formatting: rounding, lower-casing and timestamps

use crate::types::{
    top_score, AspectReport, AspectSentiment, Classification, EmotionReport, LabelScore,
    SentimentReport,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// Label used whenever a sentiment is missing or could not be computed
pub const NEUTRAL: &str = "neutral";

const POSITIVE_COLOR: &str = "#10b981";
const NEGATIVE_COLOR: &str = "#ef4444";
const NEUTRAL_COLOR: &str = "#6b7280";

/// Round a score to 4 decimal places
pub fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

/// Shape a sentiment classification into the public report
pub fn format_sentiment(classification: &Classification) -> SentimentReport {
    SentimentReport {
        label: classification.label.to_lowercase(),
        confidence: round4(classification.score),
        all_scores: rounded_map(&classification.all_scores, true),
        timestamp: Utc::now(),
    }
}

/// Shape an emotion distribution into the public report.
///
/// The primary emotion is the first highest score in classifier order.
pub fn format_emotion(emotions: &[LabelScore]) -> EmotionReport {
    let (primary_emotion, confidence) = top_score(emotions)
        .map(|top| (top.label.clone(), round4(top.score)))
        .unwrap_or_else(|| (NEUTRAL.to_string(), 0.0));

    EmotionReport {
        primary_emotion,
        confidence,
        all_emotions: rounded_map(emotions, false),
        timestamp: Utc::now(),
    }
}

/// Wrap per-aspect sentiments with a count and timestamp
pub fn format_aspects(aspects: Vec<AspectSentiment>) -> AspectReport {
    let dominant_sentiment =
        dominant_sentiment(aspects.iter().map(|a| a.sentiment.as_str())).to_string();

    AspectReport {
        aspect_count: aspects.len(),
        aspects,
        dominant_sentiment,
        timestamp: Utc::now(),
    }
}

/// Presentation color for a sentiment label, grey for anything unknown
pub fn sentiment_color(label: &str) -> &'static str {
    match label.to_lowercase().as_str() {
        "positive" => POSITIVE_COLOR,
        "negative" => NEGATIVE_COLOR,
        _ => NEUTRAL_COLOR,
    }
}

/// Majority vote over sentiment labels.
///
/// Ties resolve positive, then negative, then neutral; unknown labels are
/// ignored and an empty input is neutral.
pub fn dominant_sentiment<'a>(labels: impl IntoIterator<Item = &'a str>) -> &'static str {
    let mut counts = [("positive", 0usize), ("negative", 0), (NEUTRAL, 0)];
    for label in labels {
        if let Some(slot) = counts.iter_mut().find(|(name, _)| *name == label) {
            slot.1 += 1;
        }
    }

    counts
        .iter()
        .fold(counts[0], |best, item| if item.1 > best.1 { *item } else { best })
        .0
}

fn rounded_map(scores: &[LabelScore], lowercase: bool) -> BTreeMap<String, f32> {
    scores
        .iter()
        .map(|s| {
            let key = if lowercase {
                s.label.to_lowercase()
            } else {
                s.label.clone()
            };
            (key, round4(s.score))
        })
        .collect()
}
