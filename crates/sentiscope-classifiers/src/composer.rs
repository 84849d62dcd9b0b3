//! Aspect-based sentiment composition
//!
//! The whole text is classified once as a baseline. Each extracted aspect
//! is then classified on the sentences that mention it, or inherits the
//! baseline when no sentence does. A failed classification degrades only
//! the aspect it belongs to.

use crate::adapter::ClassificationAdapter;
use crate::aspects::AspectVocabulary;
use sentiscope_core::format::{round4, sentiment_color, NEUTRAL};
use sentiscope_core::text::{normalize, validate};
use sentiscope_core::{AspectSentiment, Classification, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Separator used to re-join the sentences that mention an aspect
const SENTENCE_JOIN: &str = ". ";

pub struct AspectComposer {
    sentiment: Arc<ClassificationAdapter>,
    vocabulary: AspectVocabulary,
    max_text_length: usize,
}

impl AspectComposer {
    pub fn new(
        sentiment: Arc<ClassificationAdapter>,
        vocabulary: AspectVocabulary,
        max_text_length: usize,
    ) -> Self {
        Self {
            sentiment,
            vocabulary,
            max_text_length,
        }
    }

    pub fn vocabulary(&self) -> &AspectVocabulary {
        &self.vocabulary
    }

    /// One sentiment per extracted aspect, in extraction order.
    ///
    /// Only validation failures are returned as errors.
    pub async fn compose(&self, text: &str) -> Result<Vec<AspectSentiment>> {
        validate(text, self.max_text_length)?;

        let baseline = match self.sentiment.classify(&normalize(text)).await {
            Ok(classification) => Some(classification),
            Err(e) => {
                warn!(error = %e, "overall sentiment unavailable, fallback aspects degrade to neutral");
                None
            }
        };

        let aspects = self.vocabulary.extract(text);
        let sentences: Vec<&str> = text.split('.').collect();
        let mut results = Vec::with_capacity(aspects.len());

        for aspect in aspects {
            let evidence = mentioning(&sentences, &aspect);
            let excerpt = normalize(&evidence.join(SENTENCE_JOIN));

            let classification = if excerpt.is_empty() {
                debug!(aspect = %aspect, "no sentence mentions aspect, using overall sentiment");
                baseline.clone()
            } else {
                debug!(aspect = %aspect, sentences = evidence.len(), "classifying aspect excerpt");
                match self.sentiment.classify(&excerpt).await {
                    Ok(classification) => Some(classification),
                    Err(e) => {
                        warn!(aspect = %aspect, error = %e, "aspect classification failed, reporting neutral");
                        None
                    }
                }
            };

            results.push(aspect_sentiment(aspect, classification.as_ref()));
        }

        Ok(results)
    }
}

/// Sentence candidates whose lower-cased form contains `aspect`
fn mentioning<'a>(sentences: &[&'a str], aspect: &str) -> Vec<&'a str> {
    sentences
        .iter()
        .copied()
        .filter(|sentence| sentence.to_lowercase().contains(aspect))
        .collect()
}

fn aspect_sentiment(aspect: String, classification: Option<&Classification>) -> AspectSentiment {
    let (sentiment, confidence) = match classification {
        Some(c) => (c.label.to_lowercase(), round4(c.score)),
        None => (NEUTRAL.to_string(), 0.0),
    };

    AspectSentiment {
        color: sentiment_color(&sentiment).to_string(),
        aspect,
        sentiment,
        confidence,
    }
}
