//! Lexicon-based classifiers
//!
//! Keyword classifiers used when no pre-trained model is configured (the
//! `lexicon` backend) and as a deterministic stand-in during development.
//! Each label has a word list; a baseline label receives a fixed prior so
//! text without any hits resolves to it.

use crate::classifier::Classifier;
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use sentiscope_core::{Error, LabelScore, Result};

/// Prior weight of the baseline label; one keyword hit outweighs it
const BASELINE_WEIGHT: f32 = 0.5;

struct LexiconLabel {
    label: String,
    matcher: Option<AhoCorasick>,
}

pub struct LexiconClassifier {
    name: String,
    labels: Vec<LexiconLabel>,
}

impl LexiconClassifier {
    /// Three-way sentiment lexicon with a neutral baseline
    pub fn sentiment() -> Result<Self> {
        let positive = [
            "good", "great", "excellent", "love", "amazing", "wonderful", "happy", "fantastic",
            "awesome", "best", "delicious", "friendly", "perfect", "recommend", "pleasant",
            "impressive", "fast", "helpful", "beautiful", "enjoy",
        ];
        let negative = [
            "bad", "terrible", "awful", "hate", "horrible", "worst", "sad", "angry",
            "disappointed", "poor", "slow", "rude", "broken", "overpriced", "cold", "dirty",
            "useless", "waste", "bland", "noisy",
        ];

        Ok(Self::builder("sentiment-lexicon")
            .label("negative", &negative)?
            .baseline("neutral")
            .label("positive", &positive)?
            .build())
    }

    /// Seven-way emotion lexicon with a neutral baseline
    pub fn emotion() -> Result<Self> {
        Ok(Self::builder("emotion-lexicon")
            .label(
                "anger",
                &["angry", "furious", "rage", "annoyed", "outraged", "mad at", "livid"],
            )?
            .label(
                "disgust",
                &["disgusting", "gross", "revolting", "nasty", "sickening", "vile"],
            )?
            .label(
                "fear",
                &["afraid", "scared", "terrified", "frightened", "anxious", "worried", "nervous"],
            )?
            .label(
                "joy",
                &["happy", "joy", "delighted", "glad", "love", "wonderful", "excited", "great"],
            )?
            .baseline("neutral")
            .label(
                "sadness",
                &["sad", "unhappy", "depressed", "miserable", "heartbroken", "lonely", "cry"],
            )?
            .label(
                "surprise",
                &["surprised", "shocked", "amazed", "astonished", "unexpected", "wow"],
            )?
            .build())
    }

    fn builder(name: &str) -> LexiconBuilder {
        LexiconBuilder {
            name: name.to_string(),
            labels: Vec::new(),
        }
    }

    /// Labels in output order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.label.as_str())
    }
}

struct LexiconBuilder {
    name: String,
    labels: Vec<LexiconLabel>,
}

impl LexiconBuilder {
    fn label(mut self, label: &str, words: &[&str]) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(words)
            .map_err(|e| {
                Error::classifier(format!("Failed to build '{label}' lexicon matcher: {e}"))
            })?;

        self.labels.push(LexiconLabel {
            label: label.to_string(),
            matcher: Some(matcher),
        });
        Ok(self)
    }

    fn baseline(mut self, label: &str) -> Self {
        self.labels.push(LexiconLabel {
            label: label.to_string(),
            matcher: None,
        });
        self
    }

    fn build(self) -> LexiconClassifier {
        LexiconClassifier {
            name: self.name,
            labels: self.labels,
        }
    }
}

#[async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let weights: Vec<f32> = self
            .labels
            .iter()
            .map(|l| match &l.matcher {
                Some(matcher) => matcher.find_iter(text).count() as f32,
                None => BASELINE_WEIGHT,
            })
            .collect();
        let total: f32 = weights.iter().sum();

        Ok(self
            .labels
            .iter()
            .zip(weights)
            .map(|(l, weight)| LabelScore::new(l.label.clone(), weight / total))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(scores: &[LabelScore]) -> &str {
        sentiscope_core::types::top_score(scores).unwrap().label.as_str()
    }

    #[tokio::test]
    async fn test_sentiment_distribution_sums_to_one() {
        let classifier = LexiconClassifier::sentiment().unwrap();
        let scores = classifier.classify("Great food, terrible parking, great staff").await.unwrap();

        let labels: Vec<_> = scores.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["negative", "neutral", "positive"]);
        let total: f32 = scores.iter().map(|s| s.score).sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert_eq!(top(&scores), "positive");
    }

    #[tokio::test]
    async fn test_no_hits_resolves_to_baseline() {
        let classifier = LexiconClassifier::sentiment().unwrap();
        let scores = classifier.classify("The meeting is on Tuesday").await.unwrap();
        assert_eq!(top(&scores), "neutral");
        assert_eq!(scores[1].score, 1.0);
    }

    #[tokio::test]
    async fn test_single_hit_outweighs_baseline() {
        let classifier = LexiconClassifier::sentiment().unwrap();
        let scores = classifier.classify("the service was slow").await.unwrap();
        assert_eq!(top(&scores), "negative");
    }

    #[tokio::test]
    async fn test_emotion_labels() {
        let classifier = LexiconClassifier::emotion().unwrap();
        let labels: Vec<_> = classifier.labels().collect();
        assert_eq!(
            labels,
            vec!["anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise"]
        );

        let scores = classifier.classify("I was terrified and worried").await.unwrap();
        assert_eq!(top(&scores), "fear");
    }
}
