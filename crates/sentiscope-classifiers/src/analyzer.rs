//! Analysis service: the operations exposed to the HTTP layer

use crate::adapter::ClassificationAdapter;
use crate::aspects::AspectVocabulary;
use crate::composer::AspectComposer;
use crate::config::ModelSpec;
use crate::labels::LabelMap;
use crate::loader::loader_for;
use sentiscope_core::format::{format_aspects, format_emotion, format_sentiment};
use sentiscope_core::text::{normalize, validate};
use sentiscope_core::{
    AnalysisKind, AnalysisOutcome, AspectReport, BatchReport, EmotionReport, Error, ErrorBody,
    Result, SentimentReport,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Limits applied by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerSettings {
    /// Maximum characters of raw input text
    pub max_text_length: usize,

    /// Maximum number of texts in one batch
    pub batch_size_limit: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            max_text_length: 5000,
            batch_size_limit: 100,
        }
    }
}

/// Sentiment, emotion, aspect and batch analysis over shared classifiers
pub struct Analyzer {
    settings: AnalyzerSettings,
    sentiment: Arc<ClassificationAdapter>,
    emotion: Arc<ClassificationAdapter>,
    composer: AspectComposer,
}

impl Analyzer {
    /// Build from adapters; the aspect pipeline reuses the sentiment adapter
    pub fn new(
        sentiment: ClassificationAdapter,
        emotion: ClassificationAdapter,
        vocabulary: AspectVocabulary,
        settings: AnalyzerSettings,
    ) -> Self {
        let sentiment = Arc::new(sentiment);
        let composer =
            AspectComposer::new(Arc::clone(&sentiment), vocabulary, settings.max_text_length);

        Self {
            settings,
            sentiment,
            emotion: Arc::new(emotion),
            composer,
        }
    }

    /// Build from model specs. Nothing is loaded until the first request.
    pub fn from_specs(
        sentiment: &ModelSpec,
        emotion: &ModelSpec,
        vocabulary: AspectVocabulary,
        settings: AnalyzerSettings,
    ) -> Result<Self> {
        info!(
            sentiment = %sentiment.repo_id,
            emotion = %emotion.repo_id,
            aspects = vocabulary.keywords().len(),
            "configuring analyzer"
        );

        let sentiment = ClassificationAdapter::new(
            "sentiment",
            loader_for(sentiment, AnalysisKind::Sentiment)?,
            LabelMap::sentiment(),
        );
        let emotion = ClassificationAdapter::new(
            "emotion",
            loader_for(emotion, AnalysisKind::Emotion)?,
            LabelMap::identity(),
        );

        Ok(Self::new(sentiment, emotion, vocabulary, settings))
    }

    pub fn settings(&self) -> AnalyzerSettings {
        self.settings
    }

    pub fn sentiment_adapter(&self) -> &ClassificationAdapter {
        &self.sentiment
    }

    pub fn emotion_adapter(&self) -> &ClassificationAdapter {
        &self.emotion
    }

    /// Sentiment of the whole text
    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentReport> {
        validate(text, self.settings.max_text_length)?;
        let classification = self.sentiment.classify(&normalize(text)).await?;
        Ok(format_sentiment(&classification))
    }

    /// Emotion distribution of the whole text
    pub async fn analyze_emotion(&self, text: &str) -> Result<EmotionReport> {
        validate(text, self.settings.max_text_length)?;
        let classification = self.emotion.classify(&normalize(text)).await?;
        Ok(format_emotion(&classification.all_scores))
    }

    /// Sentiment per mentioned aspect
    pub async fn analyze_aspects(&self, text: &str) -> Result<AspectReport> {
        let aspects = self.composer.compose(text).await?;
        Ok(format_aspects(aspects))
    }

    /// Run one analysis of the given kind, folding errors into the outcome
    pub async fn analyze(&self, kind: AnalysisKind, text: &str) -> AnalysisOutcome {
        match kind {
            AnalysisKind::Sentiment => self.analyze_sentiment(text).await.into(),
            AnalysisKind::Emotion => self.analyze_emotion(text).await.into(),
            AnalysisKind::Aspect => self.analyze_aspects(text).await.into(),
        }
    }

    /// Analyze texts one after another.
    ///
    /// Empty or oversized batches are rejected before any item is touched.
    /// Every other failure, including an unknown mode, becomes an error
    /// entry at that item's position.
    pub async fn batch_analyze(&self, texts: &[String], mode: &str) -> Result<BatchReport> {
        if texts.is_empty() {
            return Err(Error::validation("Invalid texts array"));
        }

        if texts.len() > self.settings.batch_size_limit {
            return Err(Error::BatchSizeExceeded {
                limit: self.settings.batch_size_limit,
            });
        }

        let kind = mode.parse::<AnalysisKind>();
        debug!(items = texts.len(), mode, "running batch");

        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let outcome = match &kind {
                Ok(kind) => self.analyze(*kind, text).await,
                Err(e) => AnalysisOutcome::from(ErrorBody::from(e)),
            };
            results.push(outcome);
        }

        Ok(BatchReport {
            count: results.len(),
            results,
            mode: mode.to_string(),
        })
    }
}
