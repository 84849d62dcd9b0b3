//! Classification adapter: lazy initialization, failure boundary, label remapping

use crate::classifier::Classifier;
use crate::labels::LabelMap;
use crate::loader::{ClassifierLoader, ReadyLoader};
use futures::FutureExt;
use sentiscope_core::{Classification, Error, Result};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

/// Wraps one black-box classifier behind a canonical interface.
///
/// The classifier is built on the first call to [`classify`](Self::classify)
/// and shared afterwards. Concurrent first callers wait for the single
/// initialization; a failed initialization leaves the cell empty so the
/// next call retries.
pub struct ClassificationAdapter {
    name: String,
    loader: Arc<dyn ClassifierLoader>,
    instance: OnceCell<Arc<dyn Classifier>>,
    labels: LabelMap,
}

impl ClassificationAdapter {
    pub fn new(name: impl Into<String>, loader: Arc<dyn ClassifierLoader>, labels: LabelMap) -> Self {
        Self {
            name: name.into(),
            loader,
            instance: OnceCell::new(),
            labels,
        }
    }

    /// Adapter over an existing classifier instance
    pub fn with_classifier(
        name: impl Into<String>,
        classifier: Arc<dyn Classifier>,
        labels: LabelMap,
    ) -> Self {
        Self::new(name, Arc::new(ReadyLoader::new(classifier)), labels)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the underlying model
    pub fn model_id(&self) -> &str {
        self.loader.model_id()
    }

    /// Whether the classifier has been built yet
    pub fn is_initialized(&self) -> bool {
        self.instance.initialized()
    }

    /// Classify `text` and select the top canonical label.
    ///
    /// Errors and panics from the model are converted into
    /// [`Error::Classifier`] with a caller-safe message; details are logged.
    pub async fn classify(&self, text: &str) -> Result<Classification> {
        let classifier = self.classifier().await?;
        let start = Instant::now();

        let outcome = AssertUnwindSafe(classifier.classify(text))
            .catch_unwind()
            .await;

        let latency_us = start.elapsed().as_micros() as u64;
        metrics::histogram!("sentiscope_classifier_latency_us", "classifier" => self.name.clone())
            .record(latency_us as f64);

        let scores = match outcome {
            Ok(Ok(scores)) => scores,
            Ok(Err(e)) => {
                error!(classifier = %self.name, error = %e, "classification failed");
                return Err(self.failure("model error"));
            }
            Err(panic) => {
                error!(
                    classifier = %self.name,
                    panic = %panic_message(&*panic),
                    "classifier panicked"
                );
                return Err(self.failure("model error"));
            }
        };

        let classification = Classification::from_scores(self.labels.remap_scores(scores))
            .ok_or_else(|| {
                error!(classifier = %self.name, "classifier returned no scores");
                self.failure("empty model output")
            })?;

        debug!(
            classifier = %self.name,
            label = %classification.label,
            score = classification.score,
            latency_us,
            "classified text"
        );
        Ok(classification)
    }

    async fn classifier(&self) -> Result<&Arc<dyn Classifier>> {
        self.instance
            .get_or_try_init(|| async {
                info!(classifier = %self.name, model = %self.loader.model_id(), "loading classifier");
                let start = Instant::now();
                let classifier = self.loader.load().await?;
                info!(
                    classifier = %self.name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "classifier loaded"
                );
                Ok::<_, Error>(classifier)
            })
            .await
            .map_err(|e| {
                error!(classifier = %self.name, error = %e, "failed to load classifier");
                self.failure("model unavailable")
            })
    }

    fn failure(&self, reason: &str) -> Error {
        Error::classifier(format!("Analysis failed: {} {}", self.name, reason))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
