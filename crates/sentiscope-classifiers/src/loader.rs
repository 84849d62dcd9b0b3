//! Classifier construction, deferred until first use

use crate::classifier::Classifier;
use crate::config::{Backend, ModelSpec};
use crate::lexicon::LexiconClassifier;
use async_trait::async_trait;
use sentiscope_core::{AnalysisKind, Result};
use std::sync::Arc;

/// Builds the classifier behind a [`crate::ClassificationAdapter`].
///
/// `load` may be slow (downloads, weight mapping); the adapter calls it at
/// most once per successful initialization.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    /// Construct the classifier
    async fn load(&self) -> Result<Arc<dyn Classifier>>;

    /// Identifier of the model being loaded, for logs and health output
    fn model_id(&self) -> &str;
}

/// Loader for a classifier that already exists
pub struct ReadyLoader {
    classifier: Arc<dyn Classifier>,
}

impl ReadyLoader {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl ClassifierLoader for ReadyLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>> {
        Ok(Arc::clone(&self.classifier))
    }

    fn model_id(&self) -> &str {
        self.classifier.name()
    }
}

/// Loader for the built-in lexicon classifiers
struct LexiconLoader {
    kind: AnalysisKind,
    model_id: String,
}

#[async_trait]
impl ClassifierLoader for LexiconLoader {
    async fn load(&self) -> Result<Arc<dyn Classifier>> {
        let classifier = match self.kind {
            AnalysisKind::Emotion => LexiconClassifier::emotion()?,
            AnalysisKind::Sentiment | AnalysisKind::Aspect => LexiconClassifier::sentiment()?,
        };
        Ok(Arc::new(classifier))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Pick the loader for a model spec.
///
/// `kind` picks the lexicon when `spec.backend` is [`Backend::Lexicon`].
pub fn loader_for(spec: &ModelSpec, kind: AnalysisKind) -> Result<Arc<dyn ClassifierLoader>> {
    match spec.backend {
        Backend::Lexicon => Ok(Arc::new(LexiconLoader {
            kind,
            model_id: format!("{}-lexicon", kind),
        })),
        #[cfg(feature = "ml-models")]
        Backend::Hub => Ok(Arc::new(crate::model::HubLoader::new(spec.clone()))),
        #[cfg(not(feature = "ml-models"))]
        Backend::Hub => Err(sentiscope_core::Error::config(format!(
            "model '{}' uses the hub backend, which requires the 'ml-models' feature",
            spec.repo_id
        ))),
    }
}
