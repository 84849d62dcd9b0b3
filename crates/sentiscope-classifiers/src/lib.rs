//! Sentiscope Classifiers
//!
//! Everything between raw request text and a formatted report:
//! - The `Classifier` trait that black-box models implement
//! - Label remapping and the lazily-initialized `ClassificationAdapter`
//! - Lexicon classifiers (offline backend) and Hub-downloaded RoBERTa models
//! - Aspect extraction and aspect-sentiment composition
//! - The `Analyzer` service exposing sentiment, emotion, aspect and batch analysis

pub mod adapter;
pub mod analyzer;
pub mod aspects;
pub mod classifier;
pub mod composer;
pub mod config;
pub mod labels;
pub mod lexicon;
pub mod loader;
#[cfg(feature = "ml-models")]
pub mod model;

pub use adapter::ClassificationAdapter;
pub use analyzer::{Analyzer, AnalyzerSettings};
pub use aspects::{AspectVocabulary, OVERALL_ASPECT};
pub use classifier::Classifier;
pub use composer::AspectComposer;
pub use config::{Backend, DeviceSpec, ModelSpec};
pub use labels::LabelMap;
pub use lexicon::LexiconClassifier;
pub use loader::{loader_for, ClassifierLoader, ReadyLoader};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::adapter::ClassificationAdapter;
    pub use crate::analyzer::Analyzer;
    pub use crate::classifier::Classifier;
    pub use crate::labels::LabelMap;
    pub use crate::lexicon::LexiconClassifier;
}
