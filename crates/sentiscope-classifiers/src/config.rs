//! Model configuration

use sentiscope_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Where a classifier comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pre-trained sequence classifier downloaded from the Hugging Face Hub
    #[default]
    Hub,
    /// Built-in keyword lexicon, no download required
    Lexicon,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hub" => Ok(Self::Hub),
            "lexicon" => Ok(Self::Lexicon),
            other => Err(Error::config(format!(
                "unknown backend '{other}', expected 'hub' or 'lexicon'"
            ))),
        }
    }
}

/// Device specification (for config files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSpec {
    #[default]
    Cpu,
    Cuda,
    Metal,
}

/// One classification model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Hub repository id, e.g. `cardiffnlp/twitter-roberta-base-sentiment-latest`
    pub repo_id: String,

    /// Repository revision
    #[serde(default = "default_revision")]
    pub revision: String,

    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub device: DeviceSpec,

    /// Token limit applied before inference
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Model cache directory; defaults to the user cache dir
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl ModelSpec {
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            revision: default_revision(),
            backend: Backend::default(),
            device: DeviceSpec::default(),
            max_length: default_max_length(),
            cache_dir: None,
        }
    }

    /// Default sentiment model
    pub fn sentiment() -> Self {
        Self::new("cardiffnlp/twitter-roberta-base-sentiment-latest")
    }

    /// Default emotion model
    pub fn emotion() -> Self {
        Self::new("j-hartmann/emotion-english-distilroberta-base")
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Resolved cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sentiscope/models")
        })
    }
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_max_length() -> usize {
    512
}
