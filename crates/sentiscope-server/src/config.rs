//! Server configuration

use crate::cli::Cli;
use anyhow::{bail, Context};
use sentiscope_classifiers::{AnalyzerSettings, AspectVocabulary, ModelSpec};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum characters per text
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Maximum texts per batch request
    #[serde(default = "default_batch_size_limit")]
    pub batch_size_limit: usize,

    /// History page size when the request gives no limit
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Model cache directory shared by models that do not set their own
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub features: FeatureToggles,

    /// Aspect vocabulary override; the built-in list is used when absent
    #[serde(default)]
    pub aspects: Option<Vec<String>>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("failed to read {config_path}"))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse {config_path}"))?
        } else {
            tracing::info!(path = config_path, "config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(backend) = cli.backend {
            config.models.sentiment.backend = backend;
            config.models.emotion.backend = backend;
        }

        if let Some(cache_dir) = &config.cache_dir {
            for spec in [&mut config.models.sentiment, &mut config.models.emotion] {
                spec.cache_dir.get_or_insert_with(|| cache_dir.clone());
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_text_length == 0 {
            bail!("max_text_length must be greater than zero");
        }
        if self.batch_size_limit == 0 {
            bail!("batch_size_limit must be greater than zero");
        }
        if self.max_body_bytes == 0 {
            bail!("max_body_bytes must be greater than zero");
        }
        if matches!(&self.aspects, Some(aspects) if aspects.iter().all(|a| a.trim().is_empty())) {
            bail!("aspects must contain at least one keyword");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.listen, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.listen, self.port))
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            max_text_length: self.max_text_length,
            batch_size_limit: self.batch_size_limit,
        }
    }

    pub fn vocabulary(&self) -> AspectVocabulary {
        match &self.aspects {
            Some(keywords) => AspectVocabulary::new(keywords),
            None => AspectVocabulary::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            max_text_length: default_max_text_length(),
            batch_size_limit: default_batch_size_limit(),
            history_limit: default_history_limit(),
            max_body_bytes: default_max_body_bytes(),
            cache_dir: None,
            models: ModelsConfig::default(),
            features: FeatureToggles::default(),
            aspects: None,
        }
    }
}

/// Models used for each analysis kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "ModelSpec::sentiment")]
    pub sentiment: ModelSpec,

    #[serde(default = "ModelSpec::emotion")]
    pub emotion: ModelSpec,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            sentiment: ModelSpec::sentiment(),
            emotion: ModelSpec::emotion(),
        }
    }
}

/// Endpoints that can be switched off
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureToggles {
    #[serde(default = "default_true")]
    pub emotion: bool,

    #[serde(default = "default_true")]
    pub aspect: bool,

    #[serde(default = "default_true")]
    pub batch: bool,

    #[serde(default = "default_true")]
    pub history: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            emotion: true,
            aspect: true,
            batch: true,
            history: true,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_text_length() -> usize {
    5000
}

fn default_batch_size_limit() -> usize {
    100
}

fn default_history_limit() -> usize {
    20
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_true() -> bool {
    true
}
