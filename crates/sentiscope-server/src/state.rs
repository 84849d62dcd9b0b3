//! Shared application state

use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use sentiscope_classifiers::Analyzer;
use sentiscope_core::{HistoryStore, Result};
use std::sync::Arc;
use tracing::info;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Analysis service; classifiers load on first use
    pub analyzer: Arc<Analyzer>,

    /// Process-lifetime analysis history
    pub history: Arc<HistoryStore>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from configuration without loading any model
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Result<Self> {
        let analyzer = Analyzer::from_specs(
            &config.models.sentiment,
            &config.models.emotion,
            config.vocabulary(),
            config.analyzer_settings(),
        )?;

        Ok(Self::with_analyzer(config, analyzer, metrics_handle))
    }

    /// Build state around an existing analyzer
    pub fn with_analyzer(
        config: ServerConfig,
        analyzer: Analyzer,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        info!(
            emotion = config.features.emotion,
            aspect = config.features.aspect,
            batch = config.features.batch,
            history = config.features.history,
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            history: Arc::new(HistoryStore::new()),
            metrics_handle,
        }
    }
}
