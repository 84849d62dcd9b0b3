//! Sentiscope Server
//!
//! Serves sentiment, emotion and aspect analysis over HTTP. Models are
//! downloaded and loaded on the first request that needs them.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{info, warn};

use sentiscope_server::{create_router, AppState, Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting Sentiscope server");

    let config = ServerConfig::load(&cli.config, &cli)?;
    info!(
        sentiment = %config.models.sentiment.repo_id,
        sentiment_backend = ?config.models.sentiment.backend,
        emotion = %config.models.emotion.repo_id,
        emotion_backend = ?config.models.emotion.backend,
        max_text_length = config.max_text_length,
        batch_size_limit = config.batch_size_limit,
        "configuration loaded"
    );

    let metrics_handle = init_metrics()?;

    let addr = config.socket_addr()?;
    let state = AppState::new(config, Some(metrics_handle))?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Sentiscope listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("sentiscope=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentiscope=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "sentiscope_requests_total",
        "Total number of API requests by endpoint"
    );
    metrics::describe_counter!("sentiscope_errors_total", "Total number of errors by kind");
    metrics::describe_histogram!(
        "sentiscope_classifier_latency_us",
        metrics::Unit::Microseconds,
        "Classifier inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
