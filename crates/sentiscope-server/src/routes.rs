//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::state::AppState;
use sentiscope_core::{
    AnalysisKind, AnalysisOutcome, AspectReport, BatchReport, EmotionReport, Error, ErrorBody,
    HistoryPage, SentimentReport,
};

pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let api_routes = Router::new()
        .route("/analyze", post(analyze_sentiment))
        .route("/emotion", post(analyze_emotion))
        .route("/aspect", post(analyze_aspects))
        .route("/batch", post(batch_analyze))
        .route("/history", get(history))
        .route("/clear-history", post(clear_history));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let models = &state.config.models;
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "models": {
            "sentiment": models.sentiment.repo_id,
            "emotion": models.emotion.repo_id,
        },
        "backends": {
            "sentiment": models.sentiment.backend,
            "emotion": models.emotion.backend,
        }
    }))
}

async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed").into_response(),
    }
}

/// Body of the single-text endpoints
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub texts: Vec<String>,

    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    AnalysisKind::Sentiment.to_string()
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Kept as text so a malformed limit falls back to the default
    pub limit: Option<String>,
}

async fn analyze_sentiment(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<SentimentReport>, AppError> {
    record_request("analyze");
    let Json(req) = payload?;

    let report = state.analyzer.analyze_sentiment(&req.text).await?;
    remember(&state, AnalysisKind::Sentiment, &req.text, &report);
    Ok(Json(report))
}

async fn analyze_emotion(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<EmotionReport>, AppError> {
    record_request("emotion");
    ensure_enabled(state.config.features.emotion, "emotion")?;
    let Json(req) = payload?;

    let report = state.analyzer.analyze_emotion(&req.text).await?;
    remember(&state, AnalysisKind::Emotion, &req.text, &report);
    Ok(Json(report))
}

async fn analyze_aspects(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<AspectReport>, AppError> {
    record_request("aspect");
    ensure_enabled(state.config.features.aspect, "aspect")?;
    let Json(req) = payload?;

    let report = state.analyzer.analyze_aspects(&req.text).await?;
    remember(&state, AnalysisKind::Aspect, &req.text, &report);
    Ok(Json(report))
}

async fn batch_analyze(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchReport>, AppError> {
    record_request("batch");
    ensure_enabled(state.config.features.batch, "batch")?;
    let Json(req) = payload.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::from(rejection),
        _ => {
            debug!(error = %rejection.body_text(), "rejected batch body");
            AppError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid texts array".to_string(),
            }
        }
    })?;

    let report = state.analyzer.batch_analyze(&req.texts, &req.mode).await?;
    Ok(Json(report))
}

async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryPage>, AppError> {
    record_request("history");
    ensure_enabled(state.config.features.history, "history")?;

    let limit = query
        .limit
        .and_then(|limit| limit.parse::<usize>().ok())
        .unwrap_or(state.config.history_limit);
    Ok(Json(state.history.recent(limit)))
}

async fn clear_history(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    record_request("clear_history");
    ensure_enabled(state.config.features.history, "history")?;

    state.history.clear();
    Ok(Json(json!({ "message": "History cleared" })))
}

async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found"))).into_response()
}

fn record_request(endpoint: &'static str) {
    metrics::counter!("sentiscope_requests_total", "endpoint" => endpoint).increment(1);
}

fn ensure_enabled(enabled: bool, feature: &'static str) -> Result<(), AppError> {
    if enabled {
        Ok(())
    } else {
        Err(AppError::Disabled(feature))
    }
}

/// Append a successful single analysis to history when it is enabled
fn remember<T>(state: &AppState, kind: AnalysisKind, text: &str, report: &T)
where
    T: Clone + Into<AnalysisOutcome>,
{
    if state.config.features.history {
        state.history.append(kind, text, report.clone().into());
    }
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Failure reported by the analyzer
    #[error(transparent)]
    Analysis(#[from] Error),

    /// Body could not be extracted
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Endpoint switched off in the configuration
    #[error("Feature '{0}' is disabled")]
    Disabled(&'static str),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::Analysis(err) if err.is_client_error() => (StatusCode::BAD_REQUEST, err.kind()),
            AppError::Analysis(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.kind()),
            AppError::Rejected { status, .. } => (*status, "invalid_request"),
            AppError::Disabled(_) => (StatusCode::NOT_FOUND, "disabled"),
        };

        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        } else {
            debug!(%status, error = %self, "request rejected");
        }

        metrics::counter!("sentiscope_errors_total", "kind" => kind).increment(1);
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
