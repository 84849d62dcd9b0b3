//! Sentiscope Server
//!
//! axum HTTP surface over the Sentiscope analyzer: single-text sentiment,
//! emotion and aspect analysis, batch analysis, and in-process history.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::{FeatureToggles, ModelsConfig, ServerConfig};
pub use routes::{create_router, AppError};
pub use state::AppState;
