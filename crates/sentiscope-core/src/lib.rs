//! Sentiscope Core
//!
//! Core types and pure text utilities shared across Sentiscope components.
//!
//! This crate provides:
//! - The error type and result alias
//! - Label/score and report types returned by every analysis
//! - Text normalization and input validation
//! - Response formatters (rounding, timestamps, colors)
//! - The in-process analysis history store

pub mod error;
pub mod format;
pub mod history;
pub mod text;
pub mod types;

pub use error::{Error, ErrorBody, Result};
pub use history::{HistoryEntry, HistoryPage, HistoryStore};
pub use types::{
    AnalysisKind, AnalysisOutcome, AspectReport, AspectSentiment, BatchReport, Classification,
    EmotionReport, LabelScore, SentimentReport,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::text::{normalize, validate};
    pub use crate::types::{AnalysisKind, AnalysisOutcome, Classification, LabelScore};
}
