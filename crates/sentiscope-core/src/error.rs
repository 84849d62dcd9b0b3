//! Error types for Sentiscope

use serde::{Deserialize, Serialize};

/// Result type alias using Sentiscope's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Sentiscope operations
///
/// The `Display` output of the analysis variants is the human-readable
/// reason returned to API callers, so it must never carry model internals.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected input (empty text, text too long, malformed batch)
    #[error("{0}")]
    Validation(String),

    /// The underlying model failed to initialize or to classify
    #[error("{0}")]
    Classifier(String),

    /// Batch rejected wholesale before any item was processed
    #[error("Batch size exceeds limit of {limit}")]
    BatchSizeExceeded { limit: usize },

    /// Unrecognized batch mode
    #[error("Invalid mode")]
    InvalidMode(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BatchSizeExceeded { .. } | Self::InvalidMode(_)
        )
    }

    /// Short metric/log label for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Classifier(_) => "classifier",
            Self::BatchSizeExceeded { .. } => "batch_size",
            Self::InvalidMode(_) => "invalid_mode",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Error payload returned in place of a result: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<Error> for ErrorBody {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = Error::validation("Text cannot be empty");
        assert_eq!(err.to_string(), "Text cannot be empty");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_batch_size_message() {
        let err = Error::BatchSizeExceeded { limit: 100 };
        assert_eq!(err.to_string(), "Batch size exceeds limit of 100");
        assert_eq!(ErrorBody::from(err).error, "Batch size exceeds limit of 100");
    }

    #[test]
    fn test_classifier_error_is_not_client_error() {
        let err = Error::classifier("Sentiment analysis failed");
        assert!(!err.is_client_error());
        assert_eq!(err.kind(), "classifier");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::validation("x").kind(), "validation");
        assert_eq!(Error::BatchSizeExceeded { limit: 1 }.kind(), "batch_size");
        assert_eq!(Error::InvalidMode("sarcasm".into()).kind(), "invalid_mode");
        assert_eq!(Error::config("x").kind(), "config");
        assert_eq!(Error::internal("x").kind(), "internal");
    }
}
