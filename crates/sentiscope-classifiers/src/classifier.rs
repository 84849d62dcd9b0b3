//! Classifier trait

use async_trait::async_trait;
use sentiscope_core::{LabelScore, Result};

/// A black-box text classifier.
///
/// Implementations return the full label space with one score per label,
/// using whatever label codes the underlying model emits. Remapping and
/// top-label selection happen in [`crate::ClassificationAdapter`].
/// Implementations must not keep per-request mutable state: one instance
/// serves every concurrent request.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Score `text` against every label
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
