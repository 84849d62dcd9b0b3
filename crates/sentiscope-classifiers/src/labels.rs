//! Label remapping from model-specific codes to canonical names

use sentiscope_core::LabelScore;
use std::collections::HashMap;

/// Maps raw classifier labels to canonical names.
///
/// Unknown labels pass through lower-cased.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    mapping: HashMap<String, String>,
}

impl LabelMap {
    /// Map with no entries: every label is only lower-cased
    pub fn identity() -> Self {
        Self::default()
    }

    /// Three-way sentiment mapping for index-coded sentiment heads
    /// (`LABEL_0` negative, `LABEL_1` neutral, `LABEL_2` positive)
    pub fn sentiment() -> Self {
        Self::identity()
            .with("LABEL_0", "negative")
            .with("LABEL_1", "neutral")
            .with("LABEL_2", "positive")
            .with("negative", "negative")
            .with("neutral", "neutral")
            .with("positive", "positive")
    }

    /// Add or replace one mapping
    pub fn with(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.mapping.insert(raw.into(), canonical.into());
        self
    }

    /// Canonical name for a raw label
    pub fn remap(&self, raw: &str) -> String {
        self.mapping
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_lowercase())
    }

    /// Remap a whole distribution, keeping classifier order
    pub fn remap_scores(&self, scores: Vec<LabelScore>) -> Vec<LabelScore> {
        scores
            .into_iter()
            .map(|s| LabelScore {
                label: self.remap(&s.label),
                score: s.score,
            })
            .collect()
    }
}
