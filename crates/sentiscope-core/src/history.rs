//! In-process analysis history
//!
//! History lives for the lifetime of the process and is never persisted.
//! Entry ids keep increasing across clears so a client never sees the same
//! id twice.

use crate::text::truncate_chars;
use crate::types::{AnalysisKind, AnalysisOutcome};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// Characters of the analyzed text kept in an entry
const PREVIEW_CHARS: usize = 100;

/// One recorded analysis
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
    pub result: AnalysisOutcome,
    pub timestamp: DateTime<Utc>,
}

/// Most recent entries plus the total number currently held
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub history: Vec<HistoryEntry>,
    pub total: usize,
}

/// Shared, synchronized analysis log
pub struct HistoryStore {
    inner: RwLock<HistoryInner>,
}

struct HistoryInner {
    next_id: u64,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HistoryInner {
                next_id: 1,
                entries: Vec::new(),
            }),
        }
    }

    /// Record an analysis and return the stored entry
    pub fn append(&self, kind: AnalysisKind, text: &str, result: AnalysisOutcome) -> HistoryEntry {
        let mut inner = self.inner.write();

        let entry = HistoryEntry {
            id: inner.next_id,
            text: truncate_chars(text, PREVIEW_CHARS),
            kind,
            result,
            timestamp: Utc::now(),
        };
        inner.next_id += 1;
        inner.entries.push(entry.clone());

        tracing::debug!(id = entry.id, kind = %kind, "recorded history entry");
        entry
    }

    /// The `limit` most recent entries, oldest first
    pub fn recent(&self, limit: usize) -> HistoryPage {
        let inner = self.inner.read();
        let start = inner.entries.len().saturating_sub(limit);

        HistoryPage {
            history: inner.entries[start..].to_vec(),
            total: inner.entries.len(),
        }
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry; ids are not reused afterwards
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let dropped = inner.entries.len();
        inner.entries.clear();
        tracing::info!(dropped, "history cleared");
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
