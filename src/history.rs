//! In-session extraction history.
//!
//! The history is append-only and insertion-ordered: one record per
//! completed prior extraction, never mutated after creation, and never
//! persisted to disk (session lifetime only).

use chrono::{DateTime, Local};

/// A single archived extraction.
#[derive(Debug, Clone)]
pub struct ExtractionRecord {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl ExtractionRecord {
    /// Timestamp header as shown in the history panel, e.g.
    /// `[2026-08-30 14:03:12]`.
    pub fn header(&self) -> String {
        format!("[{}]", self.timestamp.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Append-only log of past extractions.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<ExtractionRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archives a prior output with the current wall-clock timestamp.
    pub fn archive(&mut self, text: &str) {
        self.archive_at(text, Local::now());
    }

    fn archive_at(&mut self, text: &str, timestamp: DateTime<Local>) {
        self.records.push(ExtractionRecord {
            timestamp,
            text: text.to_string(),
        });
    }

    /// Records in insertion order, oldest first.
    pub fn records(&self) -> &[ExtractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
