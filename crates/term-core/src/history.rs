//! Bounded recall buffer with cursor navigation.
//!
//! The stored record is a JSON array of strings. A missing or malformed
//! record reads as an empty history.

use std::rc::Rc;
use crate::ports::StoragePort;

/// Result of one recall step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recall {
    pub value: String,
    pub cursor: usize,
}

pub struct HistoryStore {
    storage: Rc<dyn StoragePort>,
    key: String,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new(storage: Rc<dyn StoragePort>, key: impl Into<String>, max_entries: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn load(&self) -> Vec<String> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("History unavailable ({}), starting empty", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Discarding malformed history record: {}", e);
            Vec::new()
        })
    }

    pub fn save(&self, entries: &[String]) {
        let result = serde_json::to_string(entries)
            .map_err(term_types::TermError::from)
            .and_then(|json| self.storage.set(&self.key, &json));
        if let Err(e) = result {
            log::warn!("Failed to persist history: {}", e);
        }
    }

    /// Append `command` unless it repeats the last entry, keeping the most
    /// recent `max_entries`. Returns the resulting buffer.
    pub fn add(&self, command: &str) -> Vec<String> {
        let mut entries = self.load();
        if entries.last().map(String::as_str) == Some(command) {
            return entries;
        }

        entries.push(command.to_string());
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }
        self.save(&entries);
        entries
    }

    /// Step back one entry, stopping at the oldest.
    pub fn previous(entries: &[String], cursor: usize) -> Recall {
        let cursor = cursor.saturating_sub(1);
        Recall {
            value: entries.get(cursor).cloned().unwrap_or_default(),
            cursor,
        }
    }

    /// Step forward one entry. The position after the newest entry is the
    /// fresh line and yields an empty value.
    pub fn next(entries: &[String], cursor: usize) -> Recall {
        let cursor = (cursor + 1).min(entries.len());
        Recall {
            value: entries.get(cursor).cloned().unwrap_or_default(),
            cursor,
        }
    }
}

/// Entries plus the recall cursor, as held by the line engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBuffer {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryBuffer {
    pub fn new(entries: Vec<String>) -> Self {
        let cursor = entries.len();
        Self { entries, cursor }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Replace the entries and return to the fresh line.
    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
        self.reset_cursor();
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    pub fn recall_previous(&mut self) -> String {
        let recall = HistoryStore::previous(&self.entries, self.cursor);
        self.cursor = recall.cursor;
        recall.value
    }

    pub fn recall_next(&mut self) -> String {
        let recall = HistoryStore::next(&self.entries, self.cursor);
        self.cursor = recall.cursor;
        recall.value
    }
}
