//! Snapshot-based undo/redo history

use crate::core::models::Semester;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Maximum number of retained history entries
pub const HISTORY_LIMIT: usize = 50;

/// Deep copy of the semesters at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Owned copy of the semesters, independent of live state
    pub snapshot: Vec<Semester>,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

/// Linear history with a movable pointer
///
/// Pushing while the pointer is behind the newest entry discards every entry
/// after the pointer. Once more than the limit is stored the oldest entry is
/// dropped.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: VecDeque<HistoryEntry>,
    pointer: Option<usize>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    /// Create an empty history holding at most [`HISTORY_LIMIT`] entries
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Create an empty history holding at most `limit` entries (minimum 1)
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            pointer: None,
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// Record a snapshot
    ///
    /// Entries after the pointer are discarded first. If the entry at the
    /// pointer already holds an identical snapshot nothing new is appended.
    pub fn push(&mut self, semesters: &[Semester]) {
        if let Some(pointer) = self.pointer {
            self.entries.truncate(pointer + 1);
            if self.entries[pointer].snapshot == semesters {
                return;
            }
        } else {
            self.entries.clear();
        }

        self.entries.push_back(HistoryEntry {
            snapshot: semesters.to_vec(),
            timestamp: Utc::now(),
        });
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.pointer = Some(self.entries.len() - 1);
    }

    /// Step back one entry
    ///
    /// # Returns
    /// A copy of the snapshot now under the pointer, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<Vec<Semester>> {
        let pointer = self.pointer.filter(|&p| p > 0)? - 1;
        self.pointer = Some(pointer);
        Some(self.entries[pointer].snapshot.clone())
    }

    /// Step forward one entry
    ///
    /// # Returns
    /// A copy of the snapshot now under the pointer, or `None` at the newest entry
    pub fn redo(&mut self) -> Option<Vec<Semester>> {
        let pointer = self.pointer.filter(|&p| p + 1 < self.entries.len())? + 1;
        self.pointer = Some(pointer);
        Some(self.entries[pointer].snapshot.clone())
    }

    /// Whether [`undo`](Self::undo) would return a snapshot
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.pointer.is_some_and(|p| p > 0)
    }

    /// Whether [`redo`](Self::redo) would return a snapshot
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.pointer.is_some_and(|p| p + 1 < self.entries.len())
    }

    /// Whether the pointer is on the newest entry (or the history is empty)
    #[must_use]
    pub fn is_at_tip(&self) -> bool {
        self.pointer.map_or(true, |p| p + 1 == self.entries.len())
    }

    /// Entry under the pointer
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.pointer.and_then(|p| self.entries.get(p))
    }

    /// Position of the pointer
    #[must_use]
    pub const fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pointer = None;
    }
}
