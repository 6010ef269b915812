//! # Document History
//!
//! Snapshot-based undo/redo over whole documents.
//!
//! ## Design
//!
//! - `present` is the current committed document
//! - `push` moves `present` onto `past` and clears `future`
//! - `undo` moves `present` onto `future` and pops `past`
//! - `redo` moves `present` onto `past` and pops `future`
//! - Optional cap: past the limit the oldest snapshot is dropped
//!
//! Snapshots are full documents. Callers clone `present`, mutate the clone
//! and push it, so a snapshot is never modified after it is recorded.
//!
//! ## Example
//!
//! ```
//! use certkit_editor::DocumentHistory;
//! use certkit_model::Document;
//!
//! let mut history = DocumentHistory::new(Document::new("v1"));
//! history.push(Document::new("v2"));
//!
//! assert_eq!(history.undo().map(|d| d.name.as_str()), Some("v1"));
//! assert_eq!(history.redo().map(|d| d.name.as_str()), Some("v2"));
//! assert!(history.redo().is_none());
//! ```

use certkit_model::Document;
use tracing::debug;

/// Default cap used by the editor configuration
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// The three stacks of an undoable document
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    /// Older snapshots, most recent last
    pub past: Vec<Document>,
    pub present: Document,
    /// Undone snapshots, most recent last
    pub future: Vec<Document>,
}

#[derive(Debug, Clone)]
pub struct DocumentHistory {
    state: HistoryState,

    /// Maximum number of past snapshots (0 = unlimited)
    max_levels: usize,
}

impl DocumentHistory {
    /// Create an unbounded history
    pub fn new(present: Document) -> Self {
        Self::with_max_levels(present, 0)
    }

    /// Create a history that keeps at most `max_levels` past snapshots
    pub fn with_max_levels(present: Document, max_levels: usize) -> Self {
        Self {
            state: HistoryState {
                past: Vec::new(),
                present,
                future: Vec::new(),
            },
            max_levels,
        }
    }

    pub fn present(&self) -> &Document {
        &self.state.present
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Record `doc` as the new present
    pub fn push(&mut self, doc: Document) {
        let previous = std::mem::replace(&mut self.state.present, doc);
        self.state.past.push(previous);

        if self.max_levels > 0 && self.state.past.len() > self.max_levels {
            self.state.past.remove(0);
        }

        // New action invalidates the future
        self.state.future.clear();
        debug!(past = self.state.past.len(), "History push");
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Option<&Document> {
        let previous = self.state.past.pop()?;
        let current = std::mem::replace(&mut self.state.present, previous);
        self.state.future.push(current);

        debug!(past = self.state.past.len(), future = self.state.future.len(), "History undo");
        Some(&self.state.present)
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Option<&Document> {
        let next = self.state.future.pop()?;
        let current = std::mem::replace(&mut self.state.present, next);
        self.state.past.push(current);

        debug!(past = self.state.past.len(), future = self.state.future.len(), "History redo");
        Some(&self.state.present)
    }

    pub fn can_undo(&self) -> bool {
        !self.state.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.state.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.state.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Forget past and future, keeping the present
    pub fn clear(&mut self) {
        self.state.past.clear();
        self.state.future.clear();
    }
}
