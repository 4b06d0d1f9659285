//! # Undo/Redo History
//!
//! Linear history of whole-tree snapshots.
//!
//! ## Design
//!
//! - `past` holds earlier snapshots (oldest first), `future` holds undone
//!   snapshots (nearest first), `present` is the current one
//! - Commit pushes the present onto `past` and clears `future`
//! - Only commit trims `past`; undo and redo just move entries across
//! - A failed edit never reaches commit, so history is untouched
//!
//! ## Example
//!
//! ```rust
//! use nodeflow_editor::History;
//!
//! let mut history = History::new("S0");
//! history.commit("S1");
//! history.commit("S2");
//! history.undo();
//! history.undo();
//! history.redo();
//!
//! assert_eq!(*history.present(), "S1");
//! ```

use std::collections::VecDeque;

/// Default number of undo levels kept by [`History::commit`]
pub const DEFAULT_MAX_LEVELS: usize = 50;

/// A snapshot plus an optional description of the edit that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<T> {
    pub snapshot: T,
    pub description: Option<String>,
}

impl<T> HistoryEntry<T> {
    fn new(snapshot: T, description: Option<String>) -> Self {
        Self { snapshot, description }
    }
}

/// Bounded linear undo/redo over snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<HistoryEntry<T>>,
    present: HistoryEntry<T>,
    future: VecDeque<HistoryEntry<T>>,

    /// Maximum number of undo levels kept on commit (0 = unlimited)
    max_levels: usize,
}

impl<T> History<T> {
    /// Create a history with the default limit of 50 undo levels
    pub fn new(initial: T) -> Self {
        Self::with_max_levels(initial, DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(initial: T, max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: HistoryEntry::new(initial, None),
            future: VecDeque::new(),
            max_levels,
        }
    }

    /// Make `snapshot` the present; drops all redo history
    pub fn commit(&mut self, snapshot: T) {
        self.push(HistoryEntry::new(snapshot, None));
    }

    pub fn commit_with_description(&mut self, snapshot: T, description: impl Into<String>) {
        self.push(HistoryEntry::new(snapshot, Some(description.into())));
    }

    fn push(&mut self, entry: HistoryEntry<T>) {
        let previous = std::mem::replace(&mut self.present, entry);
        self.past.push_back(previous);

        if self.max_levels > 0 {
            while self.past.len() > self.max_levels {
                self.past.pop_front();
            }
        }

        self.future.clear();
    }

    /// Step back one snapshot. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push_front(current);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop_front() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push_back(current);
                true
            }
            None => false,
        }
    }

    pub fn present(&self) -> &T {
        &self.present.snapshot
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Description of the edit that undo would revert
    pub fn undo_description(&self) -> Option<&str> {
        if self.past.is_empty() {
            return None;
        }
        self.present.description.as_deref()
    }

    /// Description of the edit that redo would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.future.front().and_then(|entry| entry.description.as_deref())
    }

    /// Forget past and future, keeping the present
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Snapshots reachable by undo, oldest first
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter().map(|entry| &entry.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_creation() {
        let history = History::new(0);
        assert_eq!(*history.present(), 0);
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.max_levels(), DEFAULT_MAX_LEVELS);
    }

    #[test]
    fn test_commit_undo_redo_sequence() {
        let mut history = History::new("S0");
        history.commit("S1");
        history.commit("S2");

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(*history.present(), "S0");
        assert!(history.redo());

        assert_eq!(*history.present(), "S1");
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 1);
    }

    #[test]
    fn test_undo_redo_on_empty_are_noops() {
        let mut history = History::new(1);
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(*history.present(), 1);
    }

    #[test]
    fn test_new_commit_clears_redo() {
        let mut history = History::new(0);
        history.commit(1);
        history.commit(2);
        history.undo();
        history.undo();
        assert_eq!(history.redo_levels(), 2);

        history.commit(3);

        assert_eq!(history.redo_levels(), 0);
        assert!(!history.redo());
        assert_eq!(*history.present(), 3);
    }

    #[test]
    fn test_commit_caps_past_at_fifty() {
        let mut history = History::new(0);
        for i in 1..=60 {
            history.commit(i);
        }

        assert_eq!(history.undo_levels(), 50);
        assert_eq!(history.past().next(), Some(&10));

        while history.undo() {}
        assert_eq!(*history.present(), 10);
    }

    #[test]
    fn test_redo_restores_levels_at_the_cap() {
        let mut history = History::with_max_levels(0, 2);
        history.commit(1);
        history.commit(2);
        history.commit(3);
        assert_eq!(history.undo_levels(), 2);

        history.undo();
        history.undo();
        history.redo();
        history.redo();

        assert_eq!(history.undo_levels(), 2);
        assert_eq!(*history.present(), 3);
    }

    #[test]
    fn test_zero_means_unlimited() {
        let mut history = History::with_max_levels(0, 0);
        for i in 1..=200 {
            history.commit(i);
        }
        assert_eq!(history.undo_levels(), 200);
    }

    #[test]
    fn test_descriptions_follow_the_cursor() {
        let mut history = History::new("a");
        history.commit_with_description("b", "Rename key");
        history.commit_with_description("c", "Delete node");

        assert_eq!(history.undo_description(), Some("Delete node"));
        assert_eq!(history.redo_description(), None);

        history.undo();
        assert_eq!(history.undo_description(), Some("Rename key"));
        assert_eq!(history.redo_description(), Some("Delete node"));

        history.undo();
        assert_eq!(history.undo_description(), None);
    }

    #[test]
    fn test_clear_keeps_present() {
        let mut history = History::new(0);
        history.commit(1);
        history.commit(2);
        history.undo();

        history.clear();

        assert_eq!(*history.present(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
