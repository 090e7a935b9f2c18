//! Snapshot history (undo/redo) for the single-line editing engine.
//!
//! Unlike an operation log, every entry is a full copy of the line plus the
//! selection at the moment it was committed. Lines are short, so the copy is
//! cheap and restoring a snapshot can never drift out of sync with the text.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::selection::Selection;

/// Default number of snapshots kept on the undo stack
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// A recorded (content, selection) pair usable to restore editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub content: String,
    pub selection: Selection,
}

impl Snapshot {
    pub fn new(content: impl Into<String>, selection: Selection) -> Self {
        Self {
            content: content.into(),
            selection,
        }
    }
}

/// Bounded undo stack plus redo stack of [`Snapshot`]s.
///
/// Once initialized the undo stack always holds at least one snapshot, and its
/// top mirrors the state the editor last committed or restored.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    last_state: String,
    max_history: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Create a new edit history with specified max size (at least 1)
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            last_state: String::new(),
            max_history: max_history.max(1),
        }
    }

    /// Reset both stacks and seed the undo stack with the initial state
    pub fn initialize(&mut self, initial: Snapshot) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_state = initial.content.clone();
        self.undo_stack.push_back(initial);
    }

    /// Push a snapshot if `content` differs from the last committed content.
    ///
    /// Clears the redo stack and evicts the oldest snapshot past capacity.
    /// Returns true if a snapshot was pushed.
    pub fn record_if_changed(&mut self, content: &str, selection: Selection) -> bool {
        if content == self.last_state {
            return false;
        }

        self.undo_stack.push_back(Snapshot::new(content, selection));
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
        if !self.redo_stack.is_empty() {
            tracing::trace!("Discarding {} redo snapshots", self.redo_stack.len());
            self.redo_stack.clear();
        }
        self.last_state = content.to_string();

        tracing::trace!(
            "Recorded snapshot ({} chars), undo depth {}",
            self.last_state.chars().count(),
            self.undo_stack.len()
        );
        true
    }

    /// Step back one snapshot.
    ///
    /// `current` is the live state, kept on the redo stack so a following
    /// redo restores exactly what was on screen. Returns the snapshot to
    /// restore, or `None` when only the initial state is left.
    pub fn undo(&mut self, current: Snapshot) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }

        self.undo_stack.pop_back();
        self.redo_stack.push(current);
        let prev = self.undo_stack.back()?;
        self.last_state = prev.content.clone();
        Some(prev)
    }

    /// Step forward one snapshot. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.last_state = next.content.clone();
        self.undo_stack.push_back(next.clone());
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of snapshots in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of snapshots in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Content of the most recent commit or restore
    pub fn last_state(&self) -> &str {
        &self.last_state
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// The snapshot the editor currently stands on
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    /// Undo stack, oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.undo_stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(content: &str) -> EditHistory {
        let mut history = EditHistory::new();
        history.initialize(Snapshot::new(content, Selection::collapsed(0)));
        history
    }

    #[test]
    fn test_initialize_seeds_one_snapshot() {
        let history = seeded("abc");
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.last_state(), "abc");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_skips_unchanged_content() {
        let mut history = seeded("abc");
        assert!(!history.record_if_changed("abc", Selection::collapsed(3)));
        assert!(history.record_if_changed("abcd", Selection::collapsed(4)));
        assert!(!history.record_if_changed("abcd", Selection::collapsed(1)));
        assert_eq!(history.undo_count(), 2);
    }

    #[test]
    fn test_history_undo_redo() {
        let mut history = seeded("");
        history.record_if_changed("a", Selection::collapsed(1));
        history.record_if_changed("ab", Selection::collapsed(2));

        let live = Snapshot::new("ab", Selection::collapsed(1));
        let prev = history.undo(live.clone()).unwrap();
        assert_eq!(prev.content, "a");
        assert_eq!(history.last_state(), "a");
        assert!(history.can_redo());

        let next = history.redo().unwrap();
        assert_eq!(next, live);
        assert_eq!(history.last_state(), "ab");
        assert_eq!(history.current(), Some(&live));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_never_pops_initial_state() {
        let mut history = seeded("x");
        assert!(history.undo(Snapshot::default()).is_none());
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = seeded("");
        history.record_if_changed("a", Selection::collapsed(1));
        history.undo(Snapshot::new("a", Selection::collapsed(1)));
        assert!(history.can_redo());

        history.record_if_changed("b", Selection::collapsed(1));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_history_max_size() {
        let mut history = EditHistory::with_max_history(3);
        history.initialize(Snapshot::default());

        for i in 0..5 {
            history.record_if_changed(&i.to_string(), Selection::collapsed(1));
        }

        assert_eq!(history.undo_count(), 3);
        let contents: Vec<_> = history.snapshots().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let history = EditHistory::with_max_history(0);
        assert_eq!(history.max_history(), 1);
    }
}
