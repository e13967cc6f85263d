use log::trace;
use thiserror::Error;

use crate::stroke::StrokeRef;

/// Full canvas contents at one point in time, in z-order.
///
/// Strokes are immutable once finalized, so cloning a snapshot only bumps
/// reference counts.
pub type CanvasSnapshot = Vec<StrokeRef>;

/// Errors raised by history bookkeeping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no provisional history entry to seal")]
    NothingToSeal,
}

/// One undoable action.
///
/// A gesture pushes a `Provisional` entry when it starts and seals it exactly
/// once when it ends.
#[derive(Debug, Clone)]
pub enum HistoryEntry {
    Provisional {
        before: CanvasSnapshot,
    },
    Sealed {
        before: CanvasSnapshot,
        after: CanvasSnapshot,
    },
}

impl HistoryEntry {
    pub fn before(&self) -> &CanvasSnapshot {
        match self {
            HistoryEntry::Provisional { before } | HistoryEntry::Sealed { before, .. } => before,
        }
    }

    pub fn after(&self) -> Option<&CanvasSnapshot> {
        match self {
            HistoryEntry::Provisional { .. } => None,
            HistoryEntry::Sealed { after, .. } => Some(after),
        }
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self, HistoryEntry::Sealed { .. })
    }
}

/// Undo/redo stacks of before/after canvas snapshots
#[derive(Debug, Default)]
pub struct History {
    /// Entries that can be undone, most recent last
    undo_stack: Vec<HistoryEntry>,
    /// Entries that can be redone, most recent last
    redo_stack: Vec<HistoryEntry>,
    /// Maximum number of undo entries kept, 0 for unbounded
    max_entries: usize,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `max_entries` undo steps
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Open a provisional entry for a gesture that just started
    pub fn begin(&mut self, before: CanvasSnapshot) {
        self.push(HistoryEntry::Provisional { before });
    }

    /// Give the open provisional entry its final `after` snapshot
    pub fn seal(&mut self, after: CanvasSnapshot) -> Result<(), HistoryError> {
        let entry = self.undo_stack.last_mut().ok_or(HistoryError::NothingToSeal)?;
        let HistoryEntry::Provisional { before } = &mut *entry else {
            return Err(HistoryError::NothingToSeal);
        };
        let before = std::mem::take(before);
        *entry = HistoryEntry::Sealed { before, after };
        Ok(())
    }

    /// Record a complete action in one step
    pub fn record(&mut self, before: CanvasSnapshot, after: CanvasSnapshot) {
        self.push(HistoryEntry::Sealed { before, after });
    }

    /// Undo the most recent sealed entry, returning the canvas to restore
    pub fn undo(&mut self) -> Option<CanvasSnapshot> {
        if !self.undo_stack.last()?.is_sealed() {
            return None;
        }
        let entry = self.undo_stack.pop()?;
        let before = entry.before().clone();
        self.redo_stack.push(entry);
        trace!("Undo: {} undo / {} redo entries", self.undo_stack.len(), self.redo_stack.len());
        Some(before)
    }

    /// Redo the most recently undone entry, returning the canvas to restore
    pub fn redo(&mut self) -> Option<CanvasSnapshot> {
        if self.has_provisional() {
            return None;
        }
        let entry = self.redo_stack.pop()?;
        let after = entry.after().cloned();
        self.undo_stack.push(entry);
        trace!("Redo: {} undo / {} redo entries", self.undo_stack.len(), self.redo_stack.len());
        after
    }

    /// Returns true if there are entries that can be undone
    pub fn can_undo(&self) -> bool {
        self.undo_stack.last().is_some_and(HistoryEntry::is_sealed)
    }

    /// Returns true if there are entries that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty() && !self.has_provisional()
    }

    /// Returns true while a gesture's entry is still open
    pub fn has_provisional(&self) -> bool {
        self.undo_stack.last().is_some_and(|entry| !entry.is_sealed())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop every entry
    pub fn clear_all(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
        if self.max_entries > 0 && self.undo_stack.len() > self.max_entries {
            let excess = self.undo_stack.len() - self.max_entries;
            self.undo_stack.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Stroke;
    use egui::{Color32, Pos2};

    fn snapshot(n: usize) -> CanvasSnapshot {
        (0..n)
            .map(|i| Stroke::new(Pos2::new(i as f32, 0.0), Color32::BLACK, 1.0, false).into_ref())
            .collect()
    }

    #[test]
    fn empty_stacks_are_silent() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn provisional_entries_are_sealed_once() {
        let mut history = History::new();
        history.begin(snapshot(0));
        assert!(history.has_provisional());
        assert!(!history.can_undo());
        assert!(history.undo().is_none());

        history.seal(snapshot(1)).unwrap();
        assert_eq!(history.seal(snapshot(2)), Err(HistoryError::NothingToSeal));
        assert!(history.can_undo());
    }

    #[test]
    fn seal_without_entry_fails() {
        let mut history = History::new();
        assert_eq!(history.seal(snapshot(1)), Err(HistoryError::NothingToSeal));
    }

    #[test]
    fn undo_redo_swap_entries() {
        let mut history = History::new();
        history.record(snapshot(0), snapshot(1));
        history.record(snapshot(1), snapshot(2));

        assert_eq!(history.undo().map(|s| s.len()), Some(1));
        assert_eq!(history.undo().map(|s| s.len()), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().map(|s| s.len()), Some(1));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn new_entries_clear_redo() {
        let mut history = History::new();
        history.record(snapshot(0), snapshot(1));
        history.undo();
        assert!(history.can_redo());
        history.begin(snapshot(0));
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = History::with_limit(2);
        for i in 0..5 {
            history.record(snapshot(i), snapshot(i + 1));
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo().map(|s| s.len()), Some(4));
        assert_eq!(history.undo().map(|s| s.len()), Some(3));
        assert!(history.undo().is_none());
    }
}
