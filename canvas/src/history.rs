//! Snapshot undo/redo.
//!
//! Every committed edit pushes a full copy of the undoable state taken just
//! before the edit. Snapshots hold frames and the path; the camera and the
//! selection are view state and are never rewound.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::doc::FrameStore;
use crate::path::Path;

/// The undoable part of a session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub store: FrameStore,
    pub path: Path,
}

/// Bounded undo and redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

impl History {
    /// History keeping at most `limit` undo steps. A limit of zero disables
    /// undo entirely.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { undo_stack: Vec::new(), redo_stack: Vec::new(), limit }
    }

    /// Record the state before a change. Clears the redo stack.
    pub fn push(&mut self, before: Snapshot) {
        self.redo_stack.clear();
        if self.limit == 0 {
            return;
        }
        self.undo_stack.push(before);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Step back: returns the state to restore, stashing `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
