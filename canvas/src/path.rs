//! Presentation path: the ordered list of frame ids a presentation walks.
//!
//! The path is independent of spatial placement and of paint order. It holds
//! no cursor of its own; the current frame lives on the session, and its
//! position in the path is computed on demand with [`Path::index_of`]. A frame
//! that is not on the path simply has no position.
//!
//! A frame id appears at most once. Navigation resolves the current position
//! by lookup, so a repeated id would make "next" ambiguous.
//!
//! Every editing operation here is a plain list operation with no knowledge of
//! the store, so callers pass an existence check where one is needed.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use serde::{Deserialize, Serialize};

use crate::doc::FrameId;

/// Ordered, duplicate-free list of frame ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    ids: Vec<FrameId>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from `ids`, dropping repeats (first occurrence wins).
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = FrameId>) -> Self {
        let mut path = Self::new();
        for id in ids {
            path.push_unique(id);
        }
        path
    }

    fn push_unique(&mut self, id: FrameId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    #[must_use]
    pub fn ids(&self) -> &[FrameId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &FrameId) -> bool {
        self.ids.contains(id)
    }

    /// Position of `id` in the path, or `None` when it is off-path.
    #[must_use]
    pub fn index_of(&self, id: &FrameId) -> Option<usize> {
        self.ids.iter().position(|p| p == id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<FrameId> {
        self.ids.get(index).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<FrameId> {
        self.ids.first().copied()
    }

    /// Replace the whole path. Ids failing `exists` and repeated ids are dropped.
    pub fn set(&mut self, ids: impl IntoIterator<Item = FrameId>, exists: impl Fn(&FrameId) -> bool) {
        *self = Self::from_ids(ids.into_iter().filter(|id| exists(id)));
    }

    /// Append `id`. Returns `false` (no change) if it is already on the path.
    pub fn add(&mut self, id: FrameId) -> bool {
        self.push_unique(id)
    }

    /// Remove `id` wherever it appears. Returns whether anything was removed.
    pub fn remove(&mut self, id: &FrameId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|p| p != id);
        self.ids.len() != before
    }

    /// Remove the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<FrameId> {
        if index >= self.ids.len() {
            return None;
        }
        Some(self.ids.remove(index))
    }

    /// Move the entry at `from` so that it ends up at index `to`.
    ///
    /// Both indices refer to the list before the move. Out-of-range indices
    /// leave the path untouched and return `false`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.ids.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
        true
    }

    /// Drop every id that fails `exists`. Returns the removed ids.
    pub fn retain_existing(&mut self, exists: impl Fn(&FrameId) -> bool) -> Vec<FrameId> {
        let (kept, dropped): (Vec<FrameId>, Vec<FrameId>) = self.ids.iter().copied().partition(|id| exists(id));
        self.ids = kept;
        dropped
    }

    /// Index reached by stepping forward from `current`, clamped to the last
    /// entry. Off-path (`None`) steps onto the first entry. `None` when the
    /// path is empty.
    #[must_use]
    pub fn next_index(&self, current: Option<usize>) -> Option<usize> {
        let last = self.ids.len().checked_sub(1)?;
        Some(current.map_or(0, |i| (i + 1).min(last)))
    }

    /// Index reached by stepping backward from `current`, clamped to `0`.
    /// Off-path steps onto the first entry. `None` when the path is empty.
    #[must_use]
    pub fn previous_index(&self, current: Option<usize>) -> Option<usize> {
        let last = self.ids.len().checked_sub(1)?;
        Some(current.map_or(0, |i| i.saturating_sub(1).min(last)))
    }
}
