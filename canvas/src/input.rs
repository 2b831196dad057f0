//! Input model: modifier keys, mouse buttons, selection, and the gesture state machine.
//!
//! `Modifiers`, `Button`, `Key` and `WheelDelta` describe a raw event as the
//! host reports it. `Selection` is the persistent UI selection the renderer
//! reads. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying what is needed to preview a drag and
//! commit it once on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{ElementId, FrameId};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"ArrowRight"`, `"+"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Key name; single characters compare case-insensitively.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        if self.0.chars().count() == 1 {
            self.0.eq_ignore_ascii_case(name)
        } else {
            self.0 == name
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Where a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Clicked on the canvas; the camera stays put.
    #[default]
    Canvas,
    /// Picked from outside the canvas (e.g. a side panel); the camera moves
    /// to keep the target visible.
    External,
}

/// Persistent selection visible to the renderer and the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Selected frames; the first entry is the primary selection.
    pub frame_ids: Vec<FrameId>,
    /// Selected element inside the primary frame, if any.
    pub element_id: Option<ElementId>,
    pub mode: SelectionMode,
}

impl Selection {
    /// The primary selected frame.
    #[must_use]
    pub fn primary(&self) -> Option<FrameId> {
        self.frame_ids.first().copied()
    }

    #[must_use]
    pub fn contains(&self, id: &FrameId) -> bool {
        self.frame_ids.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame_ids.is_empty() && self.element_id.is_none()
    }

    /// Replace the selection with a single frame.
    pub fn select_only(&mut self, id: FrameId, mode: SelectionMode) {
        self.frame_ids = vec![id];
        self.element_id = None;
        self.mode = mode;
    }

    /// Add `id` if absent, remove it if present. Toggling the primary frame
    /// off also drops the element selection.
    pub fn toggle(&mut self, id: FrameId) {
        if let Some(idx) = self.frame_ids.iter().position(|f| *f == id) {
            self.frame_ids.remove(idx);
            if idx == 0 {
                self.element_id = None;
            }
        } else {
            self.frame_ids.push(id);
        }
        self.mode = SelectionMode::Canvas;
    }

    /// Drop a frame from the selection. Returns `true` if it was selected.
    pub fn remove_frame(&mut self, id: &FrameId) -> bool {
        let was_primary = self.primary() == Some(*id);
        let before = self.frame_ids.len();
        self.frame_ids.retain(|f| f != id);
        if was_primary {
            self.element_id = None;
        }
        self.frame_ids.len() != before
    }

    pub fn clear(&mut self) {
        self.frame_ids.clear();
        self.element_id = None;
        self.mode = SelectionMode::Canvas;
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas by dragging empty space.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is moving a frame. The store is not touched until release.
    DraggingFrame {
        /// Id of the frame being dragged.
        id: FrameId,
        /// World-space pointer position at pointer-down.
        start_world: Point,
        /// Frame position at the start of the drag.
        orig: Point,
        /// Live position shown while dragging.
        preview: Point,
    },
}

impl InputState {
    /// The live drag position for `id`, if it is being dragged.
    #[must_use]
    pub fn drag_preview(&self) -> Option<(FrameId, Point)> {
        match self {
            Self::DraggingFrame { id, preview, .. } => Some((*id, *preview)),
            _ => None,
        }
    }
}
