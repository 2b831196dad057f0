//! Drawing backend seam.
//!
//! A [`Scene`] is whatever retains drawable shapes and reports pointer events
//! on them: a canvas 2D context, a retained-mode graphics library, or the
//! in-memory [`MemoryScene`] used headless and in tests. The engine only ever
//! talks to a backend through [`ScenePresenter`], which replaces the previous
//! projection wholesale with the next one.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::BTreeMap;

use crate::camera::Point;
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::render::{Primitive, SceneDescription};

/// Backend-assigned shape handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

/// Event category a handler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    DoubleClick,
    Wheel,
    KeyDown,
}

/// A raw input event reported by a backend, in screen coordinates.
#[derive(Debug, Clone)]
pub enum SceneEvent {
    PointerDown { screen: Point, button: Button, modifiers: Modifiers },
    PointerMove { screen: Point, modifiers: Modifiers },
    PointerUp { screen: Point, button: Button, modifiers: Modifiers },
    DoubleClick { screen: Point },
    Wheel { screen: Point, delta: WheelDelta, modifiers: Modifiers },
    KeyDown { key: Key, modifiers: Modifiers },
}

impl SceneEvent {
    #[must_use]
    pub fn kind(&self) -> SceneEventKind {
        match self {
            Self::PointerDown { .. } => SceneEventKind::PointerDown,
            Self::PointerMove { .. } => SceneEventKind::PointerMove,
            Self::PointerUp { .. } => SceneEventKind::PointerUp,
            Self::DoubleClick { .. } => SceneEventKind::DoubleClick,
            Self::Wheel { .. } => SceneEventKind::Wheel,
            Self::KeyDown { .. } => SceneEventKind::KeyDown,
        }
    }
}

/// Callback invoked for every event of the subscribed kind.
pub type SceneHandler = Box<dyn FnMut(&SceneEvent)>;

/// A retained drawing surface.
pub trait Scene {
    /// Retain `shape` and return its handle.
    fn add_shape(&mut self, shape: Primitive) -> ShapeId;

    /// Drop a shape. Returns `false` for an unknown handle.
    fn remove_shape(&mut self, id: ShapeId) -> bool;

    /// Subscribe `handler` to events of `kind`.
    fn on(&mut self, kind: SceneEventKind, handler: SceneHandler);
}

/// Keeps track of what was last pushed to a [`Scene`] so the next projection
/// can replace it.
#[derive(Debug, Default)]
pub struct ScenePresenter {
    shapes: Vec<ShapeId>,
}

impl ScenePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles currently on the scene, in paint order.
    #[must_use]
    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    /// Remove every shape from the previous call and add `desc` in full.
    /// Returns the number of shapes added.
    pub fn present(&mut self, scene: &mut impl Scene, desc: &SceneDescription) -> usize {
        for id in self.shapes.drain(..) {
            if !scene.remove_shape(id) {
                tracing::debug!(shape = id.0, "shape already gone from scene");
            }
        }
        self.shapes = desc.primitives.iter().map(|p| scene.add_shape(p.clone())).collect();
        self.shapes.len()
    }
}

/// In-memory backend: keeps shapes in a map and dispatches events on demand.
#[derive(Default)]
pub struct MemoryScene {
    next_id: u64,
    shapes: BTreeMap<ShapeId, Primitive>,
    handlers: Vec<(SceneEventKind, SceneHandler)>,
}

impl MemoryScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Primitive> {
        self.shapes.get(&id)
    }

    /// Retained shapes in handle order, which is insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Primitive> {
        self.shapes.values()
    }

    /// Deliver `event` to every handler subscribed to its kind. Returns the
    /// number of handlers invoked.
    pub fn emit(&mut self, event: &SceneEvent) -> usize {
        let kind = event.kind();
        let mut count = 0;
        for (k, handler) in &mut self.handlers {
            if *k == kind {
                handler(event);
                count += 1;
            }
        }
        count
    }
}

impl std::fmt::Debug for MemoryScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryScene")
            .field("shapes", &self.shapes.len())
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl Scene for MemoryScene {
    fn add_shape(&mut self, shape: Primitive) -> ShapeId {
        self.next_id += 1;
        let id = ShapeId(self.next_id);
        self.shapes.insert(id, shape);
        id
    }

    fn remove_shape(&mut self, id: ShapeId) -> bool {
        self.shapes.remove(&id).is_some()
    }

    fn on(&mut self, kind: SceneEventKind, handler: SceneHandler) {
        self.handlers.push((kind, handler));
    }
}
