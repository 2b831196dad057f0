//! Hit-testing: resolve a world point against the frame store.
//!
//! Screen input is inverse-transformed by the caller ([`crate::camera::Camera::screen_to_world`])
//! before it reaches this module. Frames are tested topmost first (reverse
//! paint order), and inside a frame its elements are tested the same way.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Rect};
use crate::doc::{Element, ElementId, Frame, FrameId, FrameStore};

/// Which part of a frame was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// Frame background, outside every element.
    Body,
    /// One of the frame's elements.
    Element(ElementId),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub frame_id: FrameId,
    pub part: HitPart,
}

impl Hit {
    #[must_use]
    pub fn element_id(&self) -> Option<ElementId> {
        match self.part {
            HitPart::Element(id) => Some(id),
            HitPart::Body => None,
        }
    }
}

/// Test which frame (and element) is under `world_pt`.
#[must_use]
pub fn hit_test(world_pt: Point, store: &FrameStore) -> Option<Hit> {
    let frame = topmost_frame(world_pt, store)?;
    let part = element_at(world_pt, frame).map_or(HitPart::Body, HitPart::Element);
    Some(Hit { frame_id: frame.id, part })
}

/// The topmost frame containing `world_pt`.
#[must_use]
pub fn frame_at(world_pt: Point, store: &FrameStore) -> Option<FrameId> {
    topmost_frame(world_pt, store).map(|f| f.id)
}

fn topmost_frame(world_pt: Point, store: &FrameStore) -> Option<&Frame> {
    store.frames().iter().rev().find(|f| f.contains(world_pt))
}

/// The frame whose center is closest to `world_pt`. Ties go to the topmost.
#[must_use]
pub fn nearest_frame(world_pt: Point, store: &FrameStore) -> Option<FrameId> {
    store
        .frames()
        .iter()
        .rev()
        .map(|f| (f.id, f.center().distance(world_pt)))
        .reduce(|best, cand| if cand.1 < best.1 { cand } else { best })
        .map(|(id, _)| id)
}

/// The topmost element of `frame` under `world_pt`.
#[must_use]
pub fn element_at(world_pt: Point, frame: &Frame) -> Option<ElementId> {
    let local = frame.world_to_local(world_pt);
    frame
        .elements
        .iter()
        .rev()
        .find(|el| element_contains(el, local))
        .map(|el| el.id)
}

fn element_contains(el: &Element, frame_local: Point) -> bool {
    let p = frame_local.rotated_around(el.position, -el.rotation);
    Rect::new(el.position.x, el.position.y, el.size.width, el.size.height).contains(p)
}
