//! Render projector: maps session state to a drawable scene description.
//!
//! This module never draws. It receives read-only views of the store, the
//! camera, the selection and the path and produces a flat list of
//! [`Primitive`]s in paint order, which a [`crate::scene::Scene`] backend turns
//! into pixels. The output is regenerated in full on every call; nothing is
//! patched incrementally.
//!
//! Paint order: each frame (rect, element previews, title label) bottom to
//! top, then path connectors, then path badges.
//!
//! Stroke widths, badge radii and label sizes are divided by the camera zoom
//! so they keep a constant size on screen.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::consts::{ARROW_ANGLE, ARROW_SIZE, BADGE_RADIUS_PX, CONNECTOR_ARROW_OFFSET, TITLE_FONT_PX};
use crate::doc::{ElementId, ElementKind, ElementStyle, Frame, FrameId, FrameStore, Size};
use crate::input::Selection;
use crate::path::Path;

const CURRENT_STROKE: &str = "#2563EB";
const SELECTED_STROKE: &str = "#F59E0B";
const CONNECTOR_STROKE: &str = "#64748B";
const BADGE_FILL: &str = "#2563EB";

/// Visual state of a frame. Current wins over selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameState {
    Current,
    Selected,
    Default,
}

/// One drawable item, in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    /// A frame's body and border.
    #[serde(rename_all = "camelCase")]
    FrameRect {
        frame_id: FrameId,
        /// Top-left corner; the rotation pivot.
        origin: Point,
        size: Size,
        rotation: f64,
        fill: String,
        stroke: String,
        stroke_width: f64,
        state: FrameState,
    },
    /// A frame title drawn above its top edge.
    #[serde(rename_all = "camelCase")]
    Label { frame_id: FrameId, text: String, position: Point, font_size: f64, rotation: f64 },
    /// Path position marker at a frame's top-left corner.
    #[serde(rename_all = "camelCase")]
    Badge { frame_id: FrameId, number: usize, center: Point, radius: f64, fill: String },
    /// Preview of one element inside its frame.
    #[serde(rename_all = "camelCase")]
    ElementPreview {
        frame_id: FrameId,
        element_id: ElementId,
        element_kind: ElementKind,
        content: String,
        origin: Point,
        size: Size,
        rotation: f64,
        style: ElementStyle,
    },
    /// Arrow between two consecutive path frames.
    #[serde(rename_all = "camelCase")]
    Connector {
        from: FrameId,
        to: FrameId,
        start: Point,
        end: Point,
        /// Arrowhead triangle: tip, then the two barbs.
        arrow: [Point; 3],
        stroke: String,
        stroke_width: f64,
    },
}

/// Complete projector output for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    /// Camera the primitives are meant to be drawn through.
    pub camera: Camera,
    pub primitives: Vec<Primitive>,
}

impl SceneDescription {
    /// Number of frame rectangles.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.primitives.iter().filter(|p| matches!(p, Primitive::FrameRect { .. })).count()
    }

    /// `(frame_id, number)` for every badge, in paint order.
    #[must_use]
    pub fn badges(&self) -> Vec<(FrameId, usize)> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Badge { frame_id, number, .. } => Some((*frame_id, *number)),
                _ => None,
            })
            .collect()
    }

    /// `(from, to)` for every connector, in path order.
    #[must_use]
    pub fn connectors(&self) -> Vec<(FrameId, FrameId)> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Connector { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Visual state assigned to a frame, if it was drawn.
    #[must_use]
    pub fn frame_state(&self, id: &FrameId) -> Option<FrameState> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::FrameRect { frame_id, state, .. } if frame_id == id => Some(*state),
            _ => None,
        })
    }
}

/// Read-only view of everything the projector depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub store: &'a FrameStore,
    pub camera: &'a Camera,
    pub selection: &'a Selection,
    pub current: Option<FrameId>,
    pub path: &'a Path,
    pub path_visible: bool,
    /// Presentation mode hides badges and connectors.
    pub presenting: bool,
    /// Live position of a frame being dragged, shown instead of its stored one.
    pub drag: Option<(FrameId, Point)>,
}

/// Project the full scene.
#[must_use]
pub fn project(input: &RenderInput<'_>) -> SceneDescription {
    let zoom = input.camera.zoom;
    let mut primitives = Vec::new();

    let frames: Vec<Frame> = input.store.frames().iter().map(|f| placed(f, input.drag)).collect();

    for frame in &frames {
        let state = frame_state(frame.id, input);
        primitives.push(frame_rect(frame, state, zoom));
        primitives.extend(element_previews(frame));
        primitives.push(label(frame, zoom));
    }

    if input.presenting {
        return SceneDescription { camera: *input.camera, primitives };
    }

    if input.path_visible {
        let centers: Vec<(FrameId, Point)> = input
            .path
            .ids()
            .iter()
            .filter_map(|id| frames.iter().find(|f| f.id == *id))
            .map(|f| (f.id, f.center()))
            .collect();
        for pair in centers.windows(2) {
            if let [(a, start), (b, end)] = pair
                && let Some(c) = connector(*a, *start, *b, *end, zoom)
            {
                primitives.push(c);
            }
        }
    }

    for (idx, id) in input.path.ids().iter().enumerate() {
        if let Some(frame) = frames.iter().find(|f| f.id == *id) {
            primitives.push(Primitive::Badge {
                frame_id: frame.id,
                number: idx + 1,
                center: frame.position,
                radius: BADGE_RADIUS_PX / zoom,
                fill: BADGE_FILL.to_owned(),
            });
        }
    }

    SceneDescription { camera: *input.camera, primitives }
}

/// The frame as it should be drawn: moved to the drag preview if it is the
/// one being dragged.
fn placed(frame: &Frame, drag: Option<(FrameId, Point)>) -> Frame {
    let mut f = frame.clone();
    if let Some((id, pos)) = drag
        && id == f.id
    {
        f.position = pos;
    }
    f
}

fn frame_state(id: FrameId, input: &RenderInput<'_>) -> FrameState {
    if input.current == Some(id) {
        FrameState::Current
    } else if input.selection.contains(&id) {
        FrameState::Selected
    } else {
        FrameState::Default
    }
}

fn frame_rect(frame: &Frame, state: FrameState, zoom: f64) -> Primitive {
    let (stroke, px) = match state {
        FrameState::Current => (CURRENT_STROKE.to_owned(), 3.0),
        FrameState::Selected => (SELECTED_STROKE.to_owned(), 2.0),
        FrameState::Default => (frame.border_color.clone(), 1.0),
    };
    Primitive::FrameRect {
        frame_id: frame.id,
        origin: frame.position,
        size: frame.scaled_size(),
        rotation: frame.rotation,
        fill: frame.background_color.clone(),
        stroke,
        stroke_width: px / zoom,
        state,
    }
}

fn element_previews(frame: &Frame) -> impl Iterator<Item = Primitive> + '_ {
    frame.elements.iter().map(move |el| Primitive::ElementPreview {
        frame_id: frame.id,
        element_id: el.id,
        element_kind: el.kind,
        content: el.content.clone(),
        origin: frame.element_origin(el),
        size: Size::new(el.size.width * frame.scale, el.size.height * frame.scale),
        rotation: frame.rotation + el.rotation,
        style: el.style.clone(),
    })
}

fn label(frame: &Frame, zoom: f64) -> Primitive {
    let font_size = TITLE_FONT_PX / zoom;
    let above = Point::new(frame.position.x, frame.position.y - font_size * 1.5);
    Primitive::Label {
        frame_id: frame.id,
        text: frame.title.clone(),
        position: above.rotated_around(frame.position, frame.rotation),
        font_size,
        rotation: frame.rotation,
    }
}

/// Straight connector from center to center. The arrow tip sits
/// [`CONNECTOR_ARROW_OFFSET`] before the end point. `None` when both centers
/// coincide.
fn connector(from: FrameId, start: Point, to: FrameId, end: Point, zoom: f64) -> Option<Primitive> {
    let len = start.distance(end);
    if len < f64::EPSILON {
        return None;
    }
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let back = CONNECTOR_ARROW_OFFSET.min(len);
    let tip = Point::new(end.x - back * angle.cos(), end.y - back * angle.sin());
    Some(Primitive::Connector {
        from,
        to,
        start,
        end,
        arrow: arrowhead(tip, angle),
        stroke: CONNECTOR_STROKE.to_owned(),
        stroke_width: 2.0 / zoom,
    })
}

fn arrowhead(tip: Point, angle: f64) -> [Point; 3] {
    let b1 = Point::new(tip.x - ARROW_SIZE * (angle - ARROW_ANGLE).cos(), tip.y - ARROW_SIZE * (angle - ARROW_ANGLE).sin());
    let b2 = Point::new(tip.x - ARROW_SIZE * (angle + ARROW_ANGLE).cos(), tip.y - ARROW_SIZE * (angle + ARROW_ANGLE).sin());
    [tip, b1, b2]
}
