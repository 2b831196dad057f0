//! Document model: frames, the elements they own, and the in-memory store.
//!
//! This module defines what is on the canvas (`Frame`, `Element`), sparse
//! update types for incremental edits (`PartialFrame`, `PartialElement`),
//! creation specs (`FrameSpec`, `ElementSpec`), and the runtime store that
//! owns every live frame (`FrameStore`), plus the persisted `Document` shape.
//!
//! Frames are kept in a `Vec` whose order is paint order: index 0 is drawn
//! first (bottom), the last frame is drawn on top. Elements inside a frame
//! follow the same rule. Every id-addressed mutation on a missing frame or
//! element is a no-op that reports `false` / `None`; nothing here panics on a
//! stale id.
//!
//! The store knows nothing about the path, the camera, or selection. Cascading
//! a frame deletion into those is the job of [`crate::engine::EditorSession`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Rect};
use crate::consts::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::error::EngineError;

/// Unique identifier for a frame.
pub type FrameId = Uuid;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// The kind of content an element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Text block; `content` is the text.
    Text,
    /// Vector shape; `content` names the shape (e.g. `"rect"`, `"ellipse"`).
    Shape,
    /// Raster image; `content` is the source URL.
    Image,
    /// Embedded video; `content` is the source URL.
    Video,
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Visual style of an element. Which fields matter depends on the kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ElementStyle {
    /// Overwrite every field that is set in `other`.
    pub fn merge(&mut self, other: &ElementStyle) {
        if let Some(v) = other.font_size {
            self.font_size = Some(v);
        }
        if let Some(v) = &other.font_family {
            self.font_family = Some(v.clone());
        }
        if let Some(v) = &other.fill {
            self.fill = Some(v.clone());
        }
        if let Some(v) = &other.stroke {
            self.stroke = Some(v.clone());
        }
        if let Some(v) = other.stroke_width {
            self.stroke_width = Some(v);
        }
        if let Some(v) = other.opacity {
            self.opacity = Some(v.clamp(0.0, 1.0));
        }
    }

    /// Fill color. Defaults to `"#D94B4B"` when absent.
    #[must_use]
    pub fn fill_or_default(&self) -> &str {
        self.fill.as_deref().unwrap_or("#D94B4B")
    }

    /// Stroke color. Defaults to `"#1F1A17"` when absent.
    #[must_use]
    pub fn stroke_or_default(&self) -> &str {
        self.stroke.as_deref().unwrap_or("#1F1A17")
    }

    /// Stroke width in world units. Defaults to `1.0` when absent.
    #[must_use]
    pub fn stroke_width_or_default(&self) -> f64 {
        self.stroke_width.unwrap_or(1.0)
    }

    /// Opacity in `[0, 1]`. Defaults to fully opaque.
    #[must_use]
    pub fn opacity_or_default(&self) -> f64 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Font size in world units. Defaults to `24.0`.
    #[must_use]
    pub fn font_size_or_default(&self) -> f64 {
        self.font_size.unwrap_or(24.0)
    }
}

/// A primitive placed inside a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub content: String,
    /// Offset from the frame's top-left corner, in frame-local units.
    pub position: Point,
    pub size: Size,
    /// Clockwise rotation in degrees, relative to the frame.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub style: ElementStyle,
}

fn default_scale() -> f64 {
    1.0
}

fn default_background() -> String {
    "#FFFFFF".to_owned()
}

fn default_border() -> String {
    "#CBD5E1".to_owned()
}

/// A slide placed freely in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: FrameId,
    #[serde(default)]
    pub title: String,
    /// Top-left corner in world coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the top-left corner.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_border")]
    pub border_color: String,
    #[serde(default)]
    pub locked: bool,
    /// Owned elements in paint order (index 0 is the back).
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Frame {
    /// Width and height after applying `scale`.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        Size { width: self.width * self.scale, height: self.height * self.scale }
    }

    /// Map a frame-local point (unscaled, relative to the top-left corner)
    /// into world space through the frame's scale and rotation.
    #[must_use]
    pub fn local_to_world(&self, local: Point) -> Point {
        let scaled = Point::new(self.position.x + local.x * self.scale, self.position.y + local.y * self.scale);
        scaled.rotated_around(self.position, self.rotation)
    }

    /// Inverse of [`Frame::local_to_world`].
    #[must_use]
    pub fn world_to_local(&self, world: Point) -> Point {
        let unrotated = world.rotated_around(self.position, -self.rotation);
        let scale = if self.scale.abs() > f64::EPSILON { self.scale } else { 1.0 };
        Point::new((unrotated.x - self.position.x) / scale, (unrotated.y - self.position.y) / scale)
    }

    /// The four world-space corners, clockwise from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.local_to_world(Point::new(0.0, 0.0)),
            self.local_to_world(Point::new(self.width, 0.0)),
            self.local_to_world(Point::new(self.width, self.height)),
            self.local_to_world(Point::new(0.0, self.height)),
        ]
    }

    /// Axis-aligned world-space bounds. Equal to the frame rectangle when the
    /// frame is not rotated.
    #[must_use]
    pub fn world_rect(&self) -> Rect {
        let size = self.scaled_size();
        Rect::bounding(self.corners()).unwrap_or(Rect::new(self.position.x, self.position.y, size.width, size.height))
    }

    /// World-space center of the frame.
    #[must_use]
    pub fn center(&self) -> Point {
        self.local_to_world(Point::new(self.width * 0.5, self.height * 0.5))
    }

    /// Whether `world` falls inside the (possibly rotated) frame.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        let local = self.world_to_local(world);
        Rect::new(0.0, 0.0, self.width, self.height).contains(local)
    }

    /// World-space origin of `element`: the frame position plus the element
    /// offset, carried through the frame's transform.
    #[must_use]
    pub fn element_origin(&self, element: &Element) -> Point {
        self.local_to_world(element.position)
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == *id)
    }

    fn element_index(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == *id)
    }
}

/// Parameters for creating a frame. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameSpec {
    pub title: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale: f64,
    pub background_color: String,
    pub border_color: String,
    pub locked: bool,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            position: Point::default(),
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            rotation: 0.0,
            scale: 1.0,
            background_color: default_background(),
            border_color: default_border(),
            locked: false,
        }
    }
}

impl FrameSpec {
    /// Spec for an untitled frame of the given size at `(x, y)`.
    #[must_use]
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { position: Point::new(x, y), width, height, ..Self::default() }
    }

    #[must_use]
    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }
}

/// Parameters for creating an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub content: String,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub style: ElementStyle,
}

impl ElementSpec {
    #[must_use]
    pub fn new(kind: ElementKind, content: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            content: content.to_owned(),
            position: Point::new(x, y),
            size: Size::new(width, height),
            rotation: 0.0,
            style: ElementStyle::default(),
        }
    }
}

/// Sparse update for a frame. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Ignored unless positive and finite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Ignored unless positive and finite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Ignored unless positive and finite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl PartialFrame {
    /// Partial that only moves the frame.
    #[must_use]
    pub fn moved_to(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }
}

/// Sparse update for an element. Only present fields are applied; `style`
/// is merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

/// Direction of a single-step paint-order swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerStep {
    /// Swap with the neighbour drawn just above.
    Forward,
    /// Swap with the neighbour drawn just below.
    Backward,
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Swap `items[idx]` with its neighbour in `step` direction. `false` at the
/// ends of the list.
fn swap_step<T>(items: &mut [T], idx: usize, step: LayerStep) -> bool {
    let other = match step {
        LayerStep::Forward => idx + 1,
        LayerStep::Backward => match idx.checked_sub(1) {
            Some(i) => i,
            None => return false,
        },
    };
    if other >= items.len() {
        return false;
    }
    items.swap(idx, other);
    true
}

/// In-memory store of frames in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStore {
    frames: Vec<Frame>,
}

impl FrameStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// All frames in paint order (bottom first).
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Return a reference to a frame by id.
    #[must_use]
    pub fn get(&self, id: &FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == *id)
    }

    fn get_mut(&mut self, id: &FrameId) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &FrameId) -> bool {
        self.get(id).is_some()
    }

    /// Paint-order index of a frame.
    #[must_use]
    pub fn index_of(&self, id: &FrameId) -> Option<usize> {
        self.frames.iter().position(|f| f.id == *id)
    }

    /// Number of frames currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the store contains no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Replace all frames with `frames`, keeping their order.
    pub fn load(&mut self, frames: Vec<Frame>) {
        self.frames = frames;
    }

    /// Create a frame on top of the paint order and return its id.
    ///
    /// A non-positive or non-finite size falls back to the default frame
    /// size, a non-positive scale to `1.0` and a non-finite position to the
    /// origin.
    pub fn add_frame(&mut self, spec: FrameSpec) -> FrameId {
        let id = Uuid::new_v4();
        let (width, height) = if positive(spec.width) && positive(spec.height) {
            (spec.width, spec.height)
        } else {
            (DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT)
        };
        self.frames.push(Frame {
            id,
            title: spec.title,
            position: if spec.position.is_finite() { spec.position } else { Point::default() },
            width,
            height,
            rotation: if spec.rotation.is_finite() { spec.rotation } else { 0.0 },
            scale: if positive(spec.scale) { spec.scale } else { 1.0 },
            background_color: spec.background_color,
            border_color: spec.border_color,
            locked: spec.locked,
            elements: Vec::new(),
        });
        tracing::debug!(%id, "frame added");
        id
    }

    /// Insert a fully-formed frame, replacing any frame with the same id in
    /// place. New frames go on top.
    pub fn insert_frame(&mut self, frame: Frame) {
        if let Some(existing) = self.get_mut(&frame.id) {
            *existing = frame;
        } else {
            self.frames.push(frame);
        }
    }

    /// Apply a partial update. Returns `false` if the frame doesn't exist.
    pub fn update_frame(&mut self, id: &FrameId, partial: &PartialFrame) -> bool {
        let Some(frame) = self.get_mut(id) else {
            tracing::debug!(%id, "update on missing frame ignored");
            return false;
        };
        if let Some(title) = &partial.title {
            frame.title.clone_from(title);
        }
        if let Some(p) = partial.position.filter(|p| p.is_finite()) {
            frame.position = p;
        }
        if let Some(w) = partial.width.filter(|w| positive(*w)) {
            frame.width = w;
        }
        if let Some(h) = partial.height.filter(|h| positive(*h)) {
            frame.height = h;
        }
        if let Some(r) = partial.rotation.filter(|r| r.is_finite()) {
            frame.rotation = r;
        }
        if let Some(s) = partial.scale.filter(|s| positive(*s)) {
            frame.scale = s;
        }
        if let Some(c) = &partial.background_color {
            frame.background_color.clone_from(c);
        }
        if let Some(c) = &partial.border_color {
            frame.border_color.clone_from(c);
        }
        if let Some(l) = partial.locked {
            frame.locked = l;
        }
        true
    }

    /// Remove a frame and, with it, all of its elements.
    pub fn remove_frame(&mut self, id: &FrameId) -> Option<Frame> {
        let idx = self.index_of(id)?;
        Some(self.frames.remove(idx))
    }

    /// Copy a frame (and its elements, under fresh ids) offset by `offset` on
    /// both axes. The copy is placed directly above the source in paint order.
    pub fn duplicate_frame(&mut self, id: &FrameId, offset: f64) -> Option<FrameId> {
        let idx = self.index_of(id)?;
        let mut copy = self.frames[idx].clone();
        copy.id = Uuid::new_v4();
        copy.position = Point::new(copy.position.x + offset, copy.position.y + offset);
        for el in &mut copy.elements {
            el.id = Uuid::new_v4();
        }
        let new_id = copy.id;
        self.frames.insert(idx + 1, copy);
        tracing::debug!(source = %id, copy = %new_id, "frame duplicated");
        Some(new_id)
    }

    /// Swap a frame with its immediate paint-order neighbour.
    pub fn step_frame(&mut self, id: &FrameId, step: LayerStep) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        swap_step(&mut self.frames, idx, step)
    }

    /// Find an element anywhere in the store, with its owning frame id.
    #[must_use]
    pub fn find_element(&self, id: &ElementId) -> Option<(FrameId, &Element)> {
        self.frames
            .iter()
            .find_map(|f| f.element(id).map(|e| (f.id, e)))
    }

    /// Add an element on top of a frame's paint order.
    pub fn add_element(&mut self, frame_id: &FrameId, spec: ElementSpec) -> Option<ElementId> {
        let frame = self.get_mut(frame_id)?;
        let id = Uuid::new_v4();
        frame.elements.push(Element {
            id,
            kind: spec.kind,
            content: spec.content,
            position: if spec.position.is_finite() { spec.position } else { Point::default() },
            size: spec.size,
            rotation: spec.rotation,
            style: spec.style,
        });
        Some(id)
    }

    /// Apply a partial update to an element. Returns `false` if either the
    /// frame or the element doesn't exist.
    pub fn update_element(&mut self, frame_id: &FrameId, element_id: &ElementId, partial: &PartialElement) -> bool {
        let Some(el) = self
            .get_mut(frame_id)
            .and_then(|f| f.elements.iter_mut().find(|e| e.id == *element_id))
        else {
            tracing::debug!(%frame_id, %element_id, "update on missing element ignored");
            return false;
        };
        if let Some(c) = &partial.content {
            el.content.clone_from(c);
        }
        if let Some(p) = partial.position.filter(|p| p.is_finite()) {
            el.position = p;
        }
        if let Some(s) = partial.size.filter(|s| positive(s.width) && positive(s.height)) {
            el.size = s;
        }
        if let Some(r) = partial.rotation.filter(|r| r.is_finite()) {
            el.rotation = r;
        }
        if let Some(style) = &partial.style {
            el.style.merge(style);
        }
        true
    }

    /// Remove an element from its frame.
    pub fn delete_element(&mut self, frame_id: &FrameId, element_id: &ElementId) -> Option<Element> {
        let frame = self.get_mut(frame_id)?;
        let idx = frame.element_index(element_id)?;
        Some(frame.elements.remove(idx))
    }

    /// Copy an element within its frame, offset by `offset`, placed directly
    /// above the source.
    pub fn duplicate_element(&mut self, frame_id: &FrameId, element_id: &ElementId, offset: f64) -> Option<ElementId> {
        let frame = self.get_mut(frame_id)?;
        let idx = frame.element_index(element_id)?;
        let mut copy = frame.elements[idx].clone();
        copy.id = Uuid::new_v4();
        copy.position = Point::new(copy.position.x + offset, copy.position.y + offset);
        let new_id = copy.id;
        frame.elements.insert(idx + 1, copy);
        Some(new_id)
    }

    /// Swap an element with its immediate paint-order neighbour. This is a
    /// one-position move, not a jump to the front or back.
    pub fn step_element(&mut self, frame_id: &FrameId, element_id: &ElementId, step: LayerStep) -> bool {
        let Some(frame) = self.get_mut(frame_id) else {
            return false;
        };
        let Some(idx) = frame.element_index(element_id) else {
            return false;
        };
        swap_step(&mut frame.elements, idx, step)
    }

    /// Axis-aligned world bounds of every frame. `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.frames
            .iter()
            .map(Frame::world_rect)
            .reduce(Rect::union)
    }
}

/// The persisted document: frames in paint order, the presentation path and
/// the current frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub path: Vec<FrameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_frame_id: Option<FrameId>,
}

impl Document {
    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] on malformed JSON and the
    /// [`Document::validate`] errors otherwise.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the structural invariants the store relies on: unique frame ids,
    /// positive finite sizes and scales, finite positions and rotations.
    /// Dangling path entries are not an error here; loading drops them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateFrame`], [`EngineError::InvalidFrameSize`]
    /// or [`EngineError::InvalidFrameTransform`].
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut seen = std::collections::HashSet::with_capacity(self.frames.len());
        for frame in &self.frames {
            if !seen.insert(frame.id) {
                return Err(EngineError::DuplicateFrame(frame.id));
            }
            if !positive(frame.width) || !positive(frame.height) {
                return Err(EngineError::InvalidFrameSize { id: frame.id, width: frame.width, height: frame.height });
            }
            if !positive(frame.scale) || !frame.position.is_finite() || !frame.rotation.is_finite() {
                return Err(EngineError::InvalidFrameTransform(frame.id));
            }
        }
        Ok(())
    }
}
