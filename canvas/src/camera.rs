//! Camera: the zoom + pan transform between world space and screen space.
//!
//! The transform is a pure scale followed by a translation:
//! `screen = world * zoom + pan`. There is no rotation or skew, so the inverse
//! is `world = (screen - pan) / zoom`. Every zoom that enters the camera is
//! clamped by [`ZoomLimits`] first, which keeps the transform invertible.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate this point by `degrees` (clockwise in screen space) around `pivot`.
    #[must_use]
    pub fn rotated_around(self, pivot: Point, degrees: f64) -> Point {
        if degrees.abs() < f64::EPSILON {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point { x: pivot.x + dx * cos - dy * sin, y: pivot.y + dx * sin + dy * cos }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing all `points`. `None` when empty.
    #[must_use]
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y })
    }

    /// Smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Rect { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.x + self.width * 0.5, y: self.y + self.height * 0.5 }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect { x: self.x - margin, y: self.y - margin, width: self.width + margin * 2.0, height: self.height + margin * 2.0 }
    }
}

/// Size of a drawing surface in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.width * 0.5, y: self.height * 0.5 }
    }

    /// A viewport with no drawable area cannot be fitted into.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Inclusive zoom bounds applied before any zoom reaches the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: ZOOM_MIN, max: ZOOM_MAX }
    }
}

impl ZoomLimits {
    /// Clamp `zoom` into range. Non-finite input maps to `min`.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_finite() { zoom.clamp(self.min, self.max) } else { self.min }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self { pan_x, pan_y, zoom }
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// The world-space rectangle currently visible through `viewport`.
    #[must_use]
    pub fn visible_world_rect(&self, viewport: Viewport) -> Rect {
        let top_left = self.screen_to_world(Point::new(0.0, 0.0));
        Rect {
            x: top_left.x,
            y: top_left.y,
            width: viewport.width / self.zoom,
            height: viewport.height / self.zoom,
        }
    }

    /// Multiply zoom by `step`, anchored at the viewport center.
    pub fn zoom_in(&mut self, step: f64, viewport: Viewport, limits: ZoomLimits) {
        self.zoom_to_point(viewport.center(), self.zoom * step, limits);
    }

    /// Divide zoom by `step`, anchored at the viewport center.
    pub fn zoom_out(&mut self, step: f64, viewport: Viewport, limits: ZoomLimits) {
        self.zoom_to_point(viewport.center(), self.zoom / step, limits);
    }

    /// Translate the view by a screen-space drag delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Change zoom while keeping the world point under `screen` fixed on screen.
    pub fn zoom_to_point(&mut self, screen: Point, target_zoom: f64, limits: ZoomLimits) {
        let anchor = self.screen_to_world(screen);
        self.zoom = limits.clamp(target_zoom);
        self.pan_x = screen.x - anchor.x * self.zoom;
        self.pan_y = screen.y - anchor.y * self.zoom;
    }

    /// Directly set zoom (clamped), leaving pan untouched.
    pub fn set_zoom(&mut self, zoom: f64, limits: ZoomLimits) {
        self.zoom = limits.clamp(zoom);
    }

    /// Directly set pan.
    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
    }

    /// Return a copy whose zoom has been clamped and whose pan is finite.
    #[must_use]
    pub fn sanitized(self, limits: ZoomLimits) -> Camera {
        Camera {
            zoom: limits.clamp(self.zoom),
            pan_x: if self.pan_x.is_finite() { self.pan_x } else { 0.0 },
            pan_y: if self.pan_y.is_finite() { self.pan_y } else { 0.0 },
        }
    }
}
