//! Minimap: a miniature projection of the whole scene and its inverse.
//!
//! The projection is the autofit formula applied to a small fixed surface
//! instead of the main viewport, without the zoom cap: the whole scene always
//! fills the minimap. Clicks map back through the inverse projection to a
//! world point, which resolves to the frame under it or, failing that, the
//! frame whose center is nearest.

#[cfg(test)]
#[path = "minimap_test.rs"]
mod minimap_test;

use serde::Serialize;

use crate::camera::{Camera, Point, Rect, Viewport};
use crate::config::EngineConfig;
use crate::doc::{FrameId, FrameStore};
use crate::fit::fit_scale;
use crate::hit;

/// A frame's bounds in minimap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinimapRect {
    pub frame_id: FrameId,
    pub rect: Rect,
    /// The session's current frame; drawn highlighted.
    pub current: bool,
}

/// Projection of the scene into a minimap surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Minimap {
    /// Size of the minimap surface in pixels.
    pub size: Viewport,
    /// World units to minimap pixels.
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Frame rectangles in paint order.
    pub rects: Vec<MinimapRect>,
    /// The main camera's visible area, in minimap pixels.
    pub view_rect: Option<Rect>,
}

impl Minimap {
    /// Project every frame into a minimap of the configured size. `None`
    /// when the store is empty.
    #[must_use]
    pub fn project(
        store: &FrameStore,
        current: Option<FrameId>,
        camera: &Camera,
        main_viewport: Viewport,
        cfg: &EngineConfig,
    ) -> Option<Minimap> {
        let bounds = store.bounds()?;
        let size = Viewport::new(cfg.minimap_width, cfg.minimap_height);
        let pad = cfg.minimap_padding.min(size.width.min(size.height) * 0.25).max(0.0);
        let scale = fit_scale(bounds, size.width - pad * 2.0, size.height - pad * 2.0)
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(1.0);
        let center = bounds.center();
        let mc = size.center();

        let mut minimap = Minimap {
            size,
            scale,
            offset_x: mc.x - center.x * scale,
            offset_y: mc.y - center.y * scale,
            rects: Vec::with_capacity(store.len()),
            view_rect: None,
        };
        minimap.rects = store
            .frames()
            .iter()
            .map(|f| MinimapRect {
                frame_id: f.id,
                rect: minimap.project_rect(f.world_rect()),
                current: current == Some(f.id),
            })
            .collect();
        if !main_viewport.is_empty() {
            minimap.view_rect = Some(minimap.project_rect(camera.visible_world_rect(main_viewport)));
        }
        Some(minimap)
    }

    /// World point to minimap pixels.
    #[must_use]
    pub fn world_to_minimap(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.offset_x, world.y * self.scale + self.offset_y)
    }

    /// Minimap pixels back to an approximate world point.
    #[must_use]
    pub fn minimap_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.offset_x) / self.scale, (p.y - self.offset_y) / self.scale)
    }

    fn project_rect(&self, r: Rect) -> Rect {
        let tl = self.world_to_minimap(Point::new(r.x, r.y));
        Rect::new(tl.x, tl.y, r.width * self.scale, r.height * self.scale)
    }

    /// Frame a click at `p` (minimap pixels) should jump to.
    #[must_use]
    pub fn frame_at(&self, store: &FrameStore, p: Point) -> Option<FrameId> {
        let world = self.minimap_to_world(p);
        hit::frame_at(world, store).or_else(|| hit::nearest_frame(world, store))
    }
}
