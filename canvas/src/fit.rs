//! Autofit: camera parameters that fit a world rectangle into a viewport.
//!
//! `zoom = min(avail_w / rect_w, avail_h / rect_h)`, capped so a lone small
//! frame is not magnified absurdly, then clamped into the camera's zoom
//! limits. Pan places the rectangle's center at the viewport center. The
//! minimap reuses [`fit_scale`] against its own small surface.

#[cfg(test)]
#[path = "fit_test.rs"]
mod fit_test;

use crate::camera::{Camera, Rect, Viewport, ZoomLimits};
use crate::config::EngineConfig;
use crate::doc::{Frame, FrameStore};

/// Knobs for a single fit computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Screen-space margin kept on every side of the fitted rectangle.
    pub margin_px: f64,
    /// Upper bound on the resulting zoom.
    pub zoom_cap: f64,
    pub limits: ZoomLimits,
}

impl FitOptions {
    /// Options for fitting the whole scene: no margin.
    #[must_use]
    pub fn scene(cfg: &EngineConfig) -> Self {
        Self { margin_px: 0.0, zoom_cap: cfg.fit_zoom_cap, limits: cfg.zoom_limits() }
    }

    /// Options for fitting one frame: the configured pixel margin.
    #[must_use]
    pub fn frame(cfg: &EngineConfig) -> Self {
        Self { margin_px: cfg.fit_margin_px, zoom_cap: cfg.fit_zoom_cap, limits: cfg.zoom_limits() }
    }
}

/// Uncapped scale that fits `rect` into `avail_w × avail_h`. Degenerate
/// rectangle axes are ignored; a rectangle degenerate on both axes has no
/// finite fit and yields `None`.
#[must_use]
pub fn fit_scale(rect: Rect, avail_w: f64, avail_h: f64) -> Option<f64> {
    let sx = (rect.width > 0.0).then(|| avail_w / rect.width);
    let sy = (rect.height > 0.0).then(|| avail_h / rect.height);
    match (sx, sy) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Camera that centers `rect` in `viewport` at the largest zoom allowed by
/// `opts`. `None` when the viewport has no area.
#[must_use]
pub fn fit_rect(rect: Rect, viewport: Viewport, opts: FitOptions) -> Option<Camera> {
    if viewport.is_empty() {
        return None;
    }
    let margin = if opts.margin_px * 2.0 < viewport.width.min(viewport.height) { opts.margin_px } else { 0.0 };
    let avail_w = viewport.width - margin * 2.0;
    let avail_h = viewport.height - margin * 2.0;

    let raw = fit_scale(rect, avail_w, avail_h).unwrap_or(opts.zoom_cap);
    let zoom = opts.limits.clamp(raw.min(opts.zoom_cap));

    let center = rect.center();
    let vc = viewport.center();
    Some(Camera { zoom, pan_x: vc.x - center.x * zoom, pan_y: vc.y - center.y * zoom })
}

/// Camera that shows every frame in the store. `None` for an empty store or
/// an empty viewport.
#[must_use]
pub fn fit_all(store: &FrameStore, viewport: Viewport, cfg: &EngineConfig) -> Option<Camera> {
    let bounds = store.bounds()?;
    fit_rect(bounds, viewport, FitOptions::scene(cfg))
}

/// Camera that shows a single frame with the configured margin.
#[must_use]
pub fn fit_frame(frame: &Frame, viewport: Viewport, cfg: &EngineConfig) -> Option<Camera> {
    fit_rect(frame.world_rect(), viewport, FitOptions::frame(cfg))
}
