//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest zoom factor the camera will accept.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor the camera will accept.
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplicative step applied by a single zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 1.2;

// ── Autofit ─────────────────────────────────────────────────────

/// Upper bound on the zoom produced by autofit, so a lone small frame is not
/// blown up to fill the screen.
pub const FIT_ZOOM_CAP: f64 = 2.5;

/// Screen-space margin in pixels kept around a frame fitted with `fit_frame`.
pub const FIT_FRAME_MARGIN_PX: f64 = 40.0;

// ── Store ───────────────────────────────────────────────────────

/// World-space offset applied to both axes of a duplicated frame or element.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Default size of a frame created without explicit dimensions (16:9).
pub const DEFAULT_FRAME_WIDTH: f64 = 800.0;
pub const DEFAULT_FRAME_HEIGHT: f64 = 450.0;

// ── Rendering ───────────────────────────────────────────────────

/// Distance in world units between a path connector's endpoint and its
/// arrowhead tip.
pub const CONNECTOR_ARROW_OFFSET: f64 = 24.0;

/// Arrowhead length in world units.
pub const ARROW_SIZE: f64 = 14.0;

/// Arrowhead half-angle in radians (~30°).
pub const ARROW_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Path badge radius in screen pixels.
pub const BADGE_RADIUS_PX: f64 = 12.0;

/// Frame title font size in screen pixels.
pub const TITLE_FONT_PX: f64 = 14.0;

// ── Minimap ─────────────────────────────────────────────────────

pub const MINIMAP_WIDTH: f64 = 200.0;
pub const MINIMAP_HEIGHT: f64 = 150.0;

/// Inner padding of the minimap in minimap pixels.
pub const MINIMAP_PADDING: f64 = 8.0;

// ── Animation / history ─────────────────────────────────────────

/// Duration of a camera transition started by navigation.
pub const DEFAULT_ANIMATION_MS: f64 = 600.0;

/// Tick interval requested from the scheduler (~60 Hz).
pub const ANIMATION_TICK_MS: f64 = 16.0;

/// Number of undo snapshots retained.
pub const HISTORY_LIMIT: usize = 50;
