//! Engine tunables, with defaults from [`crate::consts`] and optional
//! environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ZoomLimits;
use crate::consts::{
    DEFAULT_ANIMATION_MS, DUPLICATE_OFFSET, FIT_FRAME_MARGIN_PX, FIT_ZOOM_CAP, HISTORY_LIMIT, MINIMAP_HEIGHT,
    MINIMAP_PADDING, MINIMAP_WIDTH, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::error::EngineError;

/// Tunable parameters shared by the camera, autofit, minimap and history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    /// Maximum zoom autofit may produce.
    pub fit_zoom_cap: f64,
    /// Screen-space margin around a single fitted frame.
    pub fit_margin_px: f64,
    pub duplicate_offset: f64,
    pub animation_ms: f64,
    pub minimap_width: f64,
    pub minimap_height: f64,
    pub minimap_padding: f64,
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            fit_zoom_cap: FIT_ZOOM_CAP,
            fit_margin_px: FIT_FRAME_MARGIN_PX,
            duplicate_offset: DUPLICATE_OFFSET,
            animation_ms: DEFAULT_ANIMATION_MS,
            minimap_width: MINIMAP_WIDTH,
            minimap_height: MINIMAP_HEIGHT,
            minimap_padding: MINIMAP_PADDING,
            history_limit: HISTORY_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Build config from defaults plus environment overrides.
    ///
    /// Optional:
    /// - `STORYBOARD_ZOOM_MIN`: default 0.1
    /// - `STORYBOARD_ZOOM_MAX`: default 5
    /// - `STORYBOARD_FIT_CAP`: default 2.5
    /// - `STORYBOARD_FIT_MARGIN`: default 40
    /// - `STORYBOARD_ANIMATION_MS`: default 600
    ///
    /// Unparsable values fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the resulting bounds are inconsistent.
    pub fn from_env() -> Result<Self, EngineError> {
        let defaults = Self::default();
        let cfg = Self {
            zoom_min: env_parse_f64("STORYBOARD_ZOOM_MIN", defaults.zoom_min),
            zoom_max: env_parse_f64("STORYBOARD_ZOOM_MAX", defaults.zoom_max),
            fit_zoom_cap: env_parse_f64("STORYBOARD_FIT_CAP", defaults.fit_zoom_cap),
            fit_margin_px: env_parse_f64("STORYBOARD_FIT_MARGIN", defaults.fit_margin_px),
            animation_ms: env_parse_f64("STORYBOARD_ANIMATION_MS", defaults.animation_ms),
            ..defaults
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the zoom bounds and autofit cap describe a usable range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] describing the first violated bound.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.zoom_min.is_finite() || self.zoom_min <= 0.0 {
            return Err(EngineError::Config(format!("zoom_min must be positive, got {}", self.zoom_min)));
        }
        if !self.zoom_max.is_finite() || self.zoom_max <= self.zoom_min {
            return Err(EngineError::Config(format!(
                "zoom_max ({}) must exceed zoom_min ({})",
                self.zoom_max, self.zoom_min
            )));
        }
        if self.fit_zoom_cap.is_nan() || self.fit_zoom_cap <= 0.0 {
            return Err(EngineError::Config(format!("fit cap must be positive, got {}", self.fit_zoom_cap)));
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 1.0 {
            return Err(EngineError::Config(format!("zoom_step must exceed 1, got {}", self.zoom_step)));
        }
        if self.animation_ms < 0.0 || self.fit_margin_px < 0.0 {
            return Err(EngineError::Config("animation_ms and fit_margin_px must be non-negative".into()));
        }
        Ok(())
    }

    /// Camera zoom bounds described by this config.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits { min: self.zoom_min, max: self.zoom_max }
    }
}

fn env_parse_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .map_or(default, |v| v.trim().parse::<f64>().unwrap_or(default))
}
