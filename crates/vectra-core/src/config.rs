//! Engine configuration.
//!
//! Loaded from the host application as JSON; any omitted field falls back
//! to its default.

use crate::canvas::CanvasSize;
use serde::{Deserialize, Serialize};

/// Alignment-snapping settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Master toggle. Default: **true**.
    pub enabled: bool,

    /// Snap tolerance in *screen* pixels. Divided by zoom before use, so
    /// the on-screen feel is the same at every magnification. Default: **8**.
    pub threshold_px: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_px: 8.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Virtual canvas size. Default: 3840×2160.
    pub canvas: CanvasSize,

    pub snap: SnapConfig,

    /// Smallest width/height a resize may produce. Default: **10**.
    pub min_element_size: f64,

    /// Arrow-key nudge step, and the step while Shift is held.
    pub nudge_step: f64,
    pub nudge_step_large: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::UHD,
            snap: SnapConfig::default(),
            min_element_size: 10.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Returns a description if the JSON is malformed or a value is out of
    /// range (non-positive canvas, threshold or minimum size).
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid engine config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(format!(
                "canvas must have a positive size, got {}×{}",
                self.canvas.width, self.canvas.height
            ));
        }
        if !(self.snap.threshold_px >= 0.0) {
            return Err(format!(
                "snap threshold must be non-negative, got {}",
                self.snap.threshold_px
            ));
        }
        if !(self.min_element_size > 0.0) {
            return Err(format!(
                "minimum element size must be positive, got {}",
                self.min_element_size
            ));
        }
        Ok(())
    }
}
