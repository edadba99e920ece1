//! The fixed virtual canvas and the on-screen viewport looking at it.
//!
//! All element geometry lives in canvas units. Pointer input arrives in
//! screen pixels and is mapped through `Viewport` (zoom + pan).

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Size of the virtual canvas in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// The 4K UHD frame every project is authored against.
    pub const UHD: CanvasSize = CanvasSize {
        width: 3840.0,
        height: 2160.0,
    };

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a proposed top-left position so a `width × height` box stays
    /// on the canvas.
    ///
    /// When the box is larger than the canvas on an axis, the upper limit
    /// drops below zero and the position is pinned to the origin.
    pub fn clamp_position(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        let cx = x.min(self.width - width).max(0.0);
        let cy = y.min(self.height - height).max(0.0);
        (cx, cy)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::UHD
    }
}

/// Zoom and pan of the on-screen view.
///
/// `screen = canvas * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Vec2,
}

impl Viewport {
    pub const MIN_ZOOM: f64 = 0.05;
    pub const MAX_ZOOM: f64 = 16.0;

    pub fn new(zoom: f64, pan: Vec2) -> Self {
        Self {
            zoom: zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM),
            pan,
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn screen_to_canvas(&self, p: Point) -> Point {
        ((p - self.pan).to_vec2() / self.zoom).to_point()
    }

    pub fn canvas_to_screen(&self, p: Point) -> Point {
        (p.to_vec2() * self.zoom + self.pan).to_point()
    }

    /// Convert a screen-pixel distance into canvas units.
    pub fn screen_distance(&self, px: f64) -> f64 {
        px / self.zoom
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}
