//! Derived bounding boxes.
//!
//! Elements persist only `(x, y, width, height)`. The edges and centers the
//! snap detector and hit tester compare against are derived here on demand
//! and never stored.

use kurbo::{Point, Rect};
use serde::Serialize;

/// Edge and center coordinates of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
            center_x: x + width / 2.0,
            center_y: y + height / 2.0,
            width,
            height,
        }
    }

    /// The same box moved so its top-left corner sits at `(x, y)`.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// AABB overlap test. Touching edges do not count as overlap.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Self {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right.max(other.right);
        let bottom = self.bottom.max(other.bottom);
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

impl From<Rect> for Bounds {
    /// Normalizes the rect first, so a marquee dragged up-left still
    /// produces a positive-size box.
    fn from(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        b.to_rect()
    }
}
