//! Resize math for the eight selection handles.
//!
//! Pure arithmetic: the same snapshot, delta, handle and lock flag always
//! produce the same geometry. The edge (or corner) opposite the dragged
//! handle stays put.

use serde::{Deserialize, Serialize};
use vectra_core::{ElementId, Point, Vec2};

/// One of the eight drag targets around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::East,
        Handle::SouthEast,
        Handle::South,
        Handle::SouthWest,
        Handle::West,
    ];

    /// Parse the short compass name used by the host (`"nw"`, `"e"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "n" => Some(Handle::North),
            "s" => Some(Handle::South),
            "e" => Some(Handle::East),
            "w" => Some(Handle::West),
            "ne" => Some(Handle::NorthEast),
            "nw" => Some(Handle::NorthWest),
            "se" => Some(Handle::SouthEast),
            "sw" => Some(Handle::SouthWest),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Handle::North => "n",
            Handle::South => "s",
            Handle::East => "e",
            Handle::West => "w",
            Handle::NorthEast => "ne",
            Handle::NorthWest => "nw",
            Handle::SouthEast => "se",
            Handle::SouthWest => "sw",
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::NorthEast | Handle::NorthWest | Handle::SouthEast | Handle::SouthWest
        )
    }

    fn moves_left(self) -> bool {
        matches!(self, Handle::West | Handle::NorthWest | Handle::SouthWest)
    }

    fn moves_right(self) -> bool {
        matches!(self, Handle::East | Handle::NorthEast | Handle::SouthEast)
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::North | Handle::NorthEast | Handle::NorthWest)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Handle::South | Handle::SouthEast | Handle::SouthWest)
    }

    /// Where the handle sits on a `width × height` box at `(x, y)`.
    pub fn position(self, x: f64, y: f64, width: f64, height: f64) -> Point {
        let hx = if self.moves_left() {
            x
        } else if self.moves_right() {
            x + width
        } else {
            x + width / 2.0
        };
        let hy = if self.moves_top() {
            y
        } else if self.moves_bottom() {
            y + height
        } else {
            y + height / 2.0
        };
        Point::new(hx, hy)
    }
}

/// Position and size of an element, in its own coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Compute the geometry for a handle drag of `delta` canvas units.
///
/// Both dimensions are floored at `min_size`. The edges opposite the
/// dragged handle keep their starting position, even when the element
/// started out smaller than the floor. With `keep_aspect`, corner handles
/// scale uniformly by the larger of the two axis ratios; edge handles
/// scale by their own axis ratio and stay centered on the other axis.
/// Ratios are taken against the floored start size and the floor is
/// applied to the ratio, so a locked resize never distorts.
pub fn compute_resize(
    start: Geometry,
    delta: Vec2,
    handle: Handle,
    keep_aspect: bool,
    min_size: f64,
) -> Geometry {
    let mut w = start.width;
    let mut h = start.height;
    if handle.moves_right() {
        w += delta.x;
    } else if handle.moves_left() {
        w -= delta.x;
    }
    if handle.moves_bottom() {
        h += delta.y;
    } else if handle.moves_top() {
        h -= delta.y;
    }

    if keep_aspect {
        // Divisors stay positive for degenerate starts.
        let ow = start.width.max(min_size);
        let oh = start.height.max(min_size);
        let sx = w.max(min_size) / ow;
        let sy = h.max(min_size) / oh;
        let scale = match handle {
            Handle::East | Handle::West => sx,
            Handle::North | Handle::South => sy,
            _ => sx.max(sy),
        };
        let scale = scale.max(min_size / ow).max(min_size / oh);
        w = ow * scale;
        h = oh * scale;
    } else {
        w = w.max(min_size);
        h = h.max(min_size);
    }

    let x = if handle.moves_left() {
        start.x + start.width - w
    } else if keep_aspect && matches!(handle, Handle::North | Handle::South) {
        start.x + (start.width - w) / 2.0
    } else {
        start.x
    };
    let y = if handle.moves_top() {
        start.y + start.height - h
    } else if keep_aspect && matches!(handle, Handle::East | Handle::West) {
        start.y + (start.height - h) / 2.0
    } else {
        start.y
    };

    Geometry::new(x, y, w, h)
}

/// State of one resize gesture, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub element: ElementId,
    pub handle: Handle,
    /// Geometry at pointer-down, parent-relative.
    pub original: Geometry,
    /// Pointer at pointer-down, canvas coordinates.
    pub pointer_start: Point,
}

impl ResizeSession {
    pub fn new(element: ElementId, handle: Handle, original: Geometry, pointer: Point) -> Self {
        Self {
            element,
            handle,
            original,
            pointer_start: pointer,
        }
    }

    /// Geometry for the pointer's current canvas position.
    pub fn geometry_at(&self, pointer: Point, keep_aspect: bool, min_size: f64) -> Geometry {
        compute_resize(
            self.original,
            pointer - self.pointer_start,
            self.handle,
            keep_aspect,
            min_size,
        )
    }
}
