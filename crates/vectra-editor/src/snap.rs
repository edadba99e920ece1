//! Alignment snapping for dragged elements.
//!
//! Given a proposed top-left for a moving element, compare its edges and
//! center against the canvas and every visible sibling. When a pair lies
//! within the threshold, that axis jumps onto the target and a guide is
//! emitted for the overlay renderer.
//!
//! ## Precedence
//!
//! Candidates are checked in a fixed order and the first hit on an axis
//! wins; later candidates on that axis are ignored.
//!
//! 1. Canvas edges (left, right, top, bottom), only when a canvas size is given.
//! 2. Canvas center (x, then y).
//! 3. Each sibling in list order:
//!    - Y: top↔top, bottom↔bottom, top↔bottom, bottom↔top, center↔center
//!    - X: left↔left, right↔right, left↔right, right↔left, center↔center

use serde::Serialize;
use smallvec::SmallVec;
use vectra_core::{Bounds, CanvasSize, ElementId, Point};

/// Direction of a guide line on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant x; produced by X-axis snaps.
    Vertical,
    /// Constant y; produced by Y-axis snaps.
    Horizontal,
}

/// Rendering emphasis: center alignments use the primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideEmphasis {
    Center,
    Edge,
}

/// Which pair of lines produced a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    CanvasLeft,
    CanvasRight,
    CanvasTop,
    CanvasBottom,
    CanvasCenterX,
    CanvasCenterY,
    /// top ↔ sibling top
    Top,
    /// bottom ↔ sibling bottom
    Bottom,
    /// top ↔ sibling bottom (moving element sits below the sibling)
    StackedBelow,
    /// bottom ↔ sibling top (moving element sits above the sibling)
    StackedAbove,
    CenterY,
    /// left ↔ sibling left
    Left,
    /// right ↔ sibling right
    Right,
    /// left ↔ sibling right (moving element sits to the right)
    BesideRight,
    /// right ↔ sibling left (moving element sits to the left)
    BesideLeft,
    CenterX,
}

impl Alignment {
    pub fn slug(self) -> &'static str {
        match self {
            Alignment::CanvasLeft => "canvas-left",
            Alignment::CanvasRight => "canvas-right",
            Alignment::CanvasTop => "canvas-top",
            Alignment::CanvasBottom => "canvas-bottom",
            Alignment::CanvasCenterX => "canvas-center-x",
            Alignment::CanvasCenterY => "canvas-center-y",
            Alignment::Top => "top",
            Alignment::Bottom => "bottom",
            Alignment::StackedBelow => "stacked-below",
            Alignment::StackedAbove => "stacked-above",
            Alignment::CenterY => "center-y",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::BesideRight => "beside-right",
            Alignment::BesideLeft => "beside-left",
            Alignment::CenterX => "center-x",
        }
    }

    pub fn emphasis(self) -> GuideEmphasis {
        match self {
            Alignment::CanvasCenterX
            | Alignment::CanvasCenterY
            | Alignment::CenterX
            | Alignment::CenterY => GuideEmphasis::Center,
            _ => GuideEmphasis::Edge,
        }
    }
}

/// A transient alignment line shown while dragging.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapGuide {
    /// Stable key for the overlay renderer, e.g. `canvas:canvas-center-x`.
    pub id: String,
    pub orientation: Orientation,
    /// Canvas coordinate along the perpendicular axis.
    pub position: f64,
    pub emphasis: GuideEmphasis,
    pub alignment: Alignment,
    /// Sibling the guide aligns to; `None` for canvas landmarks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ElementId>,
}

/// Everything the detector needs for one pointer-move.
#[derive(Debug, Clone)]
pub struct SnapRequest<'a> {
    pub width: f64,
    pub height: f64,
    /// Proposed top-left, canvas coordinates.
    pub x: f64,
    pub y: f64,
    /// Visible siblings in canvas coordinates, self already excluded.
    pub siblings: &'a [(ElementId, Bounds)],
    pub canvas_center: Point,
    pub canvas_size: Option<CanvasSize>,
    pub enabled: bool,
    /// Tolerance in screen pixels.
    pub threshold_px: f64,
    pub zoom: f64,
}

impl SnapRequest<'_> {
    /// Tolerance in canvas units.
    pub fn threshold(&self) -> f64 {
        self.threshold_px / self.zoom
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapResult {
    /// Corrected top-left x, if the X axis snapped.
    pub x: Option<f64>,
    /// Corrected top-left y, if the Y axis snapped.
    pub y: Option<f64>,
    /// Guides in the order they fired (at most one per axis).
    pub guides: SmallVec<[SnapGuide; 2]>,
}

impl SnapResult {
    /// The proposed position with any corrections applied.
    pub fn resolve(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x.unwrap_or(x), self.y.unwrap_or(y))
    }
}

/// Which part of the moving element is compared.
#[derive(Clone, Copy)]
enum Anchor {
    Start,
    End,
    Center,
}

impl Anchor {
    fn offset(self, size: f64) -> f64 {
        match self {
            Anchor::Start => 0.0,
            Anchor::End => size,
            Anchor::Center => size / 2.0,
        }
    }
}

struct Matcher {
    threshold: f64,
    moving: Bounds,
    result: SnapResult,
}

impl Matcher {
    fn x(&mut self, anchor: Anchor, target: f64, alignment: Alignment, source: Option<ElementId>) {
        if self.result.x.is_some() {
            return;
        }
        let offset = anchor.offset(self.moving.width);
        if ((self.moving.left + offset) - target).abs() < self.threshold {
            self.result.x = Some(target - offset);
            self.push_guide(Orientation::Vertical, target, alignment, source);
        }
    }

    fn y(&mut self, anchor: Anchor, target: f64, alignment: Alignment, source: Option<ElementId>) {
        if self.result.y.is_some() {
            return;
        }
        let offset = anchor.offset(self.moving.height);
        if ((self.moving.top + offset) - target).abs() < self.threshold {
            self.result.y = Some(target - offset);
            self.push_guide(Orientation::Horizontal, target, alignment, source);
        }
    }

    fn push_guide(
        &mut self,
        orientation: Orientation,
        position: f64,
        alignment: Alignment,
        target: Option<ElementId>,
    ) {
        let owner = target.map_or("canvas", |id| id.as_str());
        log::trace!("snap {} to {owner} at {position}", alignment.slug());
        self.result.guides.push(SnapGuide {
            id: format!("{owner}:{}", alignment.slug()),
            orientation,
            position,
            emphasis: alignment.emphasis(),
            alignment,
            target,
        });
    }

    fn done(&self) -> bool {
        self.result.x.is_some() && self.result.y.is_some()
    }
}

/// Run the detector. See the module docs for precedence.
pub fn detect_snap(req: &SnapRequest<'_>) -> SnapResult {
    if !req.enabled {
        return SnapResult::default();
    }

    let mut matcher = Matcher {
        threshold: req.threshold(),
        moving: Bounds::new(req.x, req.y, req.width, req.height),
        result: SnapResult::default(),
    };

    if let Some(canvas) = req.canvas_size {
        matcher.x(Anchor::Start, 0.0, Alignment::CanvasLeft, None);
        matcher.x(Anchor::End, canvas.width, Alignment::CanvasRight, None);
        matcher.y(Anchor::Start, 0.0, Alignment::CanvasTop, None);
        matcher.y(Anchor::End, canvas.height, Alignment::CanvasBottom, None);
    }

    matcher.x(Anchor::Center, req.canvas_center.x, Alignment::CanvasCenterX, None);
    matcher.y(Anchor::Center, req.canvas_center.y, Alignment::CanvasCenterY, None);

    for &(id, sib) in req.siblings {
        if matcher.done() {
            break;
        }
        let src = Some(id);

        matcher.y(Anchor::Start, sib.top, Alignment::Top, src);
        matcher.y(Anchor::End, sib.bottom, Alignment::Bottom, src);
        matcher.y(Anchor::Start, sib.bottom, Alignment::StackedBelow, src);
        matcher.y(Anchor::End, sib.top, Alignment::StackedAbove, src);
        matcher.y(Anchor::Center, sib.center_y, Alignment::CenterY, src);

        matcher.x(Anchor::Start, sib.left, Alignment::Left, src);
        matcher.x(Anchor::End, sib.right, Alignment::Right, src);
        matcher.x(Anchor::Start, sib.right, Alignment::BesideRight, src);
        matcher.x(Anchor::End, sib.left, Alignment::BesideLeft, src);
        matcher.x(Anchor::Center, sib.center_x, Alignment::CenterX, src);
    }

    matcher.result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request<'a>(
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        siblings: &'a [(ElementId, Bounds)],
    ) -> SnapRequest<'a> {
        SnapRequest {
            width: w,
            height: h,
            x,
            y,
            siblings,
            canvas_center: CanvasSize::UHD.center(),
            canvas_size: Some(CanvasSize::UHD),
            enabled: true,
            threshold_px: 8.0,
            zoom: 1.0,
        }
    }

    fn sib(id: &str, x: f64, y: f64, w: f64, h: f64) -> (ElementId, Bounds) {
        (ElementId::intern(id), Bounds::new(x, y, w, h))
    }

    #[test]
    fn abuts_left_edge_to_sibling_right_edge() {
        let siblings = [sib("left_panel", 0.0, 100.0, 100.0, 50.0)];
        let result = detect_snap(&request(103.0, 100.0, 50.0, 50.0, &siblings));
        assert_eq!(result.x, Some(100.0));
        let g = result
            .guides
            .iter()
            .find(|g| g.orientation == Orientation::Vertical)
            .unwrap();
        assert_eq!(g.alignment, Alignment::BesideRight);
        assert_eq!(g.position, 100.0);
        assert_eq!(g.emphasis, GuideEmphasis::Edge);
        assert_eq!(g.id, "left_panel:beside-right");
    }

    #[test]
    fn stacks_bottom_onto_sibling_top() {
        // Moving element is above the sibling; its bottom lands on the sibling's top.
        let siblings = [sib("below", 500.0, 300.0, 80.0, 80.0)];
        let result = detect_snap(&request(700.0, 245.0, 40.0, 50.0, &siblings));
        assert_eq!(result.y, Some(250.0));
        assert_eq!(result.guides[0].alignment, Alignment::StackedAbove);
        assert_eq!(result.guides[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn canvas_center_uses_center_emphasis() {
        let result = detect_snap(&request(1893.0, 400.0, 50.0, 50.0, &[]));
        // Element center 1918 is within 8 of 1920.
        assert_eq!(result.x, Some(1895.0));
        assert_eq!(result.y, None);
        assert_eq!(result.guides.len(), 1);
        assert_eq!(result.guides[0].emphasis, GuideEmphasis::Center);
        assert_eq!(result.guides[0].id, "canvas:canvas-center-x");
    }

    #[test]
    fn canvas_edges_win_over_siblings() {
        let siblings = [sib("near_origin", 3.0, 500.0, 10.0, 10.0)];
        let result = detect_snap(&request(4.0, 900.0, 20.0, 20.0, &siblings));
        assert_eq!(result.x, Some(0.0));
        assert_eq!(result.guides[0].alignment, Alignment::CanvasLeft);
    }

    #[test]
    fn edge_alignment_beats_center_on_same_sibling() {
        // Equal widths: left↔left and center↔center fire together; edge wins.
        let siblings = [sib("twin", 200.0, 800.0, 60.0, 60.0)];
        let result = detect_snap(&request(204.0, 600.0, 60.0, 20.0, &siblings));
        assert_eq!(result.x, Some(200.0));
        assert_eq!(result.guides[0].alignment, Alignment::Left);
    }

    #[test]
    fn first_sibling_wins_per_axis() {
        let siblings = [
            sib("first", 300.0, 1000.0, 50.0, 50.0),
            sib("second", 302.0, 1500.0, 50.0, 50.0),
        ];
        let result = detect_snap(&request(305.0, 700.0, 50.0, 50.0, &siblings));
        assert_eq!(result.x, Some(300.0));
        assert_eq!(result.guides.len(), 1);
        assert_eq!(result.guides[0].target, Some(ElementId::intern("first")));
    }

    #[test]
    fn threshold_is_strict_and_scales_with_zoom() {
        let siblings = [sib("ref", 600.0, 1200.0, 50.0, 50.0)];

        // 6 canvas units away: inside 8 at zoom 1, outside 4 at zoom 2.
        let mut req = request(606.0, 300.0, 10.0, 10.0, &siblings);
        assert_eq!(detect_snap(&req).x, Some(600.0));
        req.zoom = 2.0;
        assert_eq!(detect_snap(&req).x, None);

        // 3 canvas units away at zoom 2 still snaps.
        req.x = 603.0;
        assert_eq!(detect_snap(&req).x, Some(600.0));

        // Exactly at the threshold does not snap.
        req.x = 604.0;
        assert_eq!(detect_snap(&req).x, None);
    }

    #[test]
    fn disabled_is_a_noop() {
        let siblings = [sib("any", 0.0, 100.0, 100.0, 50.0)];
        let mut req = request(103.0, 100.0, 50.0, 50.0, &siblings);
        req.enabled = false;
        assert_eq!(detect_snap(&req), SnapResult::default());
    }

    #[test]
    fn guides_serialize_for_overlay() {
        let result = detect_snap(&request(1893.0, 400.0, 50.0, 50.0, &[]));
        let json = serde_json::to_value(&result.guides[0]).unwrap();
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["emphasis"], "center");
        assert_eq!(json["alignment"], "canvas-center-x");
        assert!(json.get("target").is_none());
    }
}
