//! Interaction sessions: the state of one drag or resize gesture.
//!
//! A session is a plain value. The host creates it on pointer-down, feeds
//! it pointer moves, and drops it on pointer-up. Each move recomputes the
//! geometry from the snapshot taken at pointer-down, so results never
//! accumulate drift and moves can arrive in any number.
//!
//! Every update finishes with the canvas clamp, in canvas coordinates, and
//! writes the parent-relative result back into the arena.
//!
//! Gestures hold the element's ID, never its arena index: the host may
//! reload the element list mid-gesture, and a reload reorders the arena.

use crate::input::Modifiers;
use crate::resize::{Geometry, Handle, ResizeSession};
use crate::snap::{SnapGuide, SnapRequest, detect_snap};
use serde::Serialize;
use smallvec::SmallVec;
use vectra_core::{
    ElementArena, ElementId, ElementIndex, EngineConfig, Point, Positioned, Viewport,
};

/// Configuration and view state an update runs against.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditContext {
    pub config: EngineConfig,
    pub viewport: Viewport,
}

/// Geometry written back to the arena after one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformOutcome {
    pub id: ElementId,
    /// Parent-relative, as stored on the element.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub guides: SmallVec<[SnapGuide; 2]>,
}

/// State of one move gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub element: ElementId,
    /// Geometry at pointer-down, parent-relative.
    pub original: Geometry,
    /// Pointer at pointer-down, canvas coordinates.
    pub pointer_start: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Drag(DragSession),
    Resize(ResizeSession),
}

impl Gesture {
    pub fn element(&self) -> ElementId {
        match self {
            Gesture::Drag(d) => d.element,
            Gesture::Resize(r) => r.element,
        }
    }

    fn original(&self) -> Geometry {
        match self {
            Gesture::Drag(d) => d.original,
            Gesture::Resize(r) => r.original,
        }
    }
}

/// The gesture in progress plus the guides from its latest update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionSession {
    gesture: Option<Gesture>,
    guides: SmallVec<[SnapGuide; 2]>,
}

fn snapshot(arena: &ElementArena, idx: ElementIndex) -> Option<Geometry> {
    let e = arena.get(idx)?;
    let (origin, size) = (e.origin(), e.size());
    Some(Geometry::new(origin.x, origin.y, size.width, size.height))
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Guides from the most recent update; empty between gestures.
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    /// Start moving `id`. `pointer` is in canvas coordinates.
    /// Returns `false` if the element does not exist.
    pub fn begin_drag(&mut self, arena: &ElementArena, id: ElementId, pointer: Point) -> bool {
        let Some(idx) = arena.index_of(id) else {
            return false;
        };
        let Some(original) = snapshot(arena, idx) else {
            return false;
        };
        log::debug!("drag start {id} at ({}, {})", original.x, original.y);
        self.gesture = Some(Gesture::Drag(DragSession {
            element: id,
            original,
            pointer_start: pointer,
        }));
        self.guides.clear();
        true
    }

    /// Start resizing `id` from `handle`. `pointer` is in canvas coordinates.
    /// Returns `false` if the element does not exist.
    pub fn begin_resize(
        &mut self,
        arena: &ElementArena,
        id: ElementId,
        handle: Handle,
        pointer: Point,
    ) -> bool {
        let Some(idx) = arena.index_of(id) else {
            return false;
        };
        let Some(original) = snapshot(arena, idx) else {
            return false;
        };
        log::debug!(
            "resize start {id} via {} at {}×{}",
            handle.name(),
            original.width,
            original.height
        );
        self.gesture = Some(Gesture::Resize(ResizeSession::new(
            id, handle, original, pointer,
        )));
        self.guides.clear();
        true
    }

    /// Apply the pointer's current canvas position.
    ///
    /// Drag: Shift locks movement to the dominant axis. Resize: Shift locks
    /// the aspect ratio. Returns `None` when idle. If the element has left
    /// the arena since pointer-down, the gesture is dropped.
    pub fn update(
        &mut self,
        arena: &mut ElementArena,
        pointer: Point,
        modifiers: Modifiers,
        ctx: &EditContext,
    ) -> Option<TransformOutcome> {
        let gesture = self.gesture?;
        let Some(idx) = arena.index_of(gesture.element()) else {
            log::debug!("gesture target {} is gone", gesture.element());
            self.gesture = None;
            self.guides.clear();
            return None;
        };
        let parent_origin = arena.parent_origin(idx);
        let canvas = ctx.config.canvas;

        let geometry = match gesture {
            Gesture::Drag(drag) => {
                let mut delta = pointer - drag.pointer_start;
                if modifiers.shift {
                    if delta.x.abs() > delta.y.abs() {
                        delta.y = 0.0;
                    } else {
                        delta.x = 0.0;
                    }
                }

                let original = drag.original;
                let proposed_x = parent_origin.x + original.x + delta.x;
                let proposed_y = parent_origin.y + original.y + delta.y;
                let siblings = arena.snap_targets(idx);
                let snap = detect_snap(&SnapRequest {
                    width: original.width,
                    height: original.height,
                    x: proposed_x,
                    y: proposed_y,
                    siblings: &siblings,
                    canvas_center: canvas.center(),
                    canvas_size: Some(canvas),
                    enabled: ctx.config.snap.enabled,
                    threshold_px: ctx.config.snap.threshold_px,
                    zoom: ctx.viewport.zoom,
                });
                let (sx, sy) = snap.resolve(proposed_x, proposed_y);
                let (cx, cy) = canvas.clamp_position(sx, sy, original.width, original.height);
                self.guides = snap.guides;

                Geometry::new(
                    cx - parent_origin.x,
                    cy - parent_origin.y,
                    original.width,
                    original.height,
                )
            }
            Gesture::Resize(resize) => {
                let g = resize.geometry_at(pointer, modifiers.shift, ctx.config.min_element_size);
                let (cx, cy) = canvas.clamp_position(
                    parent_origin.x + g.x,
                    parent_origin.y + g.y,
                    g.width,
                    g.height,
                );
                self.guides.clear();
                Geometry::new(cx - parent_origin.x, cy - parent_origin.y, g.width, g.height)
            }
        };

        let element = arena.get_mut(idx)?;
        element.set_origin(geometry.x, geometry.y);
        element.set_size(geometry.width, geometry.height);

        Some(TransformOutcome {
            id: element.id,
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            guides: self.guides.clone(),
        })
    }

    /// Finish the gesture (pointer-up). Guides are cleared; the arena keeps
    /// the last applied geometry. Returns the element that was edited.
    pub fn end(&mut self) -> Option<ElementId> {
        let gesture = self.gesture.take()?;
        self.guides.clear();
        log::debug!("gesture end on {}", gesture.element());
        Some(gesture.element())
    }

    /// Abort the gesture and restore the geometry captured at pointer-down.
    pub fn cancel(&mut self, arena: &mut ElementArena) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.guides.clear();
        let original = gesture.original();
        if let Some(idx) = arena.index_of(gesture.element())
            && let Some(e) = arena.get_mut(idx)
        {
            e.set_origin(original.x, original.y);
            e.set_size(original.width, original.height);
        }
        log::debug!("gesture cancelled");
        true
    }
}

/// Move the given elements by `(dx, dy)` canvas units, clamping each to the
/// canvas. Returns the IDs that actually moved.
pub fn nudge(
    arena: &mut ElementArena,
    ids: &[ElementId],
    dx: f64,
    dy: f64,
    config: &EngineConfig,
) -> Vec<ElementId> {
    let mut moved = Vec::new();
    for &id in ids {
        let Some(idx) = arena.index_of(id) else {
            continue;
        };
        let Some(b) = arena.absolute_bounds(idx) else {
            continue;
        };
        let (x, y) = config
            .canvas
            .clamp_position(b.left + dx, b.top + dy, b.width, b.height);
        if x != b.left || y != b.top {
            arena.set_absolute_origin(idx, x, y);
            moved.push(id);
        }
    }
    moved
}
