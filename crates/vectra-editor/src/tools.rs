//! The select tool: turns input events into selection changes and
//! drag/resize gestures.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Click | Drag | Resize handle | Arrow keys |
//! |----------|-------|------|---------------|------------|
//! | **Shift** | Toggle in selection | Axis-constrain | Keep aspect ratio | Large step |
//!
//! Pointer coordinates arrive in screen pixels and are mapped onto the
//! canvas through the viewport before anything else happens.

use crate::hit::{hit_handle, hit_test, hit_test_rect};
use crate::input::InputEvent;
use crate::session::{EditContext, InteractionSession, TransformOutcome, nudge};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::snap::SnapGuide;
use serde::Serialize;
use vectra_core::{Bounds, ElementArena, ElementId, Point, Rect};

/// Handle grab radius in screen pixels.
pub const HANDLE_HIT_PX: f64 = 6.0;

/// What a handled event changed, for the host to react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ToolEffect {
    /// Nothing changed.
    Idle,
    Selection { selected: Vec<ElementId> },
    /// Live marquee rectangle, canvas coordinates.
    Marquee(Bounds),
    /// One gesture step was applied to the arena.
    Transform(TransformOutcome),
    /// Pointer-up finished a gesture on `id`.
    Committed { id: ElementId },
    Cancelled { id: Option<ElementId> },
    Nudged { moved: Vec<ElementId> },
    SnapToggled { enabled: bool },
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SelectTool {
    /// Currently selected element(s), in selection order.
    pub selected: Vec<ElementId>,
    session: InteractionSession,
    /// Set when pointer-down hits empty space. Canvas coordinates.
    marquee_start: Option<Point>,
    /// Current marquee rectangle. Updated during drag.
    marquee_rect: Option<Bounds>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    /// Guides to draw for the gesture in progress.
    pub fn guides(&self) -> &[SnapGuide] {
        self.session.guides()
    }

    pub fn marquee(&self) -> Option<Bounds> {
        self.marquee_rect
    }

    /// Drop selected IDs that no longer exist in `arena`.
    pub fn prune(&mut self, arena: &ElementArena) {
        self.selected.retain(|&id| arena.index_of(id).is_some());
        if let Some(g) = self.session.gesture()
            && arena.index_of(g.element()).is_none()
        {
            self.session = InteractionSession::new();
        }
    }

    pub fn handle(
        &mut self,
        event: &InputEvent,
        arena: &mut ElementArena,
        ctx: &mut EditContext,
    ) -> ToolEffect {
        let modifiers = event.modifiers();
        let pointer = event.position().map(|s| ctx.viewport.screen_to_canvas(s));
        match (event, pointer) {
            (InputEvent::PointerDown { .. }, Some(p)) => {
                self.marquee_start = None;
                self.marquee_rect = None;

                // Handles of a single selection take priority over elements.
                if let &[only] = self.selected.as_slice()
                    && let Some(idx) = arena.index_of(only)
                    && let Some(b) = arena.absolute_bounds(idx)
                    && let Some(handle) =
                        hit_handle(&b, p, ctx.viewport.screen_distance(HANDLE_HIT_PX))
                {
                    self.session.begin_resize(arena, only, handle, p);
                    return ToolEffect::Idle;
                }

                if let Some(hit_id) = hit_test(arena, p) {
                    if modifiers.shift {
                        if let Some(pos) = self.selected.iter().position(|id| *id == hit_id) {
                            self.selected.remove(pos);
                        } else {
                            self.selected.push(hit_id);
                        }
                    } else if !self.selected.contains(&hit_id) {
                        self.selected = vec![hit_id];
                    }

                    if self.selected.contains(&hit_id) {
                        self.session.begin_drag(arena, hit_id, p);
                    }
                } else {
                    if !modifiers.shift {
                        self.selected.clear();
                    }
                    self.marquee_start = Some(p);
                    self.marquee_rect = Some(Bounds::new(p.x, p.y, 0.0, 0.0));
                }
                ToolEffect::Selection {
                    selected: self.selected.clone(),
                }
            }
            (InputEvent::PointerMove { .. }, Some(p)) => {
                if let Some(start) = self.marquee_start {
                    let rect = Bounds::from(Rect::from_points(start, p));
                    self.marquee_rect = Some(rect);
                    return ToolEffect::Marquee(rect);
                }

                match self.session.update(arena, p, modifiers, ctx) {
                    Some(outcome) => ToolEffect::Transform(outcome),
                    None => ToolEffect::Idle,
                }
            }
            (InputEvent::PointerUp { .. }, _) => {
                if self.marquee_start.take().is_some() {
                    let hits = self
                        .marquee_rect
                        .take()
                        .map(|r| hit_test_rect(arena, r.to_rect()))
                        .unwrap_or_default();
                    if modifiers.shift {
                        for id in hits {
                            if !self.selected.contains(&id) {
                                self.selected.push(id);
                            }
                        }
                    } else {
                        self.selected = hits;
                    }
                    return ToolEffect::Selection {
                        selected: self.selected.clone(),
                    };
                }

                match self.session.end() {
                    Some(id) => ToolEffect::Committed { id },
                    None => ToolEffect::Idle,
                }
            }
            (InputEvent::Key { key, .. }, _) => {
                let Some(action) = ShortcutMap::resolve(key, modifiers) else {
                    return ToolEffect::Idle;
                };
                self.apply_shortcut(action, arena, ctx)
            }
            _ => ToolEffect::Idle,
        }
    }

    fn apply_shortcut(
        &mut self,
        action: ShortcutAction,
        arena: &mut ElementArena,
        ctx: &mut EditContext,
    ) -> ToolEffect {
        match action {
            ShortcutAction::Nudge { .. } => {
                // Arrow keys are ignored mid-gesture.
                if self.session.is_active() {
                    return ToolEffect::Idle;
                }
                let Some((dx, dy)) = action.nudge_offset(&ctx.config) else {
                    return ToolEffect::Idle;
                };
                ToolEffect::Nudged {
                    moved: nudge(arena, &self.selected, dx, dy, &ctx.config),
                }
            }
            ShortcutAction::ToggleSnap => {
                ctx.config.snap.enabled = !ctx.config.snap.enabled;
                log::debug!("snapping {}", if ctx.config.snap.enabled { "on" } else { "off" });
                ToolEffect::SnapToggled {
                    enabled: ctx.config.snap.enabled,
                }
            }
            ShortcutAction::Cancel => {
                let id = self.session.gesture().map(|g| g.element());
                if self.session.cancel(arena) {
                    return ToolEffect::Cancelled { id };
                }
                if self.marquee_start.take().is_some() {
                    self.marquee_rect = None;
                    return ToolEffect::Cancelled { id: None };
                }
                self.selected.clear();
                ToolEffect::Selection { selected: vec![] }
            }
            ShortcutAction::SelectAll => {
                self.selected = arena
                    .paint_order()
                    .into_iter()
                    .filter(|&idx| arena.parent(idx).is_none() && arena.is_visible(idx))
                    .filter_map(|idx| arena.get(idx).map(|e| e.id))
                    .collect();
                ToolEffect::Selection {
                    selected: self.selected.clone(),
                }
            }
        }
    }
}
