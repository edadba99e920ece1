//! Integration tests: resize gestures through the select tool (vectra-editor).
//!
//! Events go in as screen-space pointer input, the way the browser host
//! delivers them, and geometry comes back out of the arena.

use pretty_assertions::assert_eq;
use vectra_core::{ElementArena, ElementId, Vec2, Viewport};
use vectra_editor::{EditContext, InputEvent, Modifiers, SelectTool, ToolEffect};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn single(x: f64, y: f64, w: f64, h: f64) -> ElementArena {
    init_logger();
    let json = format!(
        r#"[{{ "id": "box", "type": "rectangle", "x": {x}, "y": {y}, "width": {w}, "height": {h} }}]"#
    );
    ElementArena::from_json(&json).unwrap()
}

/// Select `box`, grab the handle at `from`, and release at `to`.
/// Returns the box's final (x, y, width, height).
fn drag_handle(
    arena: &mut ElementArena,
    ctx: &mut EditContext,
    from: (f64, f64),
    to: (f64, f64),
    modifiers: Modifiers,
) -> (f64, f64, f64, f64) {
    let mut tool = SelectTool::new();
    tool.selected = vec![ElementId::intern("box")];
    tool.handle(
        &InputEvent::pointer_down(from.0, from.1, modifiers),
        arena,
        ctx,
    );
    assert!(tool.session().is_active(), "no handle at {from:?}");
    tool.handle(&InputEvent::pointer_move(to.0, to.1, modifiers), arena, ctx);
    let up = tool.handle(&InputEvent::pointer_up(to.0, to.1, modifiers), arena, ctx);
    assert_eq!(
        up,
        ToolEffect::Committed {
            id: ElementId::intern("box")
        }
    );

    let e = arena.get_by_id(ElementId::intern("box")).unwrap();
    (e.x, e.y, e.width, e.height)
}

// ─── Handles ─────────────────────────────────────────────────────────────

#[test]
fn south_east_grows_right_and_down() {
    let mut arena = single(0.0, 0.0, 100.0, 100.0);
    let mut ctx = EditContext::default();
    let g = drag_handle(&mut arena, &mut ctx, (100.0, 100.0), (150.0, 120.0), Modifiers::NONE);
    assert_eq!(g, (0.0, 0.0, 150.0, 120.0));
}

#[test]
fn north_west_keeps_bottom_right_fixed() {
    let mut arena = single(100.0, 100.0, 100.0, 100.0);
    let mut ctx = EditContext::default();
    let g = drag_handle(&mut arena, &mut ctx, (100.0, 100.0), (80.0, 90.0), Modifiers::NONE);
    assert_eq!(g, (80.0, 90.0, 120.0, 110.0));
}

#[test]
fn edge_handles_change_one_axis() {
    let mut arena = single(200.0, 200.0, 100.0, 100.0);
    let mut ctx = EditContext::default();
    // East handle at (300, 250).
    let g = drag_handle(&mut arena, &mut ctx, (300.0, 250.0), (340.0, 290.0), Modifiers::NONE);
    assert_eq!(g, (200.0, 200.0, 140.0, 100.0));
}

#[test]
fn collapsing_drag_stops_at_minimum_size() {
    let mut arena = single(100.0, 100.0, 100.0, 100.0);
    let mut ctx = EditContext::default();
    let g = drag_handle(&mut arena, &mut ctx, (100.0, 100.0), (600.0, 600.0), Modifiers::NONE);
    assert_eq!(g, (190.0, 190.0, 10.0, 10.0));
}

#[test]
fn shift_locks_aspect_ratio() {
    let mut arena = single(0.0, 0.0, 200.0, 100.0);
    let mut ctx = EditContext::default();
    let g = drag_handle(&mut arena, &mut ctx, (200.0, 100.0), (300.0, 110.0), Modifiers::SHIFT);
    assert_eq!(g, (0.0, 0.0, 300.0, 150.0));
    assert_eq!(g.2 / g.3, 2.0);
}

// ─── Viewport & clamp ────────────────────────────────────────────────────

#[test]
fn screen_deltas_are_scaled_by_zoom() {
    let mut arena = single(0.0, 0.0, 100.0, 100.0);
    let mut ctx = EditContext {
        viewport: Viewport::new(2.0, Vec2::new(50.0, 50.0)),
        ..EditContext::default()
    };
    // South-east handle at canvas (100, 100) is screen (250, 250).
    let g = drag_handle(&mut arena, &mut ctx, (250.0, 250.0), (350.0, 290.0), Modifiers::NONE);
    assert_eq!(g, (0.0, 0.0, 150.0, 120.0));
}

#[test]
fn growth_past_canvas_edge_shifts_position() {
    let mut arena = single(3700.0, 100.0, 100.0, 100.0);
    let mut ctx = EditContext::default();
    // East handle at (3800, 150); widening to 300 no longer fits at x = 3700.
    let g = drag_handle(&mut arena, &mut ctx, (3800.0, 150.0), (4000.0, 150.0), Modifiers::NONE);
    assert_eq!(g, (3540.0, 100.0, 300.0, 100.0));
}

#[test]
fn escape_mid_resize_restores_box() {
    let mut arena = single(10.0, 10.0, 100.0, 100.0);
    let mut ctx = EditContext::default();
    let mut tool = SelectTool::new();
    tool.selected = vec![ElementId::intern("box")];

    tool.handle(&InputEvent::pointer_down(110.0, 110.0, Modifiers::NONE), &mut arena, &mut ctx);
    tool.handle(&InputEvent::pointer_move(400.0, 400.0, Modifiers::NONE), &mut arena, &mut ctx);
    assert_eq!(arena.get_by_id(ElementId::intern("box")).unwrap().width, 390.0);

    tool.handle(
        &InputEvent::Key {
            key: "Escape".into(),
            modifiers: Modifiers::NONE,
        },
        &mut arena,
        &mut ctx,
    );
    let e = arena.get_by_id(ElementId::intern("box")).unwrap();
    assert_eq!((e.x, e.y, e.width, e.height), (10.0, 10.0, 100.0, 100.0));
}
