//! Hit testing: canvas point → element lookup.
//!
//! Walks the arena in reverse paint order (front-to-back) so the topmost
//! visible element wins. All coordinates are canvas units.

use crate::resize::Handle;
use vectra_core::{Bounds, ElementArena, ElementId, Point, Rect};

/// Find the topmost visible element at `p`.
/// Returns `None` if nothing is hit (background).
pub fn hit_test(arena: &ElementArena, p: Point) -> Option<ElementId> {
    arena
        .paint_order()
        .into_iter()
        .rev()
        .filter(|&idx| arena.is_visible(idx))
        .find(|&idx| arena.absolute_bounds(idx).is_some_and(|b| b.contains(p)))
        .and_then(|idx| arena.get(idx))
        .map(|e| e.id)
}

/// All visible elements whose bounds intersect `rect`, in paint order.
/// Used for marquee (box) selection.
pub fn hit_test_rect(arena: &ElementArena, rect: Rect) -> Vec<ElementId> {
    let area = Bounds::from(rect);
    arena
        .paint_order()
        .into_iter()
        .filter(|&idx| arena.is_visible(idx))
        .filter(|&idx| {
            arena
                .absolute_bounds(idx)
                .is_some_and(|b| b.intersects(&area))
        })
        .filter_map(|idx| arena.get(idx).map(|e| e.id))
        .collect()
}

/// Union of the absolute bounds of `ids`. Unknown IDs are skipped.
pub fn selection_bounds(arena: &ElementArena, ids: &[ElementId]) -> Option<Bounds> {
    ids.iter()
        .filter_map(|&id| arena.index_of(id))
        .filter_map(|idx| arena.absolute_bounds(idx))
        .reduce(|acc, b| acc.union(&b))
}

/// Which resize handle of `bounds` lies within `tolerance` of `p`, if any.
/// Corners are tested before edges so they win where they overlap.
pub fn hit_handle(bounds: &Bounds, p: Point, tolerance: f64) -> Option<Handle> {
    let mut handles = Handle::ALL;
    handles.sort_by_key(|h| !h.is_corner());
    handles.into_iter().find(|h| {
        let hp = h.position(bounds.left, bounds.top, bounds.width, bounds.height);
        (hp.x - p.x).abs() <= tolerance && (hp.y - p.y).abs() <= tolerance
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vectra_core::{Element, ElementKind};

    fn rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new(
            ElementId::intern(id),
            ElementKind::Rectangle { corner_radius: 0.0 },
            x,
            y,
            w,
            h,
        )
    }

    fn scene() -> ElementArena {
        let mut arena = ElementArena::new();
        arena.insert(rect("hit_back", 0.0, 0.0, 200.0, 200.0), None).unwrap();
        arena.insert(rect("hit_front", 50.0, 50.0, 50.0, 50.0), None).unwrap();
        let group = arena
            .insert(
                Element::new(
                    ElementId::intern("hit_group"),
                    ElementKind::Group,
                    500.0,
                    500.0,
                    100.0,
                    100.0,
                ),
                None,
            )
            .unwrap();
        arena
            .insert(rect("hit_child", 10.0, 10.0, 20.0, 20.0), Some(group))
            .unwrap();
        arena
    }

    #[test]
    fn topmost_element_wins() {
        let arena = scene();
        assert_eq!(
            hit_test(&arena, Point::new(60.0, 60.0)),
            Some(ElementId::intern("hit_front"))
        );
        assert_eq!(
            hit_test(&arena, Point::new(10.0, 10.0)),
            Some(ElementId::intern("hit_back"))
        );
        assert_eq!(hit_test(&arena, Point::new(3000.0, 10.0)), None);
    }

    #[test]
    fn children_hit_in_canvas_space() {
        let arena = scene();
        assert_eq!(
            hit_test(&arena, Point::new(515.0, 515.0)),
            Some(ElementId::intern("hit_child"))
        );
        assert_eq!(
            hit_test(&arena, Point::new(590.0, 590.0)),
            Some(ElementId::intern("hit_group"))
        );
    }

    #[test]
    fn hidden_elements_are_skipped() {
        let mut arena = scene();
        let front = arena.index_of(ElementId::intern("hit_front")).unwrap();
        arena.get_mut(front).unwrap().visible = false;
        assert_eq!(
            hit_test(&arena, Point::new(60.0, 60.0)),
            Some(ElementId::intern("hit_back"))
        );
    }

    #[test]
    fn marquee_collects_intersecting() {
        let arena = scene();
        let hits = hit_test_rect(&arena, Rect::new(40.0, 40.0, 120.0, 120.0));
        assert_eq!(
            hits,
            vec![ElementId::intern("hit_back"), ElementId::intern("hit_front")]
        );
        assert!(hit_test_rect(&arena, Rect::new(1000.0, 1000.0, 1100.0, 1100.0)).is_empty());
    }

    #[test]
    fn selection_bounds_unions() {
        let arena = scene();
        let b = selection_bounds(
            &arena,
            &[ElementId::intern("hit_front"), ElementId::intern("hit_child")],
        )
        .unwrap();
        assert_eq!((b.left, b.top, b.right, b.bottom), (50.0, 50.0, 530.0, 530.0));
        assert_eq!(selection_bounds(&arena, &[]), None);
    }

    #[test]
    fn handles_by_proximity() {
        let b = Bounds::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            hit_handle(&b, Point::new(302.0, 198.0), 6.0),
            Some(Handle::SouthEast)
        );
        assert_eq!(
            hit_handle(&b, Point::new(200.0, 101.0), 6.0),
            Some(Handle::North)
        );
        assert_eq!(hit_handle(&b, Point::new(200.0, 150.0), 6.0), None);
    }
}
