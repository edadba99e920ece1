//! Element data model.
//!
//! Elements are design primitives placed on the virtual canvas. Each one
//! persists only its kind, `(x, y, width, height)`, a visibility flag and
//! an optional parent. Coordinates are relative to the parent group, or to
//! the canvas for top-level elements.
//!
//! The group tree is stored as a flat arena: every element knows its
//! parent's `ElementIndex`, and traversals walk the arena iteratively.

use crate::bounds::Bounds;
use crate::id::ElementId;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Element kinds ───────────────────────────────────────────────────────

/// What an element draws. Kind-specific data lives in the variant; shared
/// geometry lives on `Element`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle {
        #[serde(default, rename = "cornerRadius")]
        corner_radius: f64,
    },
    Circle,
    Text {
        content: String,
        #[serde(default = "default_font_size", rename = "fontSize")]
        font_size: f64,
    },
    Line {
        #[serde(default = "default_stroke_width", rename = "strokeWidth")]
        stroke_width: f64,
    },
    Image {
        src: String,
    },
    /// Container; children are positioned relative to it.
    Group,
}

fn default_font_size() -> f64 {
    24.0
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_visible() -> bool {
    true
}

impl ElementKind {
    /// Lowercase kind name, also used as the prefix for generated IDs.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Rectangle { .. } => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Text { .. } => "text",
            ElementKind::Line { .. } => "line",
            ElementKind::Image { .. } => "image",
            ElementKind::Group => "group",
        }
    }
}

// ─── Positioned ──────────────────────────────────────────────────────────

/// Shared positional behavior of everything that occupies a box on the canvas.
pub trait Positioned {
    /// The box in its own coordinate frame (parent-relative for elements).
    fn frame(&self) -> Rect;

    fn set_origin(&mut self, x: f64, y: f64);

    fn set_size(&mut self, width: f64, height: f64);

    fn origin(&self) -> Point {
        self.frame().origin()
    }

    fn size(&self) -> Size {
        self.frame().size()
    }

    fn bounds(&self) -> Bounds {
        let f = self.frame();
        Bounds::new(f.x0, f.y0, f.width(), f.height())
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// Position of an element inside an `ElementArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementIndex(u32);

impl ElementIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A positioned, sized design primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    pub parent: Option<ElementIndex>,
}

impl Element {
    /// A visible top-level element.
    pub fn new(id: ElementId, kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            visible: true,
            parent: None,
        }
    }

    /// Same as `new`, with an ID generated from the kind name.
    pub fn anonymous(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        let id = ElementId::fresh(kind.name());
        Self::new(id, kind, x, y, width, height)
    }
}

impl Positioned for Element {
    fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Wire form of an element: the parent is referenced by ID instead of index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
}

// ─── Arena ───────────────────────────────────────────────────────────────

/// Flat storage for the element tree.
///
/// Insertion order is paint order among siblings: later siblings draw on
/// top of earlier ones. Parents always precede their children.
#[derive(Debug, Clone, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
    id_index: HashMap<ElementId, ElementIndex>,
}

impl ElementArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or at the top level).
    ///
    /// # Errors
    /// Fails if the ID is already taken or the parent index is out of range.
    pub fn insert(
        &mut self,
        mut element: Element,
        parent: Option<ElementIndex>,
    ) -> Result<ElementIndex, String> {
        if self.id_index.contains_key(&element.id) {
            return Err(format!("duplicate element id `{}`", element.id));
        }
        if let Some(p) = parent
            && p.as_usize() >= self.elements.len()
        {
            return Err(format!(
                "parent index {} out of range for `{}`",
                p.as_usize(),
                element.id
            ));
        }
        let idx = ElementIndex(self.elements.len() as u32);
        element.parent = parent;
        self.id_index.insert(element.id, idx);
        self.elements.push(element);
        Ok(idx)
    }

    /// Build an arena from wire records in any order.
    ///
    /// Parents are placed before their children; sibling order follows the
    /// input order.
    ///
    /// # Errors
    /// Fails on duplicate IDs, references to unknown parents, and parent cycles.
    pub fn from_records(records: Vec<ElementRecord>) -> Result<Self, String> {
        let mut position: HashMap<ElementId, usize> = HashMap::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            if position.insert(r.id, i).is_some() {
                return Err(format!("duplicate element id `{}`", r.id));
            }
        }

        let mut parent_of: Vec<Option<usize>> = Vec::with_capacity(records.len());
        for r in &records {
            let p = match r.parent {
                Some(pid) => match position.get(&pid) {
                    Some(&p) => Some(p),
                    None => {
                        return Err(format!("element `{}` references unknown parent `{pid}`", r.id));
                    }
                },
                None => None,
            };
            parent_of.push(p);
        }

        // Depth of each record; a walk longer than the record count means a cycle.
        let mut depth = vec![0usize; records.len()];
        for (i, r) in records.iter().enumerate() {
            let mut steps = 0;
            let mut cur = parent_of[i];
            while let Some(p) = cur {
                steps += 1;
                if steps > records.len() {
                    return Err(format!("parent cycle involving element `{}`", r.id));
                }
                cur = parent_of[p];
            }
            depth[i] = steps;
        }

        // Stable sort by depth keeps sibling order and puts parents first.
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by_key(|&i| depth[i]);

        let mut arena = ElementArena::new();
        let mut slots: Vec<Option<ElementRecord>> = records.into_iter().map(Some).collect();
        for i in order {
            let Some(r) = slots[i].take() else { continue };
            let parent = match r.parent {
                Some(pid) => Some(
                    arena
                        .index_of(pid)
                        .ok_or_else(|| format!("parent `{pid}` of `{}` not yet placed", r.id))?,
                ),
                None => None,
            };
            let mut element = Element::new(r.id, r.kind, r.x, r.y, r.width, r.height);
            element.visible = r.visible;
            arena.insert(element, parent)?;
        }
        log::trace!("arena built with {} elements", arena.len());
        Ok(arena)
    }

    /// Parse a JSON array of element records.
    ///
    /// # Errors
    /// Returns the JSON error or the arena construction error.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let records: Vec<ElementRecord> =
            serde_json::from_str(json).map_err(|e| format!("invalid element list: {e}"))?;
        Self::from_records(records)
    }

    /// Wire records in arena order.
    pub fn to_records(&self) -> Vec<ElementRecord> {
        self.elements
            .iter()
            .map(|e| ElementRecord {
                id: e.id,
                kind: e.kind.clone(),
                x: e.x,
                y: e.y,
                width: e.width,
                height: e.height,
                visible: e.visible,
                parent: e.parent.map(|p| self.elements[p.as_usize()].id),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, idx: ElementIndex) -> Option<&Element> {
        self.elements.get(idx.as_usize())
    }

    pub fn get_mut(&mut self, idx: ElementIndex) -> Option<&mut Element> {
        self.elements.get_mut(idx.as_usize())
    }

    pub fn index_of(&self, id: ElementId) -> Option<ElementIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn get_by_id(&self, id: ElementId) -> Option<&Element> {
        self.index_of(id).and_then(|idx| self.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementIndex, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementIndex(i as u32), e))
    }

    pub fn parent(&self, idx: ElementIndex) -> Option<ElementIndex> {
        self.get(idx).and_then(|e| e.parent)
    }

    /// Children of `parent` (or top-level elements for `None`) in paint order.
    pub fn children(&self, parent: Option<ElementIndex>) -> Vec<ElementIndex> {
        self.iter()
            .filter(|(_, e)| e.parent == parent)
            .map(|(i, _)| i)
            .collect()
    }

    /// Ancestors from the direct parent up to the top level.
    pub fn ancestors(&self, idx: ElementIndex) -> SmallVec<[ElementIndex; 4]> {
        let mut out = SmallVec::new();
        let mut cur = self.parent(idx);
        // Bounded by arena size: `insert` only accepts existing parents,
        // so the chain cannot loop.
        while let Some(p) = cur {
            if out.len() >= self.elements.len() {
                break;
            }
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    /// True if `ancestor` is a parent, grandparent, ... of `idx`.
    pub fn is_ancestor_of(&self, ancestor: ElementIndex, idx: ElementIndex) -> bool {
        self.ancestors(idx).contains(&ancestor)
    }

    /// Canvas position of the frame an element's `(x, y)` is expressed in.
    pub fn parent_origin(&self, idx: ElementIndex) -> Point {
        self.ancestors(idx)
            .iter()
            .filter_map(|&a| self.get(a))
            .fold(Point::ZERO, |acc, a| Point::new(acc.x + a.x, acc.y + a.y))
    }

    /// Bounds in canvas coordinates.
    pub fn absolute_bounds(&self, idx: ElementIndex) -> Option<Bounds> {
        let e = self.get(idx)?;
        let o = self.parent_origin(idx);
        Some(e.bounds().moved_to(o.x + e.x, o.y + e.y))
    }

    /// Visible only if the element and every ancestor are visible.
    pub fn is_visible(&self, idx: ElementIndex) -> bool {
        match self.get(idx) {
            Some(e) if e.visible => self
                .ancestors(idx)
                .iter()
                .all(|&a| self.get(a).is_some_and(|p| p.visible)),
            _ => false,
        }
    }

    /// Absolute bounds of the visible siblings an element may snap to.
    pub fn snap_targets(&self, idx: ElementIndex) -> Vec<(ElementId, Bounds)> {
        let parent = self.parent(idx);
        self.children(parent)
            .into_iter()
            .filter(|&sib| sib != idx && self.is_visible(sib))
            .filter_map(|sib| {
                let e = self.get(sib)?;
                Some((e.id, self.absolute_bounds(sib)?))
            })
            .collect()
    }

    /// Move an element so its canvas-space top-left lands on `(x, y)`.
    pub fn set_absolute_origin(&mut self, idx: ElementIndex, x: f64, y: f64) {
        let o = self.parent_origin(idx);
        if let Some(e) = self.get_mut(idx) {
            e.set_origin(x - o.x, y - o.y);
        }
    }

    /// Depth-first paint order: parents before children, earlier siblings
    /// before later ones. The last entry is the topmost element.
    pub fn paint_order(&self) -> Vec<ElementIndex> {
        let mut children: HashMap<Option<ElementIndex>, Vec<ElementIndex>> = HashMap::new();
        for (i, e) in self.iter() {
            children.entry(e.parent).or_default().push(i);
        }

        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementIndex> = children
            .get(&None)
            .map(|c| c.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(idx) = stack.pop() {
            order.push(idx);
            if let Some(kids) = children.get(&Some(idx)) {
                stack.extend(kids.iter().rev().copied());
            }
        }
        order
    }
}
