//! WASM bridge for Vectra: exposes the snapping and transform engine to
//! the browser editor.
//!
//! Compiled via `wasm-pack build --target web`. The host owns rendering;
//! this side owns the element geometry, the selection, and the gesture in
//! progress. Structured results cross the boundary as JSON strings.

use serde::Serialize;
use vectra_core::{ElementArena, ElementId, EngineConfig, Vec2, Viewport};
use vectra_editor::resize::{Geometry, Handle, compute_resize};
use vectra_editor::{EditContext, InputEvent, Modifiers, SelectTool};
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Holds the element arena, the view, the engine configuration, and the
/// select tool with its interaction session. All interaction from the
/// host JS goes through this struct.
#[wasm_bindgen]
pub struct CanvasEngine {
    arena: ElementArena,
    ctx: EditContext,
    tool: SelectTool,
}

impl CanvasEngine {
    fn with_config(config_json: Option<&str>) -> Result<Self, String> {
        let config = match config_json {
            Some(json) if !json.trim().is_empty() => EngineConfig::from_json(json)?,
            _ => EngineConfig::default(),
        };
        Ok(Self {
            arena: ElementArena::new(),
            ctx: EditContext {
                config,
                viewport: Viewport::default(),
            },
            tool: SelectTool::new(),
        })
    }

    fn load_elements(&mut self, json: &str) -> Result<(), String> {
        let arena = ElementArena::from_json(json)?;
        log::debug!("loaded {} elements", arena.len());
        self.arena = arena;
        self.tool.prune(&self.arena);
        Ok(())
    }

    fn dispatch(&mut self, event: InputEvent) -> String {
        let effect = self.tool.handle(&event, &mut self.arena, &mut self.ctx);
        to_json(&effect)
    }
}

#[wasm_bindgen]
impl CanvasEngine {
    /// Create a controller. `config_json` is an optional, possibly partial,
    /// engine config; omitted fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<CanvasEngine, JsValue> {
        console_error_panic_hook_setup();
        Self::with_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))
    }

    /// Replace the element list. Accepts a JSON array of element records.
    /// Selected IDs that no longer exist are dropped.
    pub fn set_elements(&mut self, json: &str) -> Result<(), JsValue> {
        self.load_elements(json).map_err(|e| JsValue::from_str(&e))
    }

    /// Current element list as a JSON array, parents referenced by ID.
    pub fn elements_json(&self) -> String {
        to_json(&self.arena.to_records())
    }

    pub fn config_json(&self) -> String {
        to_json(&self.ctx.config)
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn set_zoom(&mut self, zoom: f64) {
        self.ctx.viewport.set_zoom(zoom);
    }

    pub fn zoom(&self) -> f64 {
        self.ctx.viewport.zoom
    }

    /// Screen-pixel offset of the canvas origin.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.ctx.viewport.pan = Vec2::new(x, y);
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.ctx.config.snap.enabled = enabled;
    }

    pub fn snap_enabled(&self) -> bool {
        self.ctx.config.snap.enabled
    }

    // ─── Pointer & keyboard ──────────────────────────────────────────────

    /// Handle pointer down in screen pixels. Returns the tool effect as JSON.
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        self.dispatch(InputEvent::pointer_down(x, y, mods))
    }

    /// Handle pointer move in screen pixels. During a gesture the result is
    /// `{"kind":"transform", id, x, y, width, height, guides}`.
    pub fn handle_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        self.dispatch(InputEvent::pointer_move(x, y, mods))
    }

    pub fn handle_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = modifiers(shift, ctrl, alt, meta);
        self.dispatch(InputEvent::pointer_up(x, y, mods))
    }

    /// Handle a keyboard event (`KeyboardEvent.key`). Returns the tool
    /// effect as JSON; `{"kind":"idle"}` for unbound keys.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        self.dispatch(InputEvent::Key {
            key: key.to_string(),
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    // ─── Overlay queries ─────────────────────────────────────────────────

    /// Guides for the gesture in progress as a JSON array.
    pub fn guides_json(&self) -> String {
        to_json(&self.tool.guides())
    }

    /// Marquee rectangle in canvas units, or `null`.
    pub fn marquee_json(&self) -> String {
        to_json(&self.tool.marquee())
    }

    /// All selected element IDs as a JSON array.
    pub fn selected_ids(&self) -> String {
        to_json(&self.tool.selected)
    }

    /// Select an element by its ID; an empty ID clears the selection.
    /// Returns `true` if the element was found.
    pub fn select_by_id(&mut self, element_id: &str) -> bool {
        if element_id.is_empty() {
            self.tool.selected.clear();
            return true;
        }
        let id = ElementId::intern(element_id);
        if self.arena.get_by_id(id).is_some() {
            self.tool.selected = vec![id];
            true
        } else {
            false
        }
    }

    /// Canvas-space bounds of an element, or `{}` if not found.
    pub fn element_bounds(&self, element_id: &str) -> String {
        let id = ElementId::intern(element_id);
        match self
            .arena
            .index_of(id)
            .and_then(|idx| self.arena.absolute_bounds(idx))
        {
            Some(b) => to_json(&b),
            None => "{}".to_string(),
        }
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| serde_json::json!({ "kind": "error", "error": e.to_string() }).to_string())
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Vectra WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone helpers (no engine needed) ───────────────────────────────

/// Validate an element list. Returns JSON: `{"ok":true,"count":n}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_elements(json: &str) -> String {
    match ElementArena::from_json(json) {
        Ok(arena) => serde_json::json!({ "ok": true, "count": arena.len() }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
    }
}

/// Preview a resize without touching any engine state. `handle` is a
/// compass name (`"n"`, `"se"`, ...). Returns the geometry as JSON, or
/// `{"ok":false,"error":"..."}` for an unknown handle or a `min_size` that
/// is not a positive finite number.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn resize_preview(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    dx: f64,
    dy: f64,
    handle: &str,
    keep_aspect: bool,
    min_size: f64,
) -> String {
    let Some(handle) = Handle::from_name(handle) else {
        return serde_json::json!({ "ok": false, "error": format!("unknown handle `{handle}`") })
            .to_string();
    };
    if !(min_size.is_finite() && min_size > 0.0) {
        return serde_json::json!({
            "ok": false,
            "error": format!("min_size must be positive, got {min_size}")
        })
        .to_string();
    }
    let g = compute_resize(
        Geometry::new(x, y, width, height),
        Vec2::new(dx, dy),
        handle,
        keep_aspect,
        min_size,
    );
    to_json(&g)
}
