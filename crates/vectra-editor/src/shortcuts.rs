//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The map lives in Rust so the browser host and native tests share it.
//!
//! - Arrows = nudge the selection (Shift = large step)
//! - G = toggle snapping
//! - Escape = cancel the gesture in progress, or deselect when idle

use crate::input::Modifiers;
use vectra_core::EngineConfig;

/// Direction of an arrow-key nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NudgeDirection {
    /// Unit vector for this direction, in canvas axes (y grows downward).
    pub fn unit(self) -> (f64, f64) {
        match self {
            NudgeDirection::Left => (-1.0, 0.0),
            NudgeDirection::Right => (1.0, 0.0),
            NudgeDirection::Up => (0.0, -1.0),
            NudgeDirection::Down => (0.0, 1.0),
        }
    }
}

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Nudge {
        direction: NudgeDirection,
        /// Shift held: use the large step.
        large: bool,
    },
    ToggleSnap,
    Cancel,
    SelectAll,
}

impl ShortcutAction {
    /// Canvas-unit offset for a nudge action; `None` for everything else.
    pub fn nudge_offset(self, config: &EngineConfig) -> Option<(f64, f64)> {
        match self {
            ShortcutAction::Nudge { direction, large } => {
                let step = if large {
                    config.nudge_step_large
                } else {
                    config.nudge_step
                };
                let (ux, uy) = direction.unit();
                Some((ux * step, uy * step))
            }
            _ => None,
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"ArrowLeft"`, `"g"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if let Some(direction) = match key {
            "ArrowLeft" => Some(NudgeDirection::Left),
            "ArrowRight" => Some(NudgeDirection::Right),
            "ArrowUp" => Some(NudgeDirection::Up),
            "ArrowDown" => Some(NudgeDirection::Down),
            _ => None,
        } {
            return Some(ShortcutAction::Nudge {
                direction,
                large: modifiers.shift,
            });
        }

        if modifiers.command() {
            return match key {
                "a" | "A" => Some(ShortcutAction::SelectAll),
                _ => None,
            };
        }

        match key {
            "g" | "G" => Some(ShortcutAction::ToggleSnap),
            "Escape" => Some(ShortcutAction::Cancel),
            _ => None,
        }
    }
}
