//! Input abstraction layer.
//!
//! Normalizes pointer and keyboard events from the host into an
//! `InputEvent` consumed by the select tool. Pointer coordinates are in
//! screen pixels; the tool maps them onto the canvas through the viewport.

use vectra_core::Point;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, modifiers: Modifiers },
    PointerMove { x: f64, y: f64, modifiers: Modifiers },
    PointerUp { x: f64, y: f64, modifiers: Modifiers },
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerDown { x, y, modifiers }
    }

    pub fn pointer_move(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerMove { x, y, modifiers }
    }

    pub fn pointer_up(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerUp { x, y, modifiers }
    }

    /// Screen position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            Self::Key { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. }
            | Self::Key { modifiers, .. } => *modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_expose_position() {
        let e = InputEvent::pointer_move(3.0, 4.0, Modifiers::SHIFT);
        assert_eq!(e.position(), Some(Point::new(3.0, 4.0)));
        assert!(e.modifiers().shift);

        let k = InputEvent::Key {
            key: "ArrowLeft".into(),
            modifiers: Modifiers::NONE,
        };
        assert_eq!(k.position(), None);
    }

    #[test]
    fn command_covers_ctrl_and_meta() {
        assert!(Modifiers { meta: true, ..Modifiers::NONE }.command());
        assert!(Modifiers { ctrl: true, ..Modifiers::NONE }.command());
        assert!(!Modifiers::SHIFT.command());
    }
}
