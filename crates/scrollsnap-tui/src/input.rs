use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use scrollsnap_core::{Axis, Direction};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Programmatic one-cell step
    Step(Direction),
    /// User scroll, in wheel notches (negative is up/left)
    Wheel { axis: Axis, notches: i8 },
    /// Pointer moved to a terminal position
    Hover { column: u16, row: u16 },
    /// Left click at a terminal position
    Click { column: u16, row: u16 },
    ToggleArrows,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);
    if let Some(action) = keymap.get(&binding) {
        return *action;
    }
    // Some terminals report Shift+char with the shifted character only
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        if let Some(action) = keymap.get(&KeyBinding::simple(key.code)) {
            return *action;
        }
    }
    Action::None
}

/// Handle a mouse event; Shift turns the vertical wheel horizontal
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    let shifted = mouse.modifiers.contains(KeyModifiers::SHIFT);
    let vertical = if shifted { Axis::X } else { Axis::Y };
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Wheel {
            axis: vertical,
            notches: 1,
        },
        MouseEventKind::ScrollUp => Action::Wheel {
            axis: vertical,
            notches: -1,
        },
        MouseEventKind::ScrollRight => Action::Wheel {
            axis: Axis::X,
            notches: 1,
        },
        MouseEventKind::ScrollLeft => Action::Wheel {
            axis: Axis::X,
            notches: -1,
        },
        MouseEventKind::Moved => Action::Hover {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Down(MouseButton::Left) => Action::Click {
            column: mouse.column,
            row: mouse.row,
        },
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState};

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers,
        }
    }

    #[test]
    fn test_keys_map_to_steps() {
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &keymap),
            Action::Step(Direction::Down)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right, KeyModifiers::NONE), &keymap),
            Action::Step(Direction::Right)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE), &keymap),
            Action::None
        );
    }

    #[test]
    fn test_shift_wheel_scrolls_horizontally() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, KeyModifiers::NONE)),
            Action::Wheel { axis: Axis::Y, notches: 1 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, KeyModifiers::SHIFT)),
            Action::Wheel { axis: Axis::X, notches: -1 }
        );
    }

    #[test]
    fn test_pointer_events() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, KeyModifiers::NONE)),
            Action::Hover { column: 7, row: 3 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), KeyModifiers::NONE)),
            Action::Click { column: 7, row: 3 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), KeyModifiers::NONE)),
            Action::None
        );
    }
}
