//=========================================================================
// Input Events
//
// Platform-independent representation of the player's input: mouse
// clicks and movement for buttons, options and the drawing canvas; keys
// for Enter/Backspace/undo; typed characters for dialog text fields.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (per-frame pressed/down/released, typed text)
//         ↓
//    Scenes / HUD
// ```
//
// Equality ignores `MouseMoved` coordinates so the platform can coalesce
// movement (last position wins) in a set.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical key identifier (layout independent).
///
/// Text entry does not go through key codes; see [`InputEvent::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Any key the platform layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// ```text
/// KeyDown{Enter, NONE} == KeyDown{Enter, NONE}   ✓
/// KeyDown{Z, CTRL}     == KeyDown{Z, NONE}       ✗ (different mods)
/// MouseMoved{..}       == MouseMoved{..}         ✓ (coordinates ignored)
/// Text('a')            == Text('b')              ✗
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },

    KeyUp { key: KeyCode, modifiers: Modifiers },

    MouseButtonDown { button: MouseButton, modifiers: Modifiers },

    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in canvas pixels (top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// A character produced by the keyboard layout (already shifted).
    Text(char),

    /// Unrecognized event; ignored.
    Unidentified,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Returns the event with its modifier state replaced.
    ///
    /// No effect on `MouseMoved`, `Text` and `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Text(a), Text(b)) => a == b,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Consistent with `PartialEq`: coordinates of `MouseMoved` are not hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::Text(c) => c.hash(state),
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier key state. Ctrl also covers Command on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    //--- Test Helpers -----------------------------------------------------

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // Equality Tests
    //=====================================================================

    #[test]
    fn mouse_moved_ignores_coordinates() {
        let a = InputEvent::MouseMoved { x: 10.0, y: 10.0 };
        let b = InputEvent::MouseMoved { x: 640.0, y: 360.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn modifiers_distinguish_shortcuts() {
        let undo = InputEvent::KeyDown { key: KeyCode::KeyZ, modifiers: Modifiers::CTRL };
        assert_ne!(undo, key_down(KeyCode::KeyZ));
        assert_ne!(hash_of(&undo), hash_of(&key_down(KeyCode::KeyZ)));
    }

    #[test]
    fn text_compares_by_character() {
        assert_eq!(InputEvent::Text('a'), InputEvent::Text('a'));
        assert_ne!(InputEvent::Text('a'), InputEvent::Text('A'));
        assert_ne!(InputEvent::Text('a'), key_down(KeyCode::KeyA));
    }

    #[test]
    fn movement_coalesces_in_a_set() {
        let mut set = HashSet::new();
        set.replace(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::MouseMoved { x: 5.0, y: 7.0 });

        assert_eq!(set.len(), 1);
        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (5.0, 7.0)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }

    //=====================================================================
    // with_modifiers Tests
    //=====================================================================

    #[test]
    fn with_modifiers_updates_buttons() {
        let event = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        match event.with_modifiers(Modifiers::SHIFT) {
            InputEvent::MouseButtonDown { button, modifiers } => {
                assert_eq!(button, MouseButton::Left);
                assert_eq!(modifiers, Modifiers::SHIFT);
            }
            other => panic!("Wrong event type: {:?}", other),
        }
    }

    #[test]
    fn with_modifiers_ignores_text() {
        let updated = InputEvent::Text('x').with_modifiers(Modifiers::CTRL);
        assert_eq!(updated, InputEvent::Text('x'));
    }
}
