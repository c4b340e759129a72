//=========================================================================
// State Tracker
//=========================================================================
//
// Per-frame input state for scenes: which keys/buttons went down, are
// held, or came up this tick; where the pointer is; what was typed.
//
// Architecture:
//   InputEvent → process_events() → HashSets + text buffer → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};
use crate::core::render::Point;

//=== StateTracker ========================================================

/// Tracks held keys/buttons and their per-frame transitions.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    pointer: Point,
    modifiers: Modifiers,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_buttons_released_this_frame: HashSet<MouseButton>,
    typed_this_frame: Vec<char>,
    pointer_moved: bool,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            pointer: Point::default(),
            modifiers: Modifiers::NONE,
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            mouse_buttons_released_this_frame: HashSet::new(),
            typed_this_frame: Vec::new(),
            pointer_moved: false,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.mouse_buttons_released_this_frame.clear();
        self.typed_this_frame.clear();
        self.pointer_moved = false;
    }

    /// Applies a batch of events in order.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Closes the frame. Kept as an explicit step so callers see the
    /// same lifecycle regardless of what the tracker derives.
    pub(crate) fn finalize_frame(&mut self) {
        // Text typed while Ctrl is held is a shortcut, not input.
        if self.modifiers.ctrl {
            self.typed_this_frame.clear();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released_this_frame.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.insert(*button) {
                    self.mouse_buttons_pressed_this_frame.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.remove(button) {
                    self.mouse_buttons_released_this_frame.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.pointer = Point::new(*x, *y);
                self.pointer_moved = true;
            }

            InputEvent::Text(c) => self.typed_this_frame.push(*c),

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` on the frame a key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// `true` while a key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` on the frame a key came up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Characters typed this frame, in order.
    pub fn typed(&self) -> &[char] {
        &self.typed_this_frame
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_frame.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released_this_frame.contains(&button)
    }

    /// Pointer position in canvas pixels.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Where the primary button was clicked this frame, if it was.
    pub fn click(&self) -> Option<Point> {
        self.is_button_pressed(MouseButton::Left).then_some(self.pointer)
    }

    /// Pointer position while dragging with the primary button held.
    pub fn drag(&self) -> Option<Point> {
        let held = self.is_button_down(MouseButton::Left);
        (held && (self.pointer_moved || self.is_button_pressed(MouseButton::Left)))
            .then_some(self.pointer)
    }

    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
