//! Keyboard input state tracking.

use hashbrown::HashMap;
use winit::keyboard::KeyCode;

use crate::button_state::ButtonState;

/// Held state of every key seen so far.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, ButtonState>,
}

impl KeyboardState {
    /// Create a new keyboard state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release. Returns `true` on a press edge.
    pub fn apply(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.keys.entry(key).or_default().apply(pressed)
    }

    /// Returns `true` if the key is currently held.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_pressed())
    }

    /// Returns `true` if the key went down this tick.
    #[must_use]
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_just_pressed())
    }

    /// Called at end of tick to settle key edges.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            state.end_frame();
        }
    }

    /// Forget all held keys, e.g. when the host window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
