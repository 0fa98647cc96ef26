//! Mouse input state tracking.

use winit::event::MouseButton as WinitMouseButton;

use crate::button_state::ButtonState;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Removes or paints the targeted block.
    Left,
    /// Places a block against the targeted face.
    Right,
    Middle,
}

impl MouseButton {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            _ => Err(()),
        }
    }
}

/// Held mouse buttons.
///
/// Pointer motion is not tracked here: the session steers the camera as each
/// motion event is drained.
#[derive(Debug, Default)]
pub struct MouseState {
    buttons: [ButtonState; MouseButton::COUNT],
}

impl MouseState {
    /// Create a new mouse state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a button press or release. Returns `true` on a press edge.
    pub fn apply_button(&mut self, button: MouseButton, pressed: bool) -> bool {
        self.buttons[button.index()].apply(pressed)
    }

    /// Returns `true` if the button is currently held.
    #[must_use]
    pub const fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].is_pressed()
    }

    /// Returns `true` if the button went down this tick.
    #[must_use]
    pub const fn is_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].is_just_pressed()
    }

    /// Called at end of tick to settle button edges.
    pub fn end_frame(&mut self) {
        for button in &mut self.buttons {
            button.end_frame();
        }
    }

    /// Forget all held buttons.
    pub fn clear(&mut self) {
        self.buttons = [ButtonState::Released; MouseButton::COUNT];
    }
}
