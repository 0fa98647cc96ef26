//! Held-state tracking for keys and mouse buttons.

/// State of a key or mouse button across ticks.
///
/// ```text
/// Released ─press─> JustPressed ─end_frame─> Pressed
///     ^                                         │
///     │                                      release
///     │                                         v
///     └──────────end_frame──────────── JustReleased
/// ```
///
/// Host key repeat arrives as extra presses while held; those are not
/// edges and leave the state alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Pressed during the current tick.
    JustPressed,
    /// Held since an earlier tick.
    Pressed,
    /// Released during the current tick.
    JustReleased,
    /// Not held.
    #[default]
    Released,
}

impl ButtonState {
    /// Returns `true` if the button is held (including just pressed).
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns `true` if the button went down during the current tick.
    #[inline]
    #[must_use]
    pub const fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns `true` if the button went up during the current tick.
    #[inline]
    #[must_use]
    pub const fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }

    /// Apply a press or release. Returns `true` only for a press edge.
    #[inline]
    pub fn apply(&mut self, pressed: bool) -> bool {
        match (pressed, self.is_pressed()) {
            (true, false) => {
                *self = Self::JustPressed;
                true
            }
            (false, true) => {
                *self = Self::JustReleased;
                false
            }
            _ => false,
        }
    }

    /// Settle the tick's edges.
    #[inline]
    pub fn end_frame(&mut self) {
        match *self {
            Self::JustPressed => *self = Self::Pressed,
            Self::JustReleased => *self = Self::Released,
            Self::Pressed | Self::Released => {}
        }
    }
}
