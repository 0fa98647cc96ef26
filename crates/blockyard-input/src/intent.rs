//! Movement keys held during a tick.

use bitflags::bitflags;

bitflags! {
    /// Movement requested for one tick.
    ///
    /// Opposite directions may both be set; they cancel out in the axis
    /// accessors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveIntent: u8 {
        const FORWARD = 0b0000_0001;
        const BACK    = 0b0000_0010;
        const LEFT    = 0b0000_0100;
        const RIGHT   = 0b0000_1000;
        const UP      = 0b0001_0000;
        const DOWN    = 0b0010_0000;
        /// Multiply the speed while held.
        const SPRINT  = 0b0100_0000;
    }
}

impl MoveIntent {
    /// `+1` forward, `-1` back, `0` for neither or both.
    #[inline]
    #[must_use]
    pub const fn forward_axis(self) -> f32 {
        axis(self.contains(Self::FORWARD), self.contains(Self::BACK))
    }

    /// `+1` left, `-1` right, `0` for neither or both.
    #[inline]
    #[must_use]
    pub const fn left_axis(self) -> f32 {
        axis(self.contains(Self::LEFT), self.contains(Self::RIGHT))
    }

    /// `+1` up, `-1` down, `0` for neither or both.
    #[inline]
    #[must_use]
    pub const fn vertical_axis(self) -> f32 {
        axis(self.contains(Self::UP), self.contains(Self::DOWN))
    }

    /// Returns `true` if the sprint key is held.
    #[inline]
    #[must_use]
    pub const fn sprint(self) -> bool {
        self.contains(Self::SPRINT)
    }
}

const fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
