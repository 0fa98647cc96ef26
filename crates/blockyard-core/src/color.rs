//! Packed RGB block colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A block color packed as `0xRRGGBB`.
///
/// Values above `0xFFFFFF` can only come from imported documents; they are
/// kept verbatim so a save/load cycle reproduces the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self(0xFF_FF_FF);
    pub const BLACK: Self = Self(0x00_00_00);
    pub const RED: Self = Self(0xFF_00_00);
    pub const GREEN: Self = Self(0x00_FF_00);
    pub const BLUE: Self = Self(0x00_00_FF);

    /// Largest value that is a valid `0xRRGGBB` triple.
    pub const MAX_RGB: u32 = 0xFF_FF_FF;

    /// Create a color from a packed `0xRRGGBB` value.
    #[inline]
    pub const fn new(packed: u32) -> Self {
        Self(packed)
    }

    /// Create a color from its channels.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed value.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns `true` if the value fits in 24 bits.
    #[inline]
    pub const fn is_rgb(self) -> bool {
        self.0 <= Self::MAX_RGB
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Parses the notations a palette hands back: `#rrggbb`, `0xrrggbb` and
/// CSS `rgb(r, g, b)`.
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidData(format!("unrecognized color `{s}`"));

        if let Some(hex) = s.strip_prefix('#').or_else(|| s.strip_prefix("0x")) {
            if hex.len() != 6 {
                return Err(invalid());
            }
            return u32::from_str_radix(hex, 16).map(Self).map_err(|_| invalid());
        }

        let inner = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let channels = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match channels.as_slice() {
            [r, g, b] => Ok(Self::from_rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels() {
        let color = Color::from_rgb(0x22, 0x8B, 0x22);
        assert_eq!(color.packed(), 0x22_8B_22);
        assert_eq!((color.r(), color.g(), color.b()), (0x22, 0x8B, 0x22));
        assert!(color.is_rgb());
        assert!(!Color::new(0x1_00_00_00).is_rgb());
    }

    #[test]
    fn parse_notations() {
        assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("0x0000ff".parse::<Color>().unwrap(), Color::BLUE);
        assert_eq!("rgb(0, 255, 0)".parse::<Color>().unwrap(), Color::GREEN);
        assert_eq!(" #FFFFFF ".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("#fff".parse::<Color>().is_err());
        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("rgb(256, 0, 0)".parse::<Color>().is_err());
        assert!("red".parse::<Color>().is_err());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color::new(0x22_8B_22).to_string(), "#228b22");
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Color::WHITE).unwrap(), "16777215");
    }
}
