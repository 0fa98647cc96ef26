//! Active tool, palette and movement speed.

use blockyard_core::constants::DEFAULT_PAINT_COLOR;
use blockyard_core::Color;
use serde::{Deserialize, Serialize};

/// What the mouse buttons do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Right click places, left click removes.
    #[default]
    PlaceRemove,
    /// Left click repaints the targeted block.
    Paint,
}

/// Tool selection and the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    tool: Tool,
    color: Color,
    palette_open: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::PlaceRemove,
            color: DEFAULT_PAINT_COLOR,
            palette_open: false,
        }
    }
}

impl ToolState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Color used both for new blocks and for painting.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn palette_open(&self) -> bool {
        self.palette_open
    }

    /// Switch tools. The palette opens with the paint tool and closes with
    /// the place tool.
    pub fn select(&mut self, tool: Tool) {
        self.tool = tool;
        self.palette_open = tool == Tool::Paint;
    }

    /// Choose a color from the palette. Closes the palette.
    pub fn pick_color(&mut self, color: Color) {
        self.color = color;
        self.palette_open = false;
    }
}

/// Base movement speed, cycled by the speed button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedPreset {
    #[default]
    Normal,
    Fast,
    Slow,
}

impl SpeedPreset {
    /// Normal, then fast, then slow, then back to normal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::Fast,
            Self::Fast => Self::Slow,
            Self::Slow => Self::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_switch_drives_palette() {
        let mut tools = ToolState::new();
        assert_eq!(tools.tool(), Tool::PlaceRemove);
        assert_eq!(tools.color(), Color::WHITE);

        tools.select(Tool::Paint);
        assert!(tools.palette_open());

        tools.pick_color(Color::RED);
        assert!(!tools.palette_open());
        assert_eq!(tools.tool(), Tool::Paint);
        assert_eq!(tools.color(), Color::RED);

        tools.select(Tool::Paint);
        tools.select(Tool::PlaceRemove);
        assert!(!tools.palette_open());
        assert_eq!(tools.color(), Color::RED);
    }

    #[test]
    fn speed_cycle() {
        let preset = SpeedPreset::default();
        assert_eq!(preset, SpeedPreset::Normal);
        assert_eq!(preset.next(), SpeedPreset::Fast);
        assert_eq!(preset.next().next(), SpeedPreset::Slow);
        assert_eq!(preset.next().next().next(), SpeedPreset::Normal);
    }
}
