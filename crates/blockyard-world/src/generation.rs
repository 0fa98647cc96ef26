//! Initial world layout.

use blockyard_core::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_GROUND_GRID, GROUND_COLOR};
use blockyard_core::{BlockPos, Color};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::world::{Block, World};

/// Ground layer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Blocks per side of the square layer.
    pub grid: i32,
    /// Lattice spacing and block edge length.
    pub spacing: i32,
    /// Color of every ground block.
    pub color: Color,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GROUND_GRID,
            spacing: DEFAULT_BLOCK_SIZE,
            color: GROUND_COLOR,
        }
    }
}

impl GroundConfig {
    /// Build a world holding a flat `grid x grid` layer one cell below the
    /// origin, centered on the origin.
    ///
    /// Cell indices run over `-grid / 2 .. grid - grid / 2` on both
    /// horizontal axes, so a grid of 10 spans x and z from -10 to 8 with a
    /// spacing of 2.
    pub fn generate(&self) -> World {
        let mut world = World::new(self.spacing);
        let start = -self.grid / 2;
        let end = start + self.grid.max(0);
        let y = -self.spacing;

        world.replace_all((start..end).flat_map(|x| {
            (start..end).map(move |z| {
                Block::new(BlockPos::new(x * self.spacing, y, z * self.spacing), self.color)
            })
        }));

        debug!(blocks = world.len(), grid = self.grid, "generated ground layer");
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ground_has_hundred_blocks() {
        let world = GroundConfig::default().generate();
        assert_eq!(world.len(), 100);
        assert!(world.blocks().all(|b| b.color == GROUND_COLOR));
        assert!(world.blocks().all(|b| b.position.is_on_lattice(2)));
        assert_eq!(
            world.bounds(),
            Some((BlockPos::new(-10, -2, -10), BlockPos::new(8, -2, 8)))
        );
    }

    #[test]
    fn ground_sits_on_lattice() {
        let config = GroundConfig {
            grid: 3,
            spacing: 4,
            color: Color::BLUE,
        };
        let world = config.generate();
        assert_eq!(world.len(), 9);
        assert!(world.blocks().all(|b| b.position.is_on_lattice(4)));
        assert!(world.contains(BlockPos::new(0, -4, 0)));
    }

    #[test]
    fn empty_grid() {
        let config = GroundConfig {
            grid: 0,
            ..GroundConfig::default()
        };
        assert!(config.generate().is_empty());
    }
}
