//! Core types and math for the Blockyard voxel sandbox.
//!
//! This crate provides the foundational types used throughout the sandbox:
//! - Lattice coordinates for block positions
//! - Packed RGB block colors
//! - Ray and axis-aligned box math for picking
//! - Common error types

pub mod color;
pub mod coords;
pub mod error;
pub mod math;

pub use color::Color;
pub use coords::BlockPos;
pub use error::{Error, Result};
pub use math::{Aabb, FaceHit, Ray};

/// Sandbox-wide constants
pub mod constants {
    use crate::color::Color;

    /// Edge length of a block, and the spacing of the block lattice.
    pub const DEFAULT_BLOCK_SIZE: i32 = 2;
    /// Blocks per side of the initial square ground layer.
    pub const DEFAULT_GROUND_GRID: i32 = 10;
    /// Color of the initial ground layer.
    pub const GROUND_COLOR: Color = Color::new(0x22_8B_22);
    /// Default paint color for new blocks.
    pub const DEFAULT_PAINT_COLOR: Color = Color::WHITE;
}
