//! Position-keyed block store.

use blockyard_core::{BlockPos, Color};
use hashbrown::HashMap;
use tracing::debug;

/// A placed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub position: BlockPos,
    pub color: Color,
}

impl Block {
    #[inline]
    pub const fn new(position: BlockPos, color: Color) -> Self {
        Self { position, color }
    }
}

/// The set of placed blocks.
///
/// At most one block occupies a position. All mutation happens on the
/// session thread, so the store carries no synchronization.
#[derive(Debug, Clone)]
pub struct World {
    blocks: HashMap<BlockPos, Color>,
    /// Lattice spacing, which is also the block edge length.
    spacing: i32,
}

impl World {
    /// Create an empty world on a lattice of the given spacing.
    ///
    /// # Panics
    ///
    /// Panics if `spacing` is not positive. Spacings read from configuration
    /// are checked by `SessionConfig::validate` before a world is built.
    pub fn new(spacing: i32) -> Self {
        assert!(spacing > 0, "lattice spacing must be positive");
        Self {
            blocks: HashMap::new(),
            spacing,
        }
    }

    /// Lattice spacing and block edge length.
    #[inline]
    pub const fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Place a block. Returns `false`, leaving the world unchanged, if the
    /// position is already occupied.
    #[must_use = "placement can be rejected"]
    pub fn place(&mut self, position: BlockPos, color: Color) -> bool {
        match self.blocks.entry(position) {
            hashbrown::hash_map::Entry::Occupied(_) => {
                debug!(%position, "placement rejected, cell occupied");
                false
            }
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(color);
                true
            }
        }
    }

    /// Remove the block at `position`, returning it if one was present.
    pub fn remove(&mut self, position: BlockPos) -> Option<Block> {
        self.blocks
            .remove(&position)
            .map(|color| Block::new(position, color))
    }

    /// Repaint the block at `position`, returning its previous color.
    ///
    /// Does nothing and returns `None` if no block is there.
    pub fn paint(&mut self, position: BlockPos, color: Color) -> Option<Color> {
        self.blocks
            .get_mut(&position)
            .map(|current| std::mem::replace(current, color))
    }

    /// Look up the block at `position`.
    #[must_use]
    pub fn get(&self, position: BlockPos) -> Option<Block> {
        self.blocks
            .get(&position)
            .map(|&color| Block::new(position, color))
    }

    #[must_use]
    pub fn contains(&self, position: BlockPos) -> bool {
        self.blocks.contains_key(&position)
    }

    /// Iterate over all blocks. The order is unspecified and may differ
    /// between runs.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .iter()
            .map(|(&position, &color)| Block::new(position, color))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Remove every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Replace the whole world with `blocks`.
    ///
    /// Later entries win over earlier ones at the same position.
    pub fn replace_all(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.clear();
        for block in blocks {
            self.blocks.insert(block.position, block.color);
        }
    }

    /// Smallest and largest occupied positions, per axis.
    #[must_use]
    pub fn bounds(&self) -> Option<(BlockPos, BlockPos)> {
        let mut positions = self.blocks.keys().copied();
        let first = positions.next()?;
        Some(positions.fold((first, first), |(lo, hi), pos| (lo.min(pos), hi.max(pos))))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(blockyard_core::constants::DEFAULT_BLOCK_SIZE)
    }
}
