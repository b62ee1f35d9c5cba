/// Sparse voxel storage with incremental bounds tracking.
/// The build space is unbounded in x/y, so blocks live in a hash map keyed
/// by a structural coordinate - no per-lookup string encoding. The store is
/// the sole writer of the bounds extrema.
pub mod block_type;

pub use block_type::{BlockType, FillPattern, BLOCK_TYPE_COUNT};

use glam::IVec2;
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Highest buildable level (inclusive). Levels run 0..=MAX_LEVEL.
pub const MAX_LEVEL: u8 = 49;
pub const LEVEL_COUNT: usize = MAX_LEVEL as usize + 1;

/// Fixed padding kept around occupied voxels in the bounds rectangle.
pub const BOUNDS_MARGIN: i32 = 5;

/// Hard cap on occupied voxels. Inserts beyond this fail; they never
/// silently truncate.
pub const MAX_BLOCKS: usize = 500_000;

/// Position of a single voxel. Unbounded in x/y, level-restricted in z.
/// Derived Hash/Eq make this a structural hash-map key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: u8,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// The (x, y) grid column this voxel belongs to, independent of level.
    #[inline]
    pub fn column(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

/// Whether a mutation actually altered the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    Changed,
    Unchanged,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("block capacity of {MAX_BLOCKS} reached")]
    CapacityExceeded,
    #[error("level {z} is outside the buildable range 0..={MAX_LEVEL}")]
    InvalidCoordinate { z: u8 },
}

/// Rectangle of grid cells covering every occupied voxel plus the buffer
/// margin on all sides. Coordinates are inclusive cell indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl GridBounds {
    /// Bounds of an empty store: the margin rectangle around the origin.
    pub const EMPTY: GridBounds = GridBounds {
        min_x: -BOUNDS_MARGIN,
        max_x: BOUNDS_MARGIN,
        min_y: -BOUNDS_MARGIN,
        max_y: BOUNDS_MARGIN,
    };

    /// The margin rectangle around a single cell.
    #[inline]
    pub const fn around(x: i32, y: i32) -> Self {
        Self {
            min_x: x - BOUNDS_MARGIN,
            max_x: x + BOUNDS_MARGIN,
            min_y: y - BOUNDS_MARGIN,
            max_y: y + BOUNDS_MARGIN,
        }
    }

    /// Grow the rectangle so (x, y) sits at least the margin away from
    /// every edge. Never shrinks.
    #[inline]
    pub fn expand_to(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x - BOUNDS_MARGIN);
        self.max_x = self.max_x.max(x + BOUNDS_MARGIN);
        self.min_y = self.min_y.min(y - BOUNDS_MARGIN);
        self.max_y = self.max_y.max(y + BOUNDS_MARGIN);
    }

    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    #[inline]
    pub fn intersect(&self, other: &GridBounds) -> GridBounds {
        GridBounds {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// True when the rectangle covers no cells (possible after intersect).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

/// Sparse map of occupied voxels plus the running bounds rectangle.
///
/// Bounds grow monotonically within a session: erasing blocks never shrinks
/// them, which keeps the visible grid stable while blocks are toggled. Only
/// an explicit `rebuild_bounds` (or `clear`) recomputes them from scratch.
pub struct VoxelStore {
    blocks: HashMap<BlockPos, BlockType>,
    bounds: GridBounds,
}

impl Default for VoxelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelStore {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            bounds: GridBounds::EMPTY,
        }
    }

    /// Place a block. Re-placing the identical type is `Unchanged` and does
    /// not touch the bounds; overwriting a different type is `Changed` and
    /// is always allowed, even at capacity. Only genuinely new voxels count
    /// against `MAX_BLOCKS`.
    pub fn place(&mut self, pos: BlockPos, block: BlockType) -> Result<Mutation, StoreError> {
        if pos.z > MAX_LEVEL {
            return Err(StoreError::InvalidCoordinate { z: pos.z });
        }

        match self.blocks.get(&pos) {
            Some(&existing) if existing == block => Ok(Mutation::Unchanged),
            Some(_) => {
                self.blocks.insert(pos, block);
                Ok(Mutation::Changed)
            }
            None => {
                if self.blocks.len() >= MAX_BLOCKS {
                    return Err(StoreError::CapacityExceeded);
                }
                self.blocks.insert(pos, block);
                self.bounds.expand_to(pos.x, pos.y);
                Ok(Mutation::Changed)
            }
        }
    }

    /// Remove the block at `pos` if present. Bounds are deliberately left
    /// alone; see `rebuild_bounds`.
    pub fn erase(&mut self, pos: BlockPos) -> Result<Mutation, StoreError> {
        if pos.z > MAX_LEVEL {
            return Err(StoreError::InvalidCoordinate { z: pos.z });
        }

        match self.blocks.remove(&pos) {
            Some(_) => Ok(Mutation::Changed),
            None => Ok(Mutation::Unchanged),
        }
    }

    #[inline]
    pub fn get(&self, pos: BlockPos) -> Option<BlockType> {
        self.blocks.get(&pos).copied()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Current bounds rectangle, margin included. O(1).
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// All occupied voxels, in no particular order. Restartable: call again
    /// for a fresh pass.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockPos, BlockType)> + '_ {
        self.blocks.iter().map(|(&pos, &block)| (pos, block))
    }

    /// Occupied cells of a single level, in no particular order.
    pub fn blocks_in_layer(&self, z: u8) -> impl Iterator<Item = (IVec2, BlockType)> + '_ {
        self.blocks
            .iter()
            .filter(move |(pos, _)| pos.z == z)
            .map(|(&pos, &block)| (pos.column(), block))
    }

    /// Bulk place for deserialization-style callers. Stops at the first
    /// error, leaving everything placed so far in the store. Returns the
    /// number of voxels that actually changed.
    pub fn place_all<I>(&mut self, items: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = (BlockPos, BlockType)>,
    {
        let mut changed = 0;
        for (pos, block) in items {
            if self.place(pos, block)? == Mutation::Changed {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Recompute the bounds rectangle from scratch by scanning every
    /// occupied voxel. This is the only operation that can shrink bounds,
    /// used to reclaim grid after heavy erasing.
    pub fn rebuild_bounds(&mut self) {
        let mut rebuilt: Option<GridBounds> = None;
        for pos in self.blocks.keys() {
            match rebuilt.as_mut() {
                Some(bounds) => bounds.expand_to(pos.x, pos.y),
                None => rebuilt = Some(GridBounds::around(pos.x, pos.y)),
            }
        }
        self.bounds = rebuilt.unwrap_or(GridBounds::EMPTY);
        debug!(
            "rebuilt bounds over {} blocks: {:?}",
            self.blocks.len(),
            self.bounds
        );
    }

    /// Drop every block and reset bounds to the empty default.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.bounds = GridBounds::EMPTY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_to_is_monotonic() {
        let mut bounds = GridBounds::EMPTY;
        bounds.expand_to(12, -3);
        assert_eq!(bounds.max_x, 12 + BOUNDS_MARGIN);
        assert_eq!(bounds.min_x, -BOUNDS_MARGIN);
        assert_eq!(bounds.min_y, -3 - BOUNDS_MARGIN);

        let before = bounds;
        bounds.expand_to(0, 0);
        assert_eq!(bounds, before);
    }

    #[test]
    fn intersect_can_be_empty() {
        let a = GridBounds::around(0, 0);
        let b = GridBounds::around(100, 100);
        assert!(a.intersect(&b).is_empty());
        assert!(!a.intersect(&a).is_empty());
    }

    #[test]
    fn first_block_seeds_margin_rectangle() {
        let mut store = VoxelStore::new();
        store
            .place(BlockPos::new(40, 7, 0), BlockType::Solid)
            .unwrap();
        let bounds = store.bounds();
        assert_eq!(bounds.max_x, 40 + BOUNDS_MARGIN);
        assert_eq!(bounds.max_y, 7 + BOUNDS_MARGIN);
        // The empty-store default never shrinks away mid-session.
        assert_eq!(bounds.min_x, -BOUNDS_MARGIN);
    }

    #[test]
    fn overwrite_does_not_count_against_capacity_path() {
        let mut store = VoxelStore::new();
        let pos = BlockPos::new(0, 0, 0);
        assert_eq!(store.place(pos, BlockType::Solid), Ok(Mutation::Changed));
        assert_eq!(store.place(pos, BlockType::Brick), Ok(Mutation::Changed));
        assert_eq!(store.count(), 1);
        assert_eq!(store.get(pos), Some(BlockType::Brick));
    }
}
