/// Block type enumeration for the build palette.
/// Using u8 representation so property lookups stay branch-free.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    Solid = 0,
    Diagonal = 1,
    Crosshatch = 2,
    Dotted = 3,
    Brick = 4,
}

pub const BLOCK_TYPE_COUNT: usize = 5;

/// Hatch style applied when a block of the matching type is filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillPattern {
    Solid,
    Diagonal,
    Crosshatch,
    Dotted,
    Brick,
}

// Lookup tables for block properties - eliminates branches in fill loops
const BLOCK_COLORS_LUT: [[u8; 3]; BLOCK_TYPE_COUNT] = [
    [70, 130, 180],  // Solid - steel blue
    [222, 170, 66],  // Diagonal - amber
    [106, 168, 96],  // Crosshatch - moss green
    [150, 108, 178], // Dotted - violet
    [178, 82, 62],   // Brick - terracotta
];

const BLOCK_PATTERNS_LUT: [FillPattern; BLOCK_TYPE_COUNT] = [
    FillPattern::Solid,
    FillPattern::Diagonal,
    FillPattern::Crosshatch,
    FillPattern::Dotted,
    FillPattern::Brick,
];

impl BlockType {
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] = [
        BlockType::Solid,
        BlockType::Diagonal,
        BlockType::Crosshatch,
        BlockType::Dotted,
        BlockType::Brick,
    ];

    /// Fast lookup-table based color retrieval - no branches
    #[inline]
    pub const fn color(self) -> [u8; 3] {
        BLOCK_COLORS_LUT[self as usize]
    }

    #[inline]
    pub const fn pattern(self) -> FillPattern {
        BLOCK_PATTERNS_LUT[self as usize]
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Construct from a raw tag, rejecting anything outside the closed set.
    #[inline]
    pub const fn from_tag(tag: u8) -> Option<BlockType> {
        match tag {
            0 => Some(BlockType::Solid),
            1 => Some(BlockType::Diagonal),
            2 => Some(BlockType::Crosshatch),
            3 => Some(BlockType::Dotted),
            4 => Some(BlockType::Brick),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockType::Solid => "solid",
            BlockType::Diagonal => "diagonal",
            BlockType::Crosshatch => "crosshatch",
            BlockType::Dotted => "dotted",
            BlockType::Brick => "brick",
        }
    }
}
