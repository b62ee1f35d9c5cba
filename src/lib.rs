pub mod camera;
pub mod perf;
pub mod rendering;
/// Block sandbox core - sparse voxel storage with dynamic bounds tracking
/// and a depth-sorted isometric software renderer.
pub mod store;
pub mod transform;

pub use camera::{CameraController, ViewCamera, ViewMode, ZOOM_MAX, ZOOM_MIN};
pub use perf::{FrameLimiter, FrameStats};
pub use rendering::{DrawCube, Framebuffer, IsometricRenderer, TopViewRenderer};
pub use store::{
    BlockPos, BlockType, FillPattern, GridBounds, Mutation, StoreError, VoxelStore, BLOCK_TYPE_COUNT,
    BOUNDS_MARGIN, LEVEL_COUNT, MAX_BLOCKS, MAX_LEVEL,
};
pub use transform::{CELL_SIZE, ISO_HALF_H, ISO_HALF_W, ISO_Z_STEP};
