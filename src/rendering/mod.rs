/// Software rendering pipeline: a colour framebuffer plus one renderer per
/// view mode. Compositing is back to front; no depth buffer exists.
pub mod framebuffer;
pub mod isometric;
pub mod patterns;
pub mod top_view;

pub use framebuffer::{blend_u32, rgb_to_u32, shade_u32, Framebuffer};
pub use isometric::{DrawCube, IsometricRenderer};
pub use patterns::{fill_cell_rect, ink_color, pattern_hit};
pub use top_view::{TopViewRenderer, MAJOR_GRID_EVERY, MIN_GRID_PITCH_PX};
