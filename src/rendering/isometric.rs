/// Isometric view: project occupied voxels into the classic diamond-tile
/// layout and composite them back to front (painter's algorithm).
///
/// Draw order is the whole correctness story here: lower levels paint
/// first, and within a level back-left cubes (smaller x + y) paint before
/// front-right ones. Ties break on (x, y) so a frame is reproducible.
use crate::camera::ViewCamera;
use crate::rendering::framebuffer::{rgb_to_u32, shade_u32, Framebuffer};
use crate::rendering::patterns::{ink_color, pattern_hit};
use crate::store::{BlockPos, BlockType, VoxelStore};
use crate::transform::{iso_project, iso_visible_cell_bounds, ISO_HALF_H, ISO_HALF_W, ISO_Z_STEP};
use glam::Vec2;
use log::warn;

const COLOR_BACKGROUND: u32 = rgb_to_u32(18, 20, 26);

// Fixed face shading, 8.8 fixed point (256 = unshaded). Light comes from
// the top-left, so the right face is darkest.
const SHADE_TOP: u32 = 256;
const SHADE_LEFT: u32 = 200;
const SHADE_RIGHT: u32 = 160;

/// One projected cube, ready to rasterize. `screen` is the centre of the
/// cube's top-face diamond.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCube {
    pub pos: BlockPos,
    pub block: BlockType,
    pub screen: Vec2,
}

#[derive(Default)]
pub struct IsometricRenderer;

impl IsometricRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Cull the store to the cells whose cubes can touch the viewport,
    /// project the survivors, and order them back to front. The sort is
    /// O(n log n) in visible voxels, never in the whole store.
    pub fn build_draw_list(
        store: &VoxelStore,
        cam: &ViewCamera,
        viewport_w: f32,
        viewport_h: f32,
    ) -> Vec<DrawCube> {
        let window = iso_visible_cell_bounds(cam, viewport_w, viewport_h);
        let mut cubes: Vec<DrawCube> = store
            .blocks()
            .filter(|(pos, _)| window.contains(pos.x, pos.y))
            .map(|(pos, block)| DrawCube {
                pos,
                block,
                screen: iso_project(pos.x, pos.y, pos.z as i32, cam),
            })
            .collect();

        cubes.sort_unstable_by_key(|c| {
            (
                c.pos.z,
                c.pos.x as i64 + c.pos.y as i64,
                c.pos.x,
                c.pos.y,
            )
        });
        cubes
    }

    /// Render the whole store into the framebuffer. Returns the number of
    /// cubes rasterized. An empty store or a fully culled window renders
    /// nothing; a degenerate camera skips the frame.
    pub fn render(
        &self,
        fb: &mut Framebuffer,
        store: &VoxelStore,
        cam: &ViewCamera,
    ) -> usize {
        if !cam.is_valid() {
            warn!("isometric view: skipping frame, degenerate camera {cam:?}");
            return 0;
        }

        fb.clear(COLOR_BACKGROUND);

        let (vw, vh) = (fb.width as f32, fb.height as f32);
        let cubes = Self::build_draw_list(store, cam, vw, vh);

        let hw = ISO_HALF_W * cam.zoom;
        let hh = ISO_HALF_H * cam.zoom;
        let depth = ISO_Z_STEP * cam.zoom;

        let mut drawn = 0;
        for cube in &cubes {
            let c = cube.screen;
            // Quick screen-rect reject; the cell window is conservative in
            // the vertical direction.
            if c.x + hw < 0.0 || c.x - hw > vw || c.y + hh + depth < 0.0 || c.y - hh > vh {
                continue;
            }
            draw_cube(fb, c, cube.block, hw, hh, depth);
            drawn += 1;
        }
        drawn
    }
}

/// Rasterize one cube: left and right side faces first, then the patterned
/// top diamond over their shared edges.
fn draw_cube(fb: &mut Framebuffer, c: Vec2, block: BlockType, hw: f32, hh: f32, depth: f32) {
    let [r, g, b] = block.color();
    let base = rgb_to_u32(r, g, b);
    let left = shade_u32(base, SHADE_LEFT);
    let right = shade_u32(base, SHADE_RIGHT);

    let x0 = (c.x - hw).round() as i32;
    let x1 = (c.x + hw).round() as i32;
    let slope = hh / hw;

    // Side faces, filled per column so the sloped top edge stays gap-free.
    for x in x0.max(0)..=x1.min(fb.width as i32 - 1) {
        let xf = x as f32 + 0.5;
        // Distance along the lower diamond edge from this column.
        let edge_y = c.y + hh - (xf - c.x).abs() * slope;
        let top = edge_y.round() as i32;
        let bottom = (edge_y + depth).round() as i32;
        let color = if xf < c.x { left } else { right };
        fb.vline(x, top, bottom, color);
    }

    // Top diamond, row by row, with the block's hatch pattern.
    let ink = ink_color(base);
    let pattern = block.pattern();
    let y0 = (c.y - hh).round() as i32;
    let y1 = (c.y + hh).round() as i32;
    for y in y0.max(0)..=y1.min(fb.height as i32 - 1) {
        let yf = y as f32 + 0.5;
        let row_half = hw * (1.0 - (yf - c.y).abs() / hh).max(0.0);
        let rx0 = (c.x - row_half).round() as i32;
        let rx1 = (c.x + row_half).round() as i32;
        for x in rx0.max(0)..rx1.min(fb.width as i32) {
            let color = if pattern_hit(pattern, x - x0, y - y0) {
                ink
            } else {
                base
            };
            fb.set_pixel(x, y, color);
        }
    }
}

/// Background colour, exposed so tests can assert "nothing was drawn".
pub const fn background_color() -> u32 {
    COLOR_BACKGROUND
}
