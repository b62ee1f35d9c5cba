/// Top-down orthographic view of a single level.
///
/// Draw order per frame: ghost passes for the neighbouring levels first,
/// then the active layer, then grid lines. Ghosts therefore can never
/// occlude the active layer; no depth handling is needed in this view.
use crate::camera::ViewCamera;
use crate::rendering::framebuffer::{rgb_to_u32, Framebuffer};
use crate::rendering::patterns::fill_cell_rect;
use crate::store::{GridBounds, VoxelStore, MAX_LEVEL};
use crate::transform::{visible_grid_bounds, world_to_screen, CELL_SIZE};
use glam::Vec2;
use log::warn;

/// Grid lines are suppressed once a cell is narrower than this on screen.
pub const MIN_GRID_PITCH_PX: f32 = 4.0;
/// A heavier line marks every Nth cell boundary.
pub const MAJOR_GRID_EVERY: i32 = 10;

const GHOST_ALPHA: u8 = 72;

const COLOR_BACKGROUND: u32 = rgb_to_u32(24, 26, 32);
const COLOR_GRID: u32 = rgb_to_u32(52, 56, 66);
const COLOR_GRID_MAJOR: u32 = rgb_to_u32(88, 94, 110);

pub struct TopViewRenderer {
    /// Render reduced-opacity passes of the z-1 / z+1 layers for spatial
    /// orientation.
    pub show_ghost_layers: bool,
}

impl Default for TopViewRenderer {
    fn default() -> Self {
        Self {
            show_ghost_layers: true,
        }
    }
}

impl TopViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the active level into the framebuffer. Returns the number of
    /// cells filled (active layer only). A degenerate camera skips the
    /// frame rather than propagating non-finite values into pixel math.
    pub fn render(
        &self,
        fb: &mut Framebuffer,
        store: &VoxelStore,
        cam: &ViewCamera,
        active_z: u8,
    ) -> usize {
        if !cam.is_valid() {
            warn!("top view: skipping frame, degenerate camera {cam:?}");
            return 0;
        }

        fb.clear(COLOR_BACKGROUND);

        let (vw, vh) = (fb.width as f32, fb.height as f32);
        // One extra cell of slack so partially visible cells still draw.
        let visible = visible_grid_bounds(cam, vw, vh, CELL_SIZE * cam.zoom);
        let area = visible.intersect(&store.bounds());
        if area.is_empty() {
            return 0;
        }

        if self.show_ghost_layers {
            if active_z > 0 {
                self.fill_layer(fb, store, cam, &area, active_z - 1, Some(GHOST_ALPHA));
            }
            if active_z < MAX_LEVEL {
                self.fill_layer(fb, store, cam, &area, active_z + 1, Some(GHOST_ALPHA));
            }
        }

        let filled = self.fill_layer(fb, store, cam, &area, active_z, None);
        self.draw_grid(fb, cam, &area);
        filled
    }

    /// Fill every occupied cell of one level that falls inside `area`.
    fn fill_layer(
        &self,
        fb: &mut Framebuffer,
        store: &VoxelStore,
        cam: &ViewCamera,
        area: &GridBounds,
        z: u8,
        alpha: Option<u8>,
    ) -> usize {
        let mut filled = 0;
        for (cell, block) in store.blocks_in_layer(z) {
            if !area.contains(cell.x, cell.y) {
                continue;
            }
            let corner = Vec2::new(cell.x as f32 * CELL_SIZE, cell.y as f32 * CELL_SIZE);
            let p0 = world_to_screen(corner, cam);
            let p1 = world_to_screen(corner + Vec2::splat(CELL_SIZE), cam);
            let [r, g, b] = block.color();
            fill_cell_rect(
                fb,
                p0.x.round() as i32,
                p0.y.round() as i32,
                p1.x.round() as i32,
                p1.y.round() as i32,
                block.pattern(),
                rgb_to_u32(r, g, b),
                alpha,
            );
            filled += 1;
        }
        filled
    }

    /// Grid lines at every cell boundary inside `area`, with a heavier line
    /// every `MAJOR_GRID_EVERY` cells. Fully suppressed when the screen
    /// pitch is below `MIN_GRID_PITCH_PX`.
    fn draw_grid(&self, fb: &mut Framebuffer, cam: &ViewCamera, area: &GridBounds) {
        let pitch = CELL_SIZE * cam.zoom;
        if pitch < MIN_GRID_PITCH_PX {
            return;
        }

        let top_left = world_to_screen(
            Vec2::new(
                area.min_x as f32 * CELL_SIZE,
                area.min_y as f32 * CELL_SIZE,
            ),
            cam,
        );
        let bottom_right = world_to_screen(
            Vec2::new(
                (area.max_x + 1) as f32 * CELL_SIZE,
                (area.max_y + 1) as f32 * CELL_SIZE,
            ),
            cam,
        );
        let y0 = top_left.y.round() as i32;
        let y1 = bottom_right.y.round() as i32;
        let x0 = top_left.x.round() as i32;
        let x1 = bottom_right.x.round() as i32;

        for gx in area.min_x..=area.max_x + 1 {
            let sx = world_to_screen(Vec2::new(gx as f32 * CELL_SIZE, 0.0), cam)
                .x
                .round() as i32;
            if gx.rem_euclid(MAJOR_GRID_EVERY) == 0 {
                fb.vline(sx, y0, y1, COLOR_GRID_MAJOR);
                fb.vline(sx + 1, y0, y1, COLOR_GRID_MAJOR);
            } else {
                fb.vline(sx, y0, y1, COLOR_GRID);
            }
        }
        for gy in area.min_y..=area.max_y + 1 {
            let sy = world_to_screen(Vec2::new(0.0, gy as f32 * CELL_SIZE), cam)
                .y
                .round() as i32;
            if gy.rem_euclid(MAJOR_GRID_EVERY) == 0 {
                fb.hline(x0, x1, sy, COLOR_GRID_MAJOR);
                fb.hline(x0, x1, sy + 1, COLOR_GRID_MAJOR);
            } else {
                fb.hline(x0, x1, sy, COLOR_GRID);
            }
        }
    }
}

/// Background colour, exposed so tests can assert "nothing was drawn".
pub const fn background_color() -> u32 {
    COLOR_BACKGROUND
}
