/// Pure coordinate transforms between world, grid-cell and screen space.
/// Everything here is stateless given a camera; nothing mutates.
use crate::camera::ViewCamera;
use crate::store::{GridBounds, MAX_LEVEL};
use glam::{IVec2, Vec2};

/// World units per grid cell.
pub const CELL_SIZE: f32 = 32.0;

/// Isometric tile half-extents (2:1 diamond) and the vertical screen
/// offset contributed by one level of height, all in world units.
pub const ISO_HALF_W: f32 = 32.0;
pub const ISO_HALF_H: f32 = 16.0;
pub const ISO_Z_STEP: f32 = 24.0;

#[inline]
pub fn world_to_screen(world: Vec2, cam: &ViewCamera) -> Vec2 {
    world * cam.zoom + cam.pan
}

#[inline]
pub fn screen_to_world(screen: Vec2, cam: &ViewCamera) -> Vec2 {
    (screen - cam.pan) / cam.zoom
}

#[inline]
pub fn world_to_grid(world: Vec2) -> IVec2 {
    IVec2::new(
        (world.x / CELL_SIZE).floor() as i32,
        (world.y / CELL_SIZE).floor() as i32,
    )
}

/// Centre of the cell, not its corner. Hit testing and rendering both
/// align on cell centres; this convention is load-bearing.
#[inline]
pub fn grid_to_world(cell: IVec2) -> Vec2 {
    Vec2::new(
        (cell.x as f32 + 0.5) * CELL_SIZE,
        (cell.y as f32 + 0.5) * CELL_SIZE,
    )
}

#[inline]
pub fn screen_to_grid(screen: Vec2, cam: &ViewCamera) -> IVec2 {
    world_to_grid(screen_to_world(screen, cam))
}

/// Grid-cell rectangle currently visible in the viewport, expanded by
/// `margin_px` screen pixels on every side. Computed by inverse-transforming
/// the viewport corners; zoom > 0 keeps corner ordering intact.
pub fn visible_grid_bounds(
    cam: &ViewCamera,
    viewport_w: f32,
    viewport_h: f32,
    margin_px: f32,
) -> GridBounds {
    let lo = screen_to_world(Vec2::new(-margin_px, -margin_px), cam);
    let hi = screen_to_world(
        Vec2::new(viewport_w + margin_px, viewport_h + margin_px),
        cam,
    );
    GridBounds {
        min_x: (lo.x / CELL_SIZE).floor() as i32,
        max_x: (hi.x / CELL_SIZE).ceil() as i32,
        min_y: (lo.y / CELL_SIZE).floor() as i32,
        max_y: (hi.y / CELL_SIZE).ceil() as i32,
    }
}

/// Project cell (x, y) at level z into screen space. The returned point is
/// the centre of the cube's top-face diamond: x and y each contribute to
/// screen-x, while z only lifts the point upwards.
#[inline]
pub fn iso_project(x: i32, y: i32, z: i32, cam: &ViewCamera) -> Vec2 {
    let sx = (x - y) as f32 * ISO_HALF_W;
    let sy = (x + y) as f32 * ISO_HALF_H - z as f32 * ISO_Z_STEP;
    Vec2::new(sx, sy) * cam.zoom + cam.pan
}

/// Inverse of `iso_project` at a fixed level: the cell whose top-face
/// diamond is nearest to the given screen point.
pub fn iso_screen_to_grid(screen: Vec2, cam: &ViewCamera, z: i32) -> IVec2 {
    let p = (screen - cam.pan) / cam.zoom;
    let a = p.x / ISO_HALF_W; // x - y
    let b = (p.y + z as f32 * ISO_Z_STEP) / ISO_HALF_H; // x + y
    let x = (a + b) * 0.5;
    let y = (b - a) * 0.5;
    IVec2::new(x.round() as i32, y.round() as i32)
}

/// Conservative (x, y) cell window whose cubes can touch the viewport in
/// the isometric view, across the whole level range. Used to cull before
/// the per-frame depth sort; over-approximation is fine, missing cells is
/// not.
pub fn iso_visible_cell_bounds(cam: &ViewCamera, viewport_w: f32, viewport_h: f32) -> GridBounds {
    let lo = (Vec2::ZERO - cam.pan) / cam.zoom;
    let hi = (Vec2::new(viewport_w, viewport_h) - cam.pan) / cam.zoom;

    // Diamond half-extents plus the side-face drop widen each axis by one
    // cell in (x - y) / (x + y) space.
    let a_min = lo.x / ISO_HALF_W - 1.0;
    let a_max = hi.x / ISO_HALF_W + 1.0;
    // Highest cubes are lifted by MAX_LEVEL steps, lowest sit at z = 0 with
    // their side faces extending one step below the top diamond.
    let b_min = lo.y / ISO_HALF_H - 1.0;
    let b_max = (hi.y + (MAX_LEVEL as f32 + 1.0) * ISO_Z_STEP) / ISO_HALF_H + 1.0;

    GridBounds {
        min_x: (0.5 * (a_min + b_min)).floor() as i32,
        max_x: (0.5 * (a_max + b_max)).ceil() as i32,
        min_y: (0.5 * (b_min - a_max)).floor() as i32,
        max_y: (0.5 * (b_max - a_min)).ceil() as i32,
    }
}
