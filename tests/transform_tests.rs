/// Coordinate transform tests: screen/world inverses, the cell-centre
/// convention, and the visibility windows used for culling.
use glam::{IVec2, Vec2};
use gridforge::camera::ViewCamera;
use gridforge::transform::*;
use gridforge::MAX_LEVEL;

const EPS: f32 = 1e-2;

fn representative_cameras() -> Vec<ViewCamera> {
    let mut cams = Vec::new();
    for &zoom in &[0.1, 1.0, 10.0] {
        for &pan in &[Vec2::ZERO, Vec2::new(500.0, -300.0)] {
            cams.push(ViewCamera::new(pan, zoom));
        }
    }
    cams
}

#[test]
fn screen_world_round_trip_across_camera_states() {
    let points = [
        Vec2::ZERO,
        Vec2::new(123.5, -78.25),
        Vec2::new(-4000.0, 2500.0),
    ];
    for cam in representative_cameras() {
        for &p in &points {
            let back = screen_to_world(world_to_screen(p, &cam), &cam);
            assert!(
                (p - back).length() < EPS,
                "round trip failed for {p:?} with {cam:?}: got {back:?}"
            );
        }
    }
}

#[test]
fn grid_cells_map_to_their_centres() {
    // (g + 0.5) * CELL_SIZE, exactly - hit testing relies on this.
    assert_eq!(grid_to_world(IVec2::new(0, 0)), Vec2::new(16.0, 16.0));
    assert_eq!(grid_to_world(IVec2::new(-1, 2)), Vec2::new(-16.0, 80.0));

    for cell in [IVec2::new(0, 0), IVec2::new(-7, 3), IVec2::new(1000, -1000)] {
        assert_eq!(world_to_grid(grid_to_world(cell)), cell);
    }
}

#[test]
fn world_to_grid_floors_negative_coordinates() {
    assert_eq!(world_to_grid(Vec2::new(-0.01, -0.01)), IVec2::new(-1, -1));
    assert_eq!(world_to_grid(Vec2::new(CELL_SIZE - 0.01, 0.0)).x, 0);
    assert_eq!(world_to_grid(Vec2::new(CELL_SIZE, 0.0)).x, 1);
}

#[test]
fn screen_to_grid_composes_transform_chain() {
    let cam = ViewCamera::new(Vec2::new(640.0, 360.0), 2.0);
    // Centre of cell (3, -2) projected to screen must come back to (3, -2).
    let centre_screen = world_to_screen(grid_to_world(IVec2::new(3, -2)), &cam);
    assert_eq!(screen_to_grid(centre_screen, &cam), IVec2::new(3, -2));
}

#[test]
fn visible_grid_bounds_covers_the_viewport() {
    let cam = ViewCamera::default();
    let bounds = visible_grid_bounds(&cam, 640.0, 480.0, 0.0);
    // 640 / 32 = 20 cells wide, 480 / 32 = 15 cells tall, starting at 0.
    assert!(bounds.min_x <= 0 && bounds.max_x >= 19);
    assert!(bounds.min_y <= 0 && bounds.max_y >= 14);

    // A margin expands the window on every side.
    let padded = visible_grid_bounds(&cam, 640.0, 480.0, 64.0);
    assert!(padded.min_x < bounds.min_x);
    assert!(padded.max_x > bounds.max_x);
}

#[test]
fn visible_grid_bounds_tracks_pan_and_zoom() {
    // Panned far right: the visible cells are far in the negative x range.
    let cam = ViewCamera::new(Vec2::new(10_000.0, 0.0), 1.0);
    let bounds = visible_grid_bounds(&cam, 640.0, 480.0, 0.0);
    assert!(bounds.max_x < 0);

    // Zoomed out 10x: the same viewport sees 10x the cells.
    let wide = visible_grid_bounds(&ViewCamera::new(Vec2::ZERO, 0.1), 640.0, 480.0, 0.0);
    assert!(wide.max_x >= 199);
}

#[test]
fn iso_projection_is_the_classic_diamond() {
    let cam = ViewCamera::default();
    assert_eq!(iso_project(0, 0, 0, &cam), Vec2::ZERO);
    assert_eq!(iso_project(1, 0, 0, &cam), Vec2::new(ISO_HALF_W, ISO_HALF_H));
    assert_eq!(iso_project(0, 1, 0, &cam), Vec2::new(-ISO_HALF_W, ISO_HALF_H));
    // Height only ever lifts the cube on screen.
    assert_eq!(iso_project(0, 0, 3, &cam), Vec2::new(0.0, -3.0 * ISO_Z_STEP));
    // x and y contribute the same magnitude to screen-x, opposite signs.
    let px = iso_project(5, 0, 0, &cam);
    let py = iso_project(0, 5, 0, &cam);
    assert_eq!(px.x, -py.x);
    assert_eq!(px.y, py.y);
}

#[test]
fn iso_inverse_recovers_cells_under_pan_and_zoom() {
    for cam in representative_cameras() {
        for &(x, y, z) in &[(0, 0, 0), (9, -4, 7), (-3, 12, 49)] {
            let screen = iso_project(x, y, z, &cam);
            assert_eq!(
                iso_screen_to_grid(screen, &cam, z),
                IVec2::new(x, y),
                "inverse failed for ({x}, {y}, {z}) with {cam:?}"
            );
        }
    }
}

#[test]
fn iso_cell_window_contains_everything_on_screen() {
    let cam = ViewCamera::new(Vec2::new(400.0, 300.0), 1.0);
    let window = iso_visible_cell_bounds(&cam, 800.0, 600.0);

    // Any cube whose projection lands inside the viewport must be inside
    // the window, at every level.
    for x in -40..40 {
        for y in -40..40 {
            for z in [0, MAX_LEVEL as i32] {
                let p = iso_project(x, y, z, &cam);
                if p.x >= 0.0 && p.x <= 800.0 && p.y >= 0.0 && p.y <= 600.0 {
                    assert!(
                        window.contains(x, y),
                        "({x}, {y}, {z}) projects to {p:?} but was culled"
                    );
                }
            }
        }
    }
}
