/// Painter-order tests for the isometric draw list: floor before height,
/// back-left before front-right, deterministic ties.
use glam::Vec2;
use gridforge::camera::ViewCamera;
use gridforge::*;

fn centred_camera() -> ViewCamera {
    ViewCamera::new(Vec2::new(400.0, 300.0), 1.0)
}

fn draw_order(store: &VoxelStore) -> Vec<(i32, i32, u8)> {
    IsometricRenderer::build_draw_list(store, &centred_camera(), 800.0, 600.0)
        .into_iter()
        .map(|cube| (cube.pos.x, cube.pos.y, cube.pos.z))
        .collect()
}

#[test]
fn floor_paints_before_height_and_back_before_front() {
    let mut store = VoxelStore::new();
    store.place(BlockPos::new(0, 0, 0), BlockType::Solid).unwrap();
    store.place(BlockPos::new(1, 0, 0), BlockType::Diagonal).unwrap();
    store.place(BlockPos::new(0, 1, 0), BlockType::Crosshatch).unwrap();
    store.place(BlockPos::new(0, 0, 1), BlockType::Dotted).unwrap();

    // z ascending first; within z = 0, (x + y) ascending, then x ascending:
    // (0,0) precedes the x+y = 1 pair, where (0,1) precedes (1,0).
    assert_eq!(
        draw_order(&store),
        vec![(0, 0, 0), (0, 1, 0), (1, 0, 0), (0, 0, 1)]
    );
}

#[test]
fn order_is_deterministic_across_runs() {
    let mut store = VoxelStore::new();
    for x in -3..4 {
        for y in -3..4 {
            for z in 0..3 {
                store
                    .place(BlockPos::new(x, y, z), BlockType::Brick)
                    .unwrap();
            }
        }
    }

    let first = draw_order(&store);
    for _ in 0..5 {
        assert_eq!(draw_order(&store), first);
    }

    // And the order actually is the painter key, monotonically.
    for pair in first.windows(2) {
        let (ax, ay, az) = pair[0];
        let (bx, by, bz) = pair[1];
        let a_key = (az, ax + ay, ax, ay);
        let b_key = (bz, bx + by, bx, by);
        assert!(a_key < b_key, "{a_key:?} !< {b_key:?}");
    }
}

#[test]
fn far_away_voxels_are_culled_from_the_draw_list() {
    let mut store = VoxelStore::new();
    store.place(BlockPos::new(0, 0, 0), BlockType::Solid).unwrap();
    // Far outside any 800x600 window at zoom 1.
    store
        .place(BlockPos::new(100_000, 100_000, 0), BlockType::Solid)
        .unwrap();

    let list = IsometricRenderer::build_draw_list(&store, &centred_camera(), 800.0, 600.0);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].pos, BlockPos::new(0, 0, 0));
}

#[test]
fn panning_the_camera_away_empties_the_draw_list() {
    let mut store = VoxelStore::new();
    store.place(BlockPos::new(0, 0, 0), BlockType::Solid).unwrap();

    let far_cam = ViewCamera::new(Vec2::new(1_000_000.0, 0.0), 1.0);
    let list = IsometricRenderer::build_draw_list(&store, &far_cam, 800.0, 600.0);
    assert!(list.is_empty());
}

#[test]
fn draw_list_projects_through_the_camera() {
    let mut store = VoxelStore::new();
    store.place(BlockPos::new(2, -1, 4), BlockType::Dotted).unwrap();

    let cam = centred_camera();
    let list = IsometricRenderer::build_draw_list(&store, &cam, 800.0, 600.0);
    assert_eq!(list.len(), 1);
    assert_eq!(
        list[0].screen,
        gridforge::transform::iso_project(2, -1, 4, &cam)
    );
}
