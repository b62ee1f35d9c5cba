/// Benchmark suite for the isometric pipeline: draw-list build (cull +
/// project + painter sort) and full-frame rasterization.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use gridforge::camera::ViewCamera;
use gridforge::{BlockPos, BlockType, Framebuffer, IsometricRenderer, VoxelStore};

const W: f32 = 1280.0;
const H: f32 = 720.0;

fn centred_camera() -> ViewCamera {
    ViewCamera::new(Vec2::new(W / 2.0, H / 2.0), 1.0)
}

/// Dense multi-level block of `count` voxels around the origin.
fn populated_store(count: i32) -> VoxelStore {
    let mut store = VoxelStore::new();
    let side = ((count / 8) as f32).sqrt().ceil() as i32;
    let types = BlockType::ALL;
    let mut placed = 0;
    'outer: for z in 0..8u8 {
        for y in -side / 2..side / 2 + 1 {
            for x in -side / 2..side / 2 + 1 {
                if placed >= count {
                    break 'outer;
                }
                let block = types[(placed % types.len() as i32) as usize];
                store.place(BlockPos::new(x, y, z), block).unwrap();
                placed += 1;
            }
        }
    }
    store
}

fn bench_draw_list_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("iso_draw_list");
    for &size in &[1_000, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let store = populated_store(size);
            let cam = centred_camera();
            b.iter(|| {
                black_box(IsometricRenderer::build_draw_list(&store, &cam, W, H).len())
            });
        });
    }
    group.finish();
}

fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("iso_full_frame");
    for &size in &[1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let store = populated_store(size);
            let cam = centred_camera();
            let renderer = IsometricRenderer::new();
            let mut fb = Framebuffer::new(W as usize, H as usize);
            b.iter(|| black_box(renderer.render(&mut fb, &store, &cam)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_draw_list_build, bench_full_frame);
criterion_main!(benches);
