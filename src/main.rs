/// Main application entry point
/// Handles window creation, input, and the capped render loop.
use glam::Vec2;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use gridforge::*;
use log::{info, warn};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

const TARGET_FPS: u32 = 60;
const PAN_STEP_PX: f32 = 48.0;
const ZOOM_STEP: f32 = 1.15;

fn main() {
    env_logger::init();

    println!("=== gridforge - block sandbox ===");
    println!("Controls:");
    println!("  Left click  - place block");
    println!("  Right click - erase block");
    println!("  Middle drag - pan");
    println!("  Wheel       - zoom");
    println!("  1-5         - select block type");
    println!("  Tab         - toggle top / isometric view");
    println!("  [ / ]       - active level down / up");
    println!("  G           - toggle ghost layers");
    println!("  R           - rebuild bounds");
    println!("  C           - clear");
    println!("  ESC         - exit");
    println!();

    // Create event loop and window
    let event_loop = EventLoop::new().unwrap();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("gridforge")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .build(&event_loop)
            .unwrap(),
    );

    // Initialize software rendering context
    let context = softbuffer::Context::new(window.clone()).unwrap();
    let mut surface = softbuffer::Surface::new(&context, window.clone()).unwrap();

    let window_size = window.inner_size();
    let mut framebuffer =
        Framebuffer::new(window_size.width as usize, window_size.height as usize);

    // Model and render state
    let mut store = VoxelStore::new();
    let mut cameras =
        CameraController::new(window_size.width as f32, window_size.height as f32);
    let mut top_renderer = TopViewRenderer::new();
    let iso_renderer = IsometricRenderer::new();

    let mut active_block = BlockType::Solid;
    let mut active_z: u8 = 0;
    let mut show_ghosts = true;

    // Frame pacing
    let mut limiter = FrameLimiter::new(TARGET_FPS);
    let mut stats = FrameStats::new();

    // Mouse state
    let mut cursor_pos = Vec2::ZERO;
    let mut panning = false;
    let mut last_drag_pos: Option<Vec2> = None;

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        framebuffer.resize(new_size.width as usize, new_size.height as usize);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        let pressed = event.state == ElementState::Pressed;
                        if !pressed {
                            return;
                        }

                        if let PhysicalKey::Code(keycode) = event.physical_key {
                            match keycode {
                                KeyCode::Digit1 => active_block = BlockType::Solid,
                                KeyCode::Digit2 => active_block = BlockType::Diagonal,
                                KeyCode::Digit3 => active_block = BlockType::Crosshatch,
                                KeyCode::Digit4 => active_block = BlockType::Dotted,
                                KeyCode::Digit5 => active_block = BlockType::Brick,
                                KeyCode::Tab => {
                                    cameras.toggle_mode();
                                    info!("view mode: {}", cameras.mode.name());
                                }
                                KeyCode::BracketLeft => {
                                    active_z = active_z.saturating_sub(1);
                                    info!("active level: {active_z}");
                                }
                                KeyCode::BracketRight => {
                                    if active_z < MAX_LEVEL {
                                        active_z += 1;
                                    }
                                    info!("active level: {active_z}");
                                }
                                KeyCode::KeyG => {
                                    show_ghosts = !show_ghosts;
                                    top_renderer.show_ghost_layers = show_ghosts;
                                }
                                KeyCode::KeyR => {
                                    store.rebuild_bounds();
                                    info!("bounds rebuilt: {:?}", store.bounds());
                                }
                                KeyCode::KeyC => {
                                    store.clear();
                                    info!("store cleared");
                                }
                                KeyCode::ArrowLeft => {
                                    cameras.active_mut().pan_by(Vec2::new(PAN_STEP_PX, 0.0))
                                }
                                KeyCode::ArrowRight => {
                                    cameras.active_mut().pan_by(Vec2::new(-PAN_STEP_PX, 0.0))
                                }
                                KeyCode::ArrowUp => {
                                    cameras.active_mut().pan_by(Vec2::new(0.0, PAN_STEP_PX))
                                }
                                KeyCode::ArrowDown => {
                                    cameras.active_mut().pan_by(Vec2::new(0.0, -PAN_STEP_PX))
                                }
                                KeyCode::Escape => {
                                    elwt.exit();
                                }
                                _ => {}
                            }
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                        };
                        if scroll != 0.0 {
                            let factor = ZOOM_STEP.powf(scroll);
                            cameras.active_mut().zoom_by(factor, cursor_pos);
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor_pos = Vec2::new(position.x as f32, position.y as f32);
                        if panning {
                            if let Some(last) = last_drag_pos {
                                cameras.active_mut().pan_by(cursor_pos - last);
                            }
                            last_drag_pos = Some(cursor_pos);
                        }
                    }
                    WindowEvent::MouseInput { state, button, .. } => match button {
                        MouseButton::Middle => {
                            panning = state == ElementState::Pressed;
                            last_drag_pos = panning.then_some(cursor_pos);
                        }
                        MouseButton::Left if state == ElementState::Pressed => {
                            let pos = cursor_block(&cameras, cursor_pos, active_z);
                            match store.place(pos, active_block) {
                                Ok(_) => {}
                                // Rejections must reach the user, not vanish.
                                Err(err) => warn!("place at {pos:?} rejected: {err}"),
                            }
                        }
                        MouseButton::Right if state == ElementState::Pressed => {
                            let pos = cursor_block(&cameras, cursor_pos, active_z);
                            if let Err(err) = store.erase(pos) {
                                warn!("erase at {pos:?} rejected: {err}");
                            }
                        }
                        _ => {}
                    },
                    WindowEvent::RedrawRequested => {
                        // Frame cap: ticks inside the budget are skipped.
                        if !limiter.tick(Instant::now()) {
                            return;
                        }

                        let drawn = match cameras.mode {
                            ViewMode::Top => top_renderer.render(
                                &mut framebuffer,
                                &store,
                                &cameras.top,
                                active_z,
                            ),
                            ViewMode::Isometric => {
                                iso_renderer.render(&mut framebuffer, &store, &cameras.iso)
                            }
                        };

                        // Copy framebuffer to window
                        surface
                            .resize(
                                NonZeroU32::new(framebuffer.width as u32).unwrap(),
                                NonZeroU32::new(framebuffer.height as u32).unwrap(),
                            )
                            .unwrap();

                        let mut buffer = surface.buffer_mut().unwrap();
                        buffer.copy_from_slice(framebuffer.color_buffer_slice());
                        buffer.present().unwrap();

                        if let Some(fps) = stats.record_frame() {
                            let bounds = store.bounds();
                            window.set_title(&format!(
                                "gridforge | {} | level {} | {} ({} drawn) | {} blocks | x {}..{} y {}..{} | {:.0} fps",
                                cameras.mode.name(),
                                active_z,
                                active_block.name(),
                                drawn,
                                store.count(),
                                bounds.min_x,
                                bounds.max_x,
                                bounds.min_y,
                                bounds.max_y,
                                fps,
                            ));
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}

/// Grid position under the cursor for the active view mode and level.
fn cursor_block(cameras: &CameraController, cursor: Vec2, active_z: u8) -> BlockPos {
    let cell = match cameras.mode {
        ViewMode::Top => transform::screen_to_grid(cursor, &cameras.top),
        ViewMode::Isometric => {
            transform::iso_screen_to_grid(cursor, &cameras.iso, active_z as i32)
        }
    };
    BlockPos::new(cell.x, cell.y, active_z)
}
