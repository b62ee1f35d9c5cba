/// Frame pacing and statistics for the render loop.
use std::time::{Duration, Instant};

/// Caps the frame rate by rejecting render ticks that arrive before the
/// frame budget has elapsed. Skipped ticks cost nothing; the next accepted
/// tick simply sees a larger delta.
pub struct FrameLimiter {
    budget: Duration,
    last_accepted: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / target_fps.max(1),
            last_accepted: None,
        }
    }

    /// Returns true when this tick should render.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.budget => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

/// Rolling once-per-second frame statistics.
pub struct FrameStats {
    frames: u32,
    window_start: Instant,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
        }
    }

    /// Record a rendered frame. Returns the FPS for the last window once a
    /// second has elapsed, then starts a new window.
    pub fn record_frame(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
