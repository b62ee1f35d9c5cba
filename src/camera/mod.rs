/// Camera state for the two view modes.
/// Each view keeps its own pan offset (screen units) and zoom scalar; input
/// collaborators mutate the state here, the renderers only read it.
use glam::Vec2;

pub const ZOOM_MIN: f32 = 0.1;
pub const ZOOM_MAX: f32 = 10.0;

/// Pan/zoom state for a single view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewCamera {
    /// Screen-space offset added after scaling.
    pub pan: Vec2,
    /// Uniform scale factor, clamped to [ZOOM_MIN, ZOOM_MAX] by the
    /// mutation helpers.
    pub zoom: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl ViewCamera {
    pub fn new(pan: Vec2, zoom: f32) -> Self {
        Self { pan, zoom }
    }

    /// A camera is usable when pan and zoom are finite and zoom is
    /// positive. Renderers skip the frame otherwise instead of letting
    /// NaN reach the draw list.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pan.x.is_finite() && self.pan.y.is_finite() && self.zoom.is_finite() && self.zoom > 0.0
    }

    #[inline]
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Scale zoom by `factor` about a screen-space anchor, so the world
    /// point under the anchor stays put. Zoom is clamped to the sane range.
    pub fn zoom_by(&mut self, factor: f32, anchor: Vec2) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        if new_zoom == old_zoom {
            return;
        }
        let ratio = new_zoom / old_zoom;
        self.pan = anchor - (anchor - self.pan) * ratio;
        self.zoom = new_zoom;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Top,
    Isometric,
}

impl ViewMode {
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            ViewMode::Top => ViewMode::Isometric,
            ViewMode::Isometric => ViewMode::Top,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ViewMode::Top => "top",
            ViewMode::Isometric => "isometric",
        }
    }
}

/// One camera per view mode plus the active-mode switch. Owned by the
/// top-level input loop and threaded into renderer calls by reference.
pub struct CameraController {
    pub top: ViewCamera,
    pub iso: ViewCamera,
    pub mode: ViewMode,
}

impl CameraController {
    /// Both cameras start centred on the given viewport so the origin cell
    /// sits mid-screen.
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        let center = Vec2::new(viewport_w * 0.5, viewport_h * 0.5);
        Self {
            top: ViewCamera::new(center, 1.0),
            iso: ViewCamera::new(center, 1.0),
            mode: ViewMode::Top,
        }
    }

    #[inline]
    pub fn active(&self) -> &ViewCamera {
        match self.mode {
            ViewMode::Top => &self.top,
            ViewMode::Isometric => &self.iso,
        }
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut ViewCamera {
        match self.mode {
            ViewMode::Top => &mut self.top,
            ViewMode::Isometric => &mut self.iso,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}
