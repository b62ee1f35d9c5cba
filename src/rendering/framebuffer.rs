/// Colour framebuffer for software rendering.
///
/// The pipeline composites back to front (painter's algorithm), so no depth
/// buffer is kept. Pixels are ARGB u32, matching what the presentation
/// surface consumes directly.
pub struct Framebuffer {
    // Hot data: used for every bounds check and index calculation
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<u32>, // ARGB format
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color_buffer: vec![0; width * height],
        }
    }

    /// Clear to a single colour.
    pub fn clear(&mut self, clear_color: u32) {
        self.color_buffer.fill(clear_color);
    }

    /// Write a pixel. Signed coordinates so renderers can hand over raw
    /// projected positions; anything off-screen is dropped here.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.color_buffer[y * self.width + x] = color;
        }
    }

    /// Blend a pixel over the existing contents with the given alpha
    /// (0 transparent, 255 opaque). Used by the ghost-layer passes.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: u32, alpha: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let index = y * self.width + x;
            self.color_buffer[index] = blend_u32(self.color_buffer[index], color, alpha);
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        self.color_buffer[y * self.width + x]
    }

    /// Fill a half-open pixel rectangle [x0, x1) x [y0, y1), clipped to the
    /// framebuffer.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let x0 = x0.max(0) as usize;
        let y0 = y0.max(0) as usize;
        let x1 = (x1.max(0) as usize).min(self.width);
        let y1 = (y1.max(0) as usize).min(self.height);
        for y in y0..y1 {
            let row = y * self.width;
            self.color_buffer[row + x0..row + x1].fill(color);
        }
    }

    /// Horizontal line on row y over [x0, x1), clipped.
    #[inline]
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: u32) {
        self.fill_rect(x0, y, x1, y + 1, color);
    }

    /// Vertical line on column x over [y0, y1), clipped.
    #[inline]
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: u32) {
        self.fill_rect(x, y0, x + 1, y1, color);
    }

    /// Get color buffer as slice (for presentation).
    pub fn color_buffer_slice(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Resize framebuffer, discarding previous contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.color_buffer.clear();
        self.color_buffer.resize(width * height, 0);
    }
}

/// Convert RGB to ARGB u32
#[inline]
pub const fn rgb_to_u32(r: u8, g: u8, b: u8) -> u32 {
    0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Apply an 8.8 fixed-point light factor to an ARGB32 colour
/// (256 = unchanged). Face shading for the isometric cubes runs through
/// this, keeping the hot loop in integer arithmetic.
#[inline]
pub const fn shade_u32(base: u32, light_fp: u32) -> u32 {
    let r = ((base >> 16) & 0xFF) * light_fp >> 8;
    let g = ((base >> 8) & 0xFF) * light_fp >> 8;
    let b = (base & 0xFF) * light_fp >> 8;

    let r = if r > 255 { 255 } else { r };
    let g = if g > 255 { 255 } else { g };
    let b = if b > 255 { 255 } else { b };

    0xFF000000 | (r << 16) | (g << 8) | b
}

/// Alpha-blend `src` over `dst` (alpha 0..=255), integer arithmetic only.
#[inline]
pub const fn blend_u32(dst: u32, src: u32, alpha: u8) -> u32 {
    let a = alpha as u32;
    let na = 255 - a;

    let r = (((src >> 16) & 0xFF) * a + ((dst >> 16) & 0xFF) * na) / 255;
    let g = (((src >> 8) & 0xFF) * a + ((dst >> 8) & 0xFF) * na) / 255;
    let b = ((src & 0xFF) * a + (dst & 0xFF) * na) / 255;

    0xFF000000 | (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_rect(-4, -4, 100, 100, 0xFFFFFFFF);
        assert!(fb.color_buffer.iter().all(|&c| c == 0xFFFFFFFF));
    }

    #[test]
    fn off_screen_pixels_are_dropped() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(-1, 0, 0xFFFFFFFF);
        fb.set_pixel(0, 4, 0xFFFFFFFF);
        assert!(fb.color_buffer.iter().all(|&c| c == 0));
    }

    #[test]
    fn shade_full_light_is_identity() {
        let color = rgb_to_u32(200, 100, 50);
        assert_eq!(shade_u32(color, 256), color);
        assert_eq!(shade_u32(color, 128), rgb_to_u32(100, 50, 25));
    }

    #[test]
    fn blend_extremes() {
        let dst = rgb_to_u32(0, 0, 0);
        let src = rgb_to_u32(255, 255, 255);
        assert_eq!(blend_u32(dst, src, 255), src);
        assert_eq!(blend_u32(dst, src, 0), dst);
    }
}
