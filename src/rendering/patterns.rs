/// Per-pixel fill patterns for the five block types.
///
/// Patterns are cheap predicates over cell-local pixel coordinates, so a
/// fill loop stays branch-light and the hatch stays anchored to its cell
/// rather than swimming across the viewport while panning.
use crate::rendering::framebuffer::{shade_u32, Framebuffer};
use crate::store::FillPattern;

/// Stripe/lattice period in pixels. Fixed in screen space; patterns do not
/// scale with zoom.
const PATTERN_PERIOD: i32 = 7;
const DOT_PERIOD: i32 = 6;
const BRICK_COURSE_H: i32 = 6;
const BRICK_LEN: i32 = 12;

/// Ink colour used for pattern strokes: the base fill, darkened.
#[inline]
pub const fn ink_color(base: u32) -> u32 {
    shade_u32(base, 150)
}

/// Whether the pattern puts ink at cell-local pixel (lx, ly).
#[inline]
pub fn pattern_hit(pattern: FillPattern, lx: i32, ly: i32) -> bool {
    match pattern {
        FillPattern::Solid => false,
        FillPattern::Diagonal => (lx + ly).rem_euclid(PATTERN_PERIOD) < 2,
        FillPattern::Crosshatch => {
            (lx + ly).rem_euclid(PATTERN_PERIOD) < 2 || (lx - ly).rem_euclid(PATTERN_PERIOD) < 2
        }
        FillPattern::Dotted => lx.rem_euclid(DOT_PERIOD) < 2 && ly.rem_euclid(DOT_PERIOD) < 2,
        FillPattern::Brick => {
            let course = ly.div_euclid(BRICK_COURSE_H);
            let offset = if course.rem_euclid(2) == 0 {
                0
            } else {
                BRICK_LEN / 2
            };
            ly.rem_euclid(BRICK_COURSE_H) == 0 || (lx + offset).rem_euclid(BRICK_LEN) == 0
        }
    }
}

/// Fill the half-open pixel rectangle [x0, x1) x [y0, y1) with a patterned
/// block colour. `alpha` of None writes opaquely; Some(a) blends (ghost
/// layers). Pattern coordinates are anchored at (x0, y0).
pub fn fill_cell_rect(
    fb: &mut Framebuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    pattern: FillPattern,
    base: u32,
    alpha: Option<u8>,
) {
    let ink = ink_color(base);
    for y in y0.max(0)..y1.min(fb.height as i32) {
        for x in x0.max(0)..x1.min(fb.width as i32) {
            let color = if pattern_hit(pattern, x - x0, y - y0) {
                ink
            } else {
                base
            };
            match alpha {
                Some(a) => fb.blend_pixel(x, y, color, a),
                None => fb.set_pixel(x, y, color),
            }
        }
    }
}
