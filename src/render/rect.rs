//! Axis-aligned rectangle outline.

use crate::render::round_half_up;
use crate::render::stroke::Stroke;

/// Trace the outline of the `size_x`×`size_y` rectangle at `(x, y)`.
///
/// The rectangle is anchored at its top-left corner, or at its center when
/// `centered`. Position and size snap to whole pixels; negative sizes extend
/// up or left. Horizontal edges overhang the corners by half the stroke
/// weight so thick corners close without notches.
pub fn trace_rectangle(
    stroke: &mut Stroke<'_>,
    x: f32,
    y: f32,
    size_x: f32,
    size_y: f32,
    centered: bool,
) {
    let (x, y) = if centered {
        (round_half_up(x - size_x / 2.0), round_half_up(y - size_y / 2.0))
    } else {
        (round_half_up(x), round_half_up(y))
    };
    let size_x = round_half_up(size_x);
    let size_y = round_half_up(size_y);

    let weight = stroke.weight();
    let o1 = weight / 2.0 - (weight + 1.0) % 2.0;
    let o2 = o1 - weight % 2.0;

    let (left, right) = if x > x + size_x { (x + size_x, x) } else { (x, x + size_x) };
    let (top, bottom) = if y > y + size_y { (y + size_y, y) } else { (y, y + size_y) };

    stroke.line(left - o1, top, right + o2, top);
    stroke.line(left - o1, bottom, right + o2, bottom);
    stroke.line(left, top - o1, left, bottom + o2);
    stroke.line(right, top - o1, right, bottom + o2);
}
