//! Anti-aliased, variable-thickness ellipse tracer.
//!
//! The ellipse inscribed in an axis-aligned box is walked one quadrant at a
//! time with two error terms: one for the outer boundary and one for the
//! inner boundary of the stroke band. Every step plots the four symmetric
//! points, with partial coverage on both boundaries and full coverage in
//! between.

use crate::render::splat::Plot;
use crate::render::stroke::Stroke;
use crate::render::{round_half_up, steppable};

/// Trace the ellipse inscribed in the `size_x`×`size_y` box at `(x, y)`.
///
/// The box is anchored at its top-left corner, or at its center when
/// `centered`. A box with zero width or height degenerates to a straight line
/// between its corners.
pub fn trace_ellipse(
    stroke: &mut Stroke<'_>,
    x: f32,
    y: f32,
    size_x: f32,
    size_y: f32,
    centered: bool,
) {
    let (mut x, mut y) = if centered {
        (round_half_up(x - size_x / 2.0), round_half_up(y - size_y / 2.0))
    } else {
        (round_half_up(x), round_half_up(y))
    };
    let mut x1 = round_half_up(x + size_x);
    let mut y1 = round_half_up(y + size_y);

    if !steppable(&[x, y, x1, y1]) {
        log::trace!("ellipse ({x}, {y}) -> ({x1}, {y1}) cannot be stepped, skipped");
        return;
    }

    let mut th = stroke.weight();
    let mut a = (x1 - x).abs();
    let b = (y1 - y).abs();
    let mut b1 = round_half_up(b) % 2.0;
    let mut a2 = a - 2.0 * th;
    let mut b2 = b - 2.0 * th;
    let mut dx = 4.0 * (a - 1.0) * b * b;
    let mut dy = 4.0 * (b1 - 1.0) * a * a;
    let mut i = a + b2;
    let mut err = b1 * a * a;

    // Stroke wider than the ellipse is flat: shrink the inner boundary.
    if (th - 1.0) * (2.0 * b - th) > a * a {
        b2 = (a * (b - a) * i * a2).sqrt() / (a - th);
    }
    if (th - 1.0) * (2.0 * a - th) > b * b {
        a2 = (b * (a - b) * i * b2).sqrt() / (b - th);
        th = (a - a2) / 2.0;
    }

    if a == 0.0 || b == 0.0 {
        log::trace!("flat ellipse ({x}, {y}) -> ({x1}, {y1}) drawn as a line");
        stroke.line(x, y, x1, y1);
        return;
    }

    if x > x1 {
        x = x1;
        x1 += a;
    }
    if y > y1 {
        y = y1;
    }
    if b2 <= 0.0 {
        // No inner boundary: the band reaches the center.
        th = a;
    }

    let mut e2 = th - th.floor();
    th = x + th - e2;
    let mut dx2 = 4.0 * (a2 + 2.0 * e2 - 1.0) * b2 * b2;
    let mut dy2 = 4.0 * (b1 - 1.0) * a2 * a2;
    e2 *= dx2;

    y += ((b + 1.0) / 2.0).floor();
    y1 = y - b1;
    a *= 8.0 * a;
    b1 = 8.0 * b * b;
    a2 *= 8.0 * a2;
    b2 *= 8.0 * b2;

    loop {
        // Outer boundary.
        loop {
            if err < 0.0 || x > x1 {
                i = x;
                break;
            }

            i = dx.min(dy);
            let mut ed = dx.max(dy);
            if y == y1 + 1.0 && 2.0 * err > dx && a > b1 {
                ed = a / 4.0;
            } else {
                ed += 2.0 * ed * i * i / (4.0 * ed * ed + i * i + 1.0) + 1.0;
            }

            let coverage = 1.0 - err / ed;
            plot_quadrants(stroke, x, x1, y, y1, coverage);

            if err + dy + a < dx {
                i = x + 1.0;
                break;
            }
            x += 1.0;
            x1 -= 1.0;
            err -= dx;
            dx -= b1;
        }

        // Band interior.
        while i < th && 2.0 * i <= x + x1 {
            plot_quadrants(stroke, i, x + x1 - i, y, y1, 1.0);
            i += 1.0;
        }

        // Inner boundary.
        while e2 > 0.0 && x + x1 >= 2.0 * th {
            i = dx2.min(dy2);
            let mut ed = dx2.max(dy2);
            if y == y1 + 1.0 && 2.0 * e2 > dx2 && a2 > b2 {
                ed = a2 / 4.0;
            } else {
                ed += 2.0 * ed * i * i / (4.0 * ed * ed + i * i);
            }

            plot_quadrants(stroke, th, x + x1 - th, y, y1, e2 / ed);

            if e2 + dy2 + a2 < dx2 {
                break;
            }
            th += 1.0;
            e2 -= dx2;
            dx2 -= b2;
        }

        dy2 += a2;
        e2 += dy2;
        y += 1.0;
        y1 -= 1.0;
        dy += a;
        err += dy;

        if x >= x1 {
            break;
        }
    }

    // Pointed tips of very flat ellipses.
    if y - y1 <= b {
        if err > dy + a {
            y -= 1.0;
            y1 += 1.0;
            dy -= a;
            err -= dy;
        }

        while y - y1 <= b {
            let coverage = 4.0 * err / b1;
            stroke.plot(x, y, coverage);
            stroke.plot(x1, y, coverage);
            y += 1.0;
            stroke.plot(x, y1, coverage);
            stroke.plot(x1, y1, coverage);
            y1 -= 1.0;
            dy += a;
            err += dy;
        }
    }
}

/// Plot the four mirror images `(left|right, top|bottom)` of one step.
fn plot_quadrants(out: &mut impl Plot, left: f32, right: f32, y: f32, y1: f32, val: f32) {
    out.plot(left, y, val);
    out.plot(left, y1, val);
    out.plot(right, y, val);
    out.plot(right, y1, val);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::stroke::StrokeBuffer;

    fn traced(size: u32, weight: f32, draw: impl FnOnce(&mut Stroke<'_>)) -> Vec<f32> {
        let mut shape = StrokeBuffer::new(size, size);
        let mut line = StrokeBuffer::new(size, size);
        draw(&mut Stroke::new(&mut shape, &mut line, weight));

        let mut cells = vec![0.0; (size * size) as usize];
        for (index, weight) in shape.iter() {
            cells[index] = weight;
        }
        cells
    }

    #[test]
    fn test_circle_is_symmetric() {
        let cells = traced(32, 1.0, |s| trace_ellipse(s, 16.0, 16.0, 20.0, 20.0, true));

        for y in 0..32 {
            for x in 0..32 {
                let mirrored = cells[y * 32 + (32 - x) % 32];
                if x > 0 {
                    assert!((cells[y * 32 + x] - mirrored).abs() < 1e-4, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_circle_touches_its_box() {
        let cells = traced(32, 1.0, |s| trace_ellipse(s, 6.0, 6.0, 20.0, 20.0, false));

        // Leftmost and rightmost columns at mid-height.
        assert!(cells[16 * 32 + 6] > 0.5);
        assert!(cells[16 * 32 + 26] > 0.5);
        // Center stays empty for a hairline.
        assert_eq!(cells[16 * 32 + 16], 0.0);
        // Nothing outside the box.
        assert!((0..32).all(|x| cells[2 * 32 + x] == 0.0));
        assert!((0..32).all(|x| cells[30 * 32 + x] == 0.0));
    }

    #[test]
    fn test_thick_stroke_fills_band() {
        let thin = traced(40, 1.0, |s| trace_ellipse(s, 20.0, 20.0, 30.0, 30.0, true));
        let thick = traced(40, 5.0, |s| trace_ellipse(s, 20.0, 20.0, 30.0, 30.0, true));

        let count = |cells: &[f32]| cells.iter().filter(|&&v| v > 0.5).count();
        assert!(count(&thick) > 3 * count(&thin));
        assert!(thick.iter().all(|&v| v <= 1.0 + 1e-4));
    }

    #[test]
    fn test_flat_box_is_a_line() {
        let ellipse = traced(16, 1.0, |s| trace_ellipse(s, 2.0, 5.0, 10.0, 0.0, false));
        let line = traced(16, 1.0, |s| s.line(2.0, 5.0, 12.0, 5.0));
        assert_eq!(ellipse, line);
    }

    #[test]
    fn test_nan_box_skipped() {
        let cells = traced(8, 1.0, |s| trace_ellipse(s, f32::NAN, 1.0, 4.0, 4.0, false));
        assert!(cells.iter().all(|&v| v == 0.0));
    }
}
