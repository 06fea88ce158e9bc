//! Anti-aliased, variable-thickness line tracer.
//!
//! An integer error-accumulator walk in the spirit of Bresenham's line, with
//! floating error terms so each step along the dominant axis emits a
//! perpendicular band: a partial-coverage splat where the band starts,
//! full-coverage splats inside it, and a partial splat where it ends.
//!
//! Endpoints are rounded to whole pixels first; only thickness and coverage
//! are anti-aliased.
//!
//! # References
//!
//! - Zingl, A. (2012). "A Rasterizing Algorithm for Drawing Curves."
//!   Technical report, Hochschule Technikum Wien.

use crate::render::splat::Plot;
use crate::render::{round_half_up, steppable, EPSILON};

/// Trace a line from `(x1, y1)` to `(x2, y2)` into `out`.
///
/// `weight` is the stroke thickness in pixels and `scale` the coverage of a
/// fully covered pixel. A zero-length line plots a single full-coverage point.
pub fn trace_line<P: Plot>(
    out: &mut P,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    weight: f32,
    scale: f32,
) {
    let (mut x1, mut y1) = (round_half_up(x1), round_half_up(y1));
    let (x2, y2) = (round_half_up(x2), round_half_up(y2));

    if !steppable(&[x1, y1, x2, y2]) {
        log::trace!("line ({x1}, {y1}) -> ({x2}, {y2}) cannot be stepped, skipped");
        return;
    }

    let mut dx = (x2 - x1).abs();
    let mut dy = (y2 - y1).abs();
    let mag = (dx * dx + dy * dy).sqrt();

    if mag == 0.0 {
        out.plot(x1, y1, scale);
        return;
    }

    let sx = if x1 < x2 { 1.0 } else { -1.0 };
    let sy = if y1 < y2 { 1.0 } else { -1.0 };

    dx /= mag;
    dy /= mag;
    let th = weight - 1.0;

    if dx < dy {
        // Step along y, sweep the band along x.
        let offset = (th / 2.0) / dy;
        x1 -= offset * sx;
        let mut e = offset * dy - th / 2.0;

        loop {
            let mut x = x1;
            out.plot(x, y1, (1.0 - e) * scale);

            let mut e2 = dy - e - th;
            while e2 + dy < 1.0 {
                x += sx;
                out.plot(x, y1, scale);
                e2 += dy;
            }
            out.plot(x + sx, y1, (1.0 - e2) * scale);

            e += dx;
            if e > 1.0 {
                e -= dy;
                x1 += sx;
            }

            let done = (y1 - y2).abs() <= EPSILON;
            y1 += sy;
            if done {
                break;
            }
        }
    } else {
        // Step along x, sweep the band along y.
        let offset = (th / 2.0) / dx;
        y1 -= offset * sy;
        let mut e = offset * dx - th / 2.0;

        loop {
            let mut y = y1;
            out.plot(x1, y, (1.0 - e) * scale);

            let mut e2 = dx - e - th;
            while e2 + dx < 1.0 {
                y += sy;
                out.plot(x1, y, scale);
                e2 += dx;
            }
            out.plot(x1, y + sy, (1.0 - e2) * scale);

            e += dy;
            if e > 1.0 {
                e -= dx;
                y1 += sy;
            }

            let done = (x1 - x2).abs() <= EPSILON;
            x1 += sx;
            if done {
                break;
            }
        }
    }
}
