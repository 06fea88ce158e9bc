//! Anti-aliased rasterization into the intensity grid.
//!
//! Every rasterizer emits bilinear point splats through the [`Plot`] trait.
//! Single lines write straight into the grid; composite primitives (curves,
//! rectangles, ellipses) record into a [`StrokeBuffer`] whose passes are
//! merged by maximum before the primitive is applied once.
//!
//! # Algorithms
//!
//! - **Thick anti-aliased line**: Bresenham walk with a perpendicular band
//! - **Rational quadratic Bézier**: conic tracer with extremum splitting
//! - **Cubic Bézier**: reduction to quadratic segments at extrema/inflections
//! - **Thick anti-aliased ellipse**: quadrant-symmetric dual error terms
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Zingl, A. (2012). "A Rasterizing Algorithm for Drawing Curves."

mod bezier;
mod ellipse;
mod ingest;
mod line;
mod rect;
mod splat;
mod stroke;

pub use bezier::{trace_cubic_bezier, trace_rational_quadratic, MAX_SPLIT_DEPTH};
pub use ellipse::trace_ellipse;
pub use ingest::{resample_image, stamp_image};
pub use line::trace_line;
pub use rect::trace_rectangle;
pub use splat::{Direct, Plot, Record, Splat};
pub use stroke::{Compose, Stroke, StrokeBuffer};

/// Distance under which two stepped coordinates count as equal.
pub const EPSILON: f32 = 1e-4;

/// Largest coordinate magnitude at which `x + 1.0 != x` still holds for `f32`.
const MAX_STEPPABLE: f32 = 16_777_216.0;

/// Round half up, so `-0.5` becomes `0` and `0.5` becomes `1`.
#[inline]
#[must_use]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// Whether unit-stepping walks over these coordinates can terminate.
#[inline]
pub(crate) fn steppable(coords: &[f32]) -> bool {
    coords.iter().all(|c| c.is_finite() && c.abs() < MAX_STEPPABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }

    #[test]
    fn test_steppable() {
        assert!(steppable(&[0.0, -1000.0, 4096.0]));
        assert!(!steppable(&[0.0, f32::NAN]));
        assert!(!steppable(&[f32::INFINITY]));
        assert!(!steppable(&[1e9]));
    }
}
