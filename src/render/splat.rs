//! Bilinear coverage splat.
//!
//! A sub-pixel point spreads its weight over the four cells around it with
//! bilinear factors, so the four weights always sum to the input weight.

use crate::accumulator::Accumulator;
use crate::render::stroke::{Compose, StrokeBuffer};

/// Receiver of anti-aliased point coverage.
///
/// Rasterizers are written against this trait so the same tracer can write
/// straight into the grid or into a stroke buffer.
pub trait Plot {
    /// Spread `val` bilinearly around `(x, y)`.
    fn plot(&mut self, x: f32, y: f32, val: f32);
}

/// The four weighted corners of one sub-pixel point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splat {
    x0: i64,
    y0: i64,
    /// Weights in the order (x0,y0), (x0+1,y0), (x0+1,y0+1), (x0,y0+1).
    weights: [f32; 4],
}

impl Splat {
    /// Compute the corner weights for `val` at `(x, y)`.
    ///
    /// Returns `None` for a NaN weight or non-finite coordinates.
    #[must_use]
    pub fn new(x: f32, y: f32, val: f32) -> Option<Self> {
        if val.is_nan() || !x.is_finite() || !y.is_finite() {
            return None;
        }

        let fx = x.floor();
        let fy = y.floor();
        let xr = x - fx;
        let yr = y - fy;

        Some(Self {
            x0: fx as i64,
            y0: fy as i64,
            weights: [
                (1.0 - xr) * (1.0 - yr) * val,
                xr * (1.0 - yr) * val,
                xr * yr * val,
                (1.0 - xr) * yr * val,
            ],
        })
    }

    /// Corner cells and their weights.
    #[must_use]
    pub fn corners(&self) -> [(i64, i64, f32); 4] {
        let x1 = self.x0.saturating_add(1);
        let y1 = self.y0.saturating_add(1);
        [
            (self.x0, self.y0, self.weights[0]),
            (x1, self.y0, self.weights[1]),
            (x1, y1, self.weights[2]),
            (self.x0, y1, self.weights[3]),
        ]
    }

    /// Visit each corner inside a `width`×`height` grid as (index, weight).
    pub fn for_each_in_bounds(&self, width: u32, height: u32, mut f: impl FnMut(usize, f32)) {
        let (w, h) = (i64::from(width), i64::from(height));
        for (x, y, weight) in self.corners() {
            if x >= 0 && y >= 0 && x < w && y < h {
                f((y as usize) * (width as usize) + x as usize, weight);
            }
        }
    }
}

/// Writes splats straight into the accumulator, signed for carving.
#[derive(Debug)]
pub struct Direct<'a> {
    grid: &'a mut Accumulator,
    sign: f32,
}

impl<'a> Direct<'a> {
    /// `sign` is `-1` in carve mode and `1` otherwise.
    pub fn new(grid: &'a mut Accumulator, sign: f32) -> Self {
        Self { grid, sign }
    }
}

impl Plot for Direct<'_> {
    fn plot(&mut self, x: f32, y: f32, val: f32) {
        let Some(splat) = Splat::new(x, y, val * self.sign) else {
            return;
        };
        let (width, height) = (self.grid.width(), self.grid.height());
        splat.for_each_in_bounds(width, height, |index, weight| {
            self.grid.accumulate(index, weight);
        });
    }
}

/// Records splats into a stroke buffer with a fixed composition rule.
#[derive(Debug)]
pub struct Record<'a> {
    buffer: &'a mut StrokeBuffer,
    compose: Compose,
}

impl<'a> Record<'a> {
    /// Record into `buffer`, combining repeated cells by `compose`.
    pub fn new(buffer: &'a mut StrokeBuffer, compose: Compose) -> Self {
        Self { buffer, compose }
    }
}

impl Plot for Record<'_> {
    fn plot(&mut self, x: f32, y: f32, val: f32) {
        self.buffer.splat(x, y, val, self.compose);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Bilinear partition of unity.
        #[test]
        fn prop_weights_sum_to_val(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            val in -10.0f32..10.0
        ) {
            let splat = Splat::new(x, y, val).unwrap();
            let total: f32 = splat.corners().iter().map(|c| c.2).sum();
            prop_assert!((total - val).abs() <= 1e-4 * val.abs().max(1.0));
        }
    }
}
