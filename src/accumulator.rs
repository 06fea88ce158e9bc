//! Unbounded floating-point intensity grid.
//!
//! The accumulator owns the raw per-pixel intensities and a lazily derived
//! copy mapped to `[0, 1]`. Every write clamps its cell at zero, so carve
//! chains can never drive a cell negative.

use crate::error::{Error, Result};
use trueno::Vector;

/// How the raw grid is mapped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    /// Linear stretch between the grid's current minimum and maximum.
    #[default]
    MinMax,
    /// `min(value, 255) / 255`.
    Clamp255,
}

/// Raw intensity grid plus its normalized view.
#[derive(Debug, Clone)]
pub struct Accumulator {
    width: u32,
    height: u32,
    /// Raw intensities in row-major order, always `>= 0`.
    values: Vec<f32>,
    /// Normalized intensities, valid only while `ready` is set.
    normalized: Vec<f32>,
    ready: bool,
    mode: NormalizeMode,
}

impl Accumulator {
    /// Create a zeroed grid.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            values: vec![0.0; len],
            normalized: vec![0.0; len],
            ready: false,
            mode: NormalizeMode::default(),
        })
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: dimensions are validated at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Active normalization mode.
    #[must_use]
    pub const fn mode(&self) -> NormalizeMode {
        self.mode
    }

    /// Change the normalization mode.
    pub fn set_mode(&mut self, mode: NormalizeMode) {
        if self.mode != mode {
            self.mode = mode;
            self.ready = false;
        }
    }

    /// Whether the normalized view reflects the raw grid.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Add `delta` to cell `index`, then clamp the cell at zero.
    ///
    /// A NaN `delta` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn accumulate(&mut self, index: usize, delta: f32) {
        if delta.is_nan() {
            return;
        }
        let cell = &mut self.values[index];
        *cell += delta;
        if *cell < 0.0 {
            *cell = 0.0;
        }
        self.ready = false;
    }

    /// Zero the whole grid.
    pub fn clear(&mut self) {
        self.values.fill(0.0);
        self.ready = false;
    }

    /// Zero the sub-rectangle at `(x, y)` of size `w`×`h`, clipped to the grid.
    pub fn clear_region(&mut self, x: i64, y: i64, w: i64, h: i64) {
        let x0 = x.clamp(0, i64::from(self.width));
        let y0 = y.clamp(0, i64::from(self.height));
        let x1 = x.saturating_add(w.max(0)).clamp(0, i64::from(self.width));
        let y1 = y.saturating_add(h.max(0)).clamp(0, i64::from(self.height));

        if x0 < x1 && y0 < y1 {
            let stride = self.width as usize;
            for row in y0 as usize..y1 as usize {
                self.values[row * stride + x0 as usize..row * stride + x1 as usize].fill(0.0);
            }
        }
        self.ready = false;
    }

    /// Raw intensities in row-major order.
    #[must_use]
    pub fn raw(&self) -> &[f32] {
        &self.values
    }

    /// Normalized intensities in `[0, 1]`, refreshed first if stale.
    pub fn normalized(&mut self) -> &[f32] {
        self.normalize();
        &self.normalized
    }

    /// Recompute the normalized view if any write happened since the last
    /// refresh.
    pub fn normalize(&mut self) {
        if self.ready {
            return;
        }

        match self.mode {
            NormalizeMode::MinMax => {
                let (min, max) = self.min_max();
                if max > min {
                    let range = max - min;
                    for (out, &v) in self.normalized.iter_mut().zip(&self.values) {
                        *out = (v - min) / range;
                    }
                } else {
                    self.normalized.fill(0.0);
                }
            }
            NormalizeMode::Clamp255 => {
                for (out, &v) in self.normalized.iter_mut().zip(&self.values) {
                    *out = v.min(255.0) / 255.0;
                }
            }
        }

        self.ready = true;
    }

    /// Largest raw value, `0.0` for an empty canvas.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.min_max().1.max(0.0)
    }

    /// SIMD min/max reduction over the raw grid.
    fn min_max(&self) -> (f32, f32) {
        let vec = Vector::from_vec(self.values.clone());

        match (vec.min(), vec.max()) {
            (Ok(min), Ok(max)) => (min, max),
            _ => self
                .values
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// No sequence of signed writes leaves a negative cell.
        #[test]
        fn prop_cells_never_negative(
            writes in prop::collection::vec((0usize..16, -50.0f32..50.0), 0..200)
        ) {
            let mut grid = Accumulator::new(4, 4).unwrap();
            for (index, delta) in writes {
                grid.accumulate(index, delta);
            }
            prop_assert!(grid.raw().iter().all(|&v| v >= 0.0));
        }

        /// Normalized values always lie in [0, 1].
        #[test]
        fn prop_normalized_in_unit_range(
            writes in prop::collection::vec((0usize..16, 0.0f32..1000.0), 0..64),
            clamp in any::<bool>()
        ) {
            let mut grid = Accumulator::new(4, 4).unwrap();
            if clamp {
                grid.set_mode(NormalizeMode::Clamp255);
            }
            for (index, delta) in writes {
                grid.accumulate(index, delta);
            }
            prop_assert!(grid.normalized().iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }
}
