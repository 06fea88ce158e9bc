//! Per-primitive stroke buffers.
//!
//! A primitive built from several passes (curve segments, rectangle edges,
//! the thickness sweep of a line) records its coverage into a sparse
//! pixel → weight map first. Passes of the same primitive are combined by
//! maximum so overlapping anti-aliased edges never double-count; the merged
//! buffer is then added to the grid once.

use crate::accumulator::Accumulator;
use crate::render::line::trace_line;
use crate::render::splat::{Plot, Record, Splat};
use rustc_hash::FxHashMap;

/// How a write combines with a weight already recorded at the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compose {
    /// Keep the larger weight.
    Max,
    /// Add the weights.
    Sum,
}

/// Sparse coverage of one primitive over a fixed-size grid.
///
/// Buffers are scratch space: callers clear them at the end of every drawing
/// call, which keeps the allocation for the next call.
#[derive(Debug, Clone)]
pub struct StrokeBuffer {
    width: u32,
    height: u32,
    cells: FxHashMap<usize, f32>,
}

impl StrokeBuffer {
    /// Empty buffer for a `width`×`height` grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: FxHashMap::default(),
        }
    }

    /// Number of touched cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Recorded weight at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.cells.get(&index).copied()
    }

    /// Iterate over `(index, weight)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.cells.iter().map(|(&index, &weight)| (index, weight))
    }

    /// Forget all recorded cells, keeping the allocation.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Record `weight` at `index`.
    ///
    /// With [`Compose::Max`] a smaller weight never replaces a larger one.
    #[inline]
    pub fn record(&mut self, index: usize, weight: f32, compose: Compose) {
        match compose {
            Compose::Sum => *self.cells.entry(index).or_insert(0.0) += weight,
            Compose::Max => {
                self.cells
                    .entry(index)
                    .and_modify(|cell| {
                        if *cell < weight {
                            *cell = weight;
                        }
                    })
                    .or_insert(weight);
            }
        }
    }

    /// Record a bilinear splat of `val` at `(x, y)`. NaN weights are ignored.
    pub fn splat(&mut self, x: f32, y: f32, val: f32, compose: Compose) {
        if let Some(splat) = Splat::new(x, y, val) {
            let (width, height) = (self.width, self.height);
            splat.for_each_in_bounds(width, height, |index, weight| {
                self.record(index, weight, compose);
            });
        }
    }

    /// Fold a sub-buffer of the same primitive into this one by per-cell max.
    pub fn merge_max(&mut self, other: &StrokeBuffer) {
        for (index, weight) in other.iter() {
            self.record(index, weight, Compose::Max);
        }
    }

    /// Add every recorded weight, times `scale`, to the grid.
    ///
    /// `scale` carries both intensity and the carve sign; each cell is
    /// clamped at zero by the accumulator.
    pub fn apply(&self, grid: &mut Accumulator, scale: f32) {
        for (index, weight) in self.iter() {
            grid.accumulate(index, weight * scale);
        }
    }
}

/// Recorder for a multi-pass primitive.
///
/// Curve points go straight into the shape buffer by maximum. Each straight
/// edge is traced on its own into the line buffer by sum (so a thick line's
/// band stays additive) and then folded into the shape by maximum.
#[derive(Debug)]
pub struct Stroke<'a> {
    shape: &'a mut StrokeBuffer,
    line: &'a mut StrokeBuffer,
    weight: f32,
}

impl<'a> Stroke<'a> {
    /// Record into `shape`, using `line` as per-edge scratch.
    pub fn new(shape: &'a mut StrokeBuffer, line: &'a mut StrokeBuffer, weight: f32) -> Self {
        Self {
            shape,
            line,
            weight,
        }
    }

    /// Stroke thickness in pixels.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Trace one straight edge at unit coverage and fold it into the shape.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.line.clear();
        trace_line(
            &mut Record::new(&mut *self.line, Compose::Sum),
            x1,
            y1,
            x2,
            y2,
            self.weight,
            1.0,
        );
        self.shape.merge_max(&*self.line);
        self.line.clear();
    }
}

impl Plot for Stroke<'_> {
    fn plot(&mut self, x: f32, y: f32, val: f32) {
        self.shape.splat(x, y, val, Compose::Max);
    }
}
