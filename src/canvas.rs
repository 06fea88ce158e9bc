//! The drawing surface: configuration, primitives and read-back.
//!
//! A [`Canvas`] owns the intensity grid, the drawing configuration, the
//! scratch stroke buffers shared by every composite primitive, and the host
//! framebuffer used for free-form drawing.
//!
//! # Example
//!
//! ```
//! use trueno_canvas::prelude::*;
//!
//! let mut canvas = Canvas::new(64, 64).unwrap();
//! canvas.set_weight(3.0);
//! canvas.line(4.0, 4.0, 60.0, 40.0);
//! canvas.set_centered(true);
//! canvas.circle(32.0, 32.0, 12.0);
//!
//! let image = canvas.output();
//! assert_eq!(image.width(), 64);
//! ```

use std::path::Path;

use crate::accumulator::{Accumulator, NormalizeMode};
use crate::color::{ColorSpace, Rgba};
use crate::config::DrawConfig;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::image::PixelSource;
use crate::output::{Colorizer, PngEncoder};
use crate::render::{
    resample_image, stamp_image, trace_cubic_bezier, trace_ellipse, trace_line,
    trace_rational_quadratic, trace_rectangle, Direct, Plot, Stroke, StrokeBuffer,
};

/// Channel sum of a white pixel.
const WHITE: f32 = 765.0;

/// Anti-aliased intensity accumulation canvas.
///
/// Every drawing call adds coverage times intensity to the grid (or subtracts
/// it in carve mode, never going below zero). Within one curve, rectangle or
/// ellipse call, overlapping parts of the shape merge by maximum; separate
/// calls always add.
#[derive(Debug, Clone)]
pub struct Canvas {
    grid: Accumulator,
    config: DrawConfig,
    /// Coverage of the composite primitive being drawn.
    shape: StrokeBuffer,
    /// Coverage of one straight edge of that primitive.
    line: StrokeBuffer,
    /// Host drawing surface.
    host: Framebuffer,
    buffer_open: bool,
}

impl Canvas {
    /// Create a zeroed canvas with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_config(width, height, DrawConfig::default())
    }

    /// Create a zeroed canvas with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn with_config(width: u32, height: u32, config: DrawConfig) -> Result<Self> {
        let mut grid = Accumulator::new(width, height)?;
        grid.set_mode(normalize_mode(config.normalize));
        let host = Framebuffer::new(width, height)?;

        log::debug!("created {width}x{height} canvas");

        Ok(Self {
            grid,
            config,
            shape: StrokeBuffer::new(width, height),
            line: StrokeBuffer::new(width, height),
            host,
            buffer_open: false,
        })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Current drawing configuration.
    #[must_use]
    pub const fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Replace the whole configuration.
    ///
    /// Anchor colors are taken as given, in `config.color_space`.
    pub fn set_config(&mut self, config: DrawConfig) {
        self.grid.set_mode(normalize_mode(config.normalize));
        self.config = config;
    }

    /// Coverage multiplier for subsequent calls. Not capped at 255.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity;
    }

    /// Stroke thickness in pixels for subsequent calls.
    ///
    /// Negative and NaN weights become 0.
    pub fn set_weight(&mut self, weight: f32) {
        self.config.weight = weight.max(0.0);
    }

    /// Subtract instead of add.
    pub fn set_carve(&mut self, carve: bool) {
        self.config.carve = carve;
    }

    /// Anchor shapes and placed images at their center.
    pub fn set_centered(&mut self, centered: bool) {
        self.config.centered = centered;
    }

    /// Min-max normalization (`true`) or clamp-at-255 (`false`).
    pub fn set_normalize(&mut self, normalize: bool) {
        self.config.normalize = normalize;
        self.grid.set_mode(normalize_mode(normalize));
    }

    /// Interpret color anchors as HSB (`true`) or RGB (`false`).
    ///
    /// Switching converts the stored anchors once; setting the active space
    /// again does nothing.
    pub fn set_hsb(&mut self, hsb: bool) {
        let space = if hsb { ColorSpace::Hsb } else { ColorSpace::Rgb };
        if self.config.convert_color_space(space) {
            log::debug!("color anchors converted to {space:?}");
        }
    }

    /// Color for normalized value 0, in the active color space.
    pub fn set_start_color(&mut self, c0: f32, c1: f32, c2: f32) {
        self.config.start_color = [c0, c1, c2];
    }

    /// Color for normalized value 1, in the active color space.
    pub fn set_target_color(&mut self, c0: f32, c1: f32, c2: f32) {
        self.config.target_color = [c0, c1, c2];
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    /// Sub-pixel point at the configured intensity.
    pub fn point(&mut self, x: f32, y: f32) {
        self.point_with(x, y, self.config.intensity);
    }

    /// Sub-pixel point with an explicit coverage value.
    pub fn point_with(&mut self, x: f32, y: f32, val: f32) {
        Direct::new(&mut self.grid, self.config.sign()).plot(x, y, val);
    }

    /// Line from `(x1, y1)` to `(x2, y2)`.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let DrawConfig {
            weight, intensity, ..
        } = self.config;
        trace_line(
            &mut Direct::new(&mut self.grid, self.config.sign()),
            x1,
            y1,
            x2,
            y2,
            weight,
            intensity,
        );
    }

    /// Quadratic Bézier from `(x0, y0)` to `(x2, y2)` with control `(x1, y1)`.
    pub fn quadratic_bezier(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.rational_quadratic_bezier(x0, y0, x1, y1, x2, y2, 1.0);
    }

    /// Rational quadratic Bézier whose control point has weight `w`.
    ///
    /// A negative weight draws nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn rational_quadratic_bezier(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        w: f32,
    ) {
        self.stroke(|s| trace_rational_quadratic(s, x0, y0, x1, y1, x2, y2, w));
    }

    /// Cubic Bézier from `(x0, y0)` to `(x3, y3)` with controls `(x1, y1)`
    /// and `(x2, y2)`.
    #[allow(clippy::too_many_arguments)]
    pub fn cubic_bezier(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
    ) {
        self.stroke(|s| trace_cubic_bezier(s, x0, y0, x1, y1, x2, y2, x3, y3));
    }

    /// Rectangle outline of `size_x`×`size_y` at `(x, y)`.
    pub fn rectangle(&mut self, x: f32, y: f32, size_x: f32, size_y: f32) {
        let centered = self.config.centered;
        self.stroke(|s| trace_rectangle(s, x, y, size_x, size_y, centered));
    }

    /// Ellipse inscribed in the `size_x`×`size_y` box at `(x, y)`.
    pub fn ellipse(&mut self, x: f32, y: f32, size_x: f32, size_y: f32) {
        let centered = self.config.centered;
        self.stroke(|s| trace_ellipse(s, x, y, size_x, size_y, centered));
    }

    /// Circle of `radius`, same as `ellipse(x, y, 2r, 2r)`.
    pub fn circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ellipse(x, y, radius * 2.0, radius * 2.0);
    }

    /// Record a composite primitive, then add it to the grid once.
    fn stroke(&mut self, draw: impl FnOnce(&mut Stroke<'_>)) {
        let scale = self.config.sign() * self.config.intensity;
        if scale.is_nan() {
            log::trace!("NaN intensity, primitive skipped");
            return;
        }

        draw(&mut Stroke::new(
            &mut self.shape,
            &mut self.line,
            self.config.weight,
        ));
        self.shape.apply(&mut self.grid, scale);
        self.shape.clear();
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    /// Stretch `src` over the whole canvas. Ignores centering.
    pub fn image<S: PixelSource + ?Sized>(&mut self, src: &S) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        resample_image(
            &mut Direct::new(&mut self.grid, self.config.sign()),
            src,
            0.0,
            0.0,
            w,
            h,
            self.config.intensity,
        );
    }

    /// Place `src` 1:1 at `(x, y)`.
    pub fn image_at<S: PixelSource + ?Sized>(&mut self, src: &S, x: f32, y: f32) {
        let (x, y) = if self.config.centered {
            (x - (src.width() / 2) as f32, y - (src.height() / 2) as f32)
        } else {
            (x, y)
        };
        stamp_image(
            &mut Direct::new(&mut self.grid, self.config.sign()),
            src,
            x,
            y,
            self.config.intensity,
        );
    }

    /// Resample `src` onto a `size_x`×`size_y` block at `(x, y)`.
    pub fn image_sized<S: PixelSource + ?Sized>(
        &mut self,
        src: &S,
        x: f32,
        y: f32,
        size_x: f32,
        size_y: f32,
    ) {
        let (size_x, size_y) = (size_x.floor(), size_y.floor());
        let (x, y) = if self.config.centered {
            (x - size_x / 2.0, y - size_y / 2.0)
        } else {
            (x, y)
        };
        resample_image(
            &mut Direct::new(&mut self.grid, self.config.sign()),
            src,
            x,
            y,
            size_x,
            size_y,
            self.config.intensity,
        );
    }

    // ------------------------------------------------------------------------
    // Host buffer
    // ------------------------------------------------------------------------

    /// Open the host framebuffer, cleared to black.
    ///
    /// Does nothing if it is already open.
    pub fn begin_buffer_draw(&mut self) {
        if self.buffer_open {
            return;
        }
        self.host.clear(Rgba::BLACK);
        self.buffer_open = true;
    }

    /// Open the host framebuffer (see [`Canvas::begin_buffer_draw`]) and hand
    /// it out for free-form drawing.
    pub fn buffer_canvas(&mut self) -> &mut Framebuffer {
        self.begin_buffer_draw();
        &mut self.host
    }

    /// Fold the open host framebuffer into the grid and close it.
    ///
    /// Each pixel adds (or carves) `intensity * (r + g + b) / 765`. Does
    /// nothing if the buffer is not open; with a NaN intensity the buffer is
    /// closed without touching the grid.
    pub fn apply_buffer(&mut self) {
        if !self.buffer_open {
            return;
        }
        self.buffer_open = false;

        let scale = self.config.sign() * self.config.intensity / WHITE;
        if scale.is_nan() {
            log::trace!("NaN intensity, host buffer discarded");
            return;
        }
        let width = self.width();
        for y in 0..self.height() {
            for x in 0..width {
                let index = (y as usize) * (width as usize) + x as usize;
                self.grid
                    .accumulate(index, self.host.channel_sum(x, y) as f32 * scale);
            }
        }

        log::debug!("applied host buffer with scale {scale}");
    }

    // ------------------------------------------------------------------------
    // Clearing
    // ------------------------------------------------------------------------

    /// Zero the whole grid.
    pub fn clear(&mut self) {
        self.grid.clear();
        log::debug!("canvas cleared");
    }

    /// Zero the `w`×`h` region at `(x, y)`; cells off the canvas are ignored.
    pub fn clear_region(&mut self, x: i64, y: i64, w: i64, h: i64) {
        self.grid.clear_region(x, y, w, h);
    }

    // ------------------------------------------------------------------------
    // Read-back
    // ------------------------------------------------------------------------

    /// Raw intensities in row-major order. Applies an open host buffer first.
    pub fn values_raw(&mut self) -> &[f32] {
        self.apply_buffer();
        self.grid.raw()
    }

    /// Normalized intensities in `[0, 1]`. Applies an open host buffer first.
    pub fn values(&mut self) -> &[f32] {
        self.apply_buffer();
        self.grid.normalized()
    }

    /// Largest raw intensity, 0 for an empty canvas.
    ///
    /// An open host buffer is not applied.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.grid.max_value()
    }

    /// Colorize the normalized grid into a fresh framebuffer.
    ///
    /// Applies an open host buffer first.
    pub fn output(&mut self) -> Framebuffer {
        self.apply_buffer();
        let ramp = Colorizer::from_config(&self.config);

        let mut image = self.host.clone();
        ramp.paint(self.grid.normalized(), &mut image);
        image
    }

    /// Colorize and write the canvas to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn save_png<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let image = self.output();
        PngEncoder::new().write_to_file(&image, path)
    }
}

fn normalize_mode(normalize: bool) -> NormalizeMode {
    if normalize {
        NormalizeMode::MinMax
    } else {
        NormalizeMode::Clamp255
    }
}
