//! # Trueno-Canvas
//!
//! Anti-aliased intensity accumulation canvas for generative drawing.
//!
//! Instead of painting colors, every drawing call adds fractional coverage to
//! an unbounded floating-point grid. Overlapping strokes build up density the
//! way graphite does on paper, and "carving" removes it again. The grid is
//! normalized and mapped through a two-color ramp only when an image is
//! requested.
//!
//! ## Features
//!
//! - **Sub-pixel points**: bilinear splatting onto four neighboring cells
//! - **Thick anti-aliased strokes**: lines, rational quadratic and cubic Bézier
//!   curves, ellipses and rectangles of any weight
//! - **Overlap-free shapes**: cells touched twice by one shape count once
//! - **Images**: luminance ingestion at 1:1 or bilinearly resampled
//! - **Output**: RGB or HSB color ramps and PNG export
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_canvas::prelude::*;
//!
//! let mut canvas = Canvas::new(200, 200)?;
//! canvas.set_weight(4.0);
//! canvas.set_intensity(0.5);
//! for i in 0..10 {
//!     let offset = i as f32 * 8.0;
//!     canvas.cubic_bezier(20.0, 180.0, 60.0 + offset, 20.0, 140.0, 180.0 - offset, 180.0, 20.0);
//! }
//!
//! let image = canvas.output();
//! assert_eq!(image.width(), 200);
//! # Ok::<(), trueno_canvas::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize and deserialize [`DrawConfig`](config::DrawConfig)
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital
//!   plotter." IBM Systems Journal 4(1).
//! - Zingl, A. (2012). "A Rasterizing Algorithm for Drawing Curves."
//!   Technical report, Technikum Wien.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Unbounded intensity grid and normalization.
pub mod accumulator;

/// Color types and color space conversions.
pub mod color;

/// Drawing configuration.
pub mod config;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Pixel sources for image ingestion.
pub mod image;

// ============================================================================
// Drawing Modules
// ============================================================================

/// The drawing surface.
pub mod canvas;

/// Rasterization of primitives into coverage.
pub mod render;

/// Output pipeline (color ramp, PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-canvas operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_canvas::prelude::*;
/// ```
pub mod prelude {
    pub use crate::accumulator::NormalizeMode;
    pub use crate::canvas::Canvas;
    pub use crate::color::{ColorSpace, Rgba};
    pub use crate::config::DrawConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::image::{PixelSource, RgbImage};
    pub use crate::output::{Colorizer, PngEncoder};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
