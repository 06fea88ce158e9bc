//! Output pipeline: color ramp and PNG export.

mod colorize;
mod png_encoder;

pub use colorize::Colorizer;
pub use png_encoder::PngEncoder;
