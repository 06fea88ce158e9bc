//! Mapping normalized intensities to colors.
//!
//! Each normalized value `t` selects a color between the start anchor
//! (`t = 0`) and the target anchor (`t = 1`). RGB anchors are mixed per
//! channel. HSB anchors are mixed in HSB and the result converted to RGB,
//! so a red→blue ramp passes through magenta rather than gray.

use crate::color::{lerp3, to_rgb, ColorSpace, Rgba};
use crate::config::DrawConfig;
use crate::framebuffer::Framebuffer;

/// Two-anchor color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colorizer {
    space: ColorSpace,
    start: [f32; 3],
    target: [f32; 3],
}

impl Colorizer {
    /// Ramp between two anchors interpreted in `space`.
    #[must_use]
    pub const fn new(space: ColorSpace, start: [f32; 3], target: [f32; 3]) -> Self {
        Self {
            space,
            start,
            target,
        }
    }

    /// Ramp described by a drawing configuration.
    #[must_use]
    pub const fn from_config(config: &DrawConfig) -> Self {
        Self::new(config.color_space, config.start_color, config.target_color)
    }

    /// Opaque color for normalized value `t`.
    ///
    /// Channels are clamped to 0-255 and truncated.
    #[must_use]
    pub fn color(&self, t: f32) -> Rgba {
        let mixed = lerp3(self.start, self.target, t);
        let rgb = match self.space {
            ColorSpace::Rgb => mixed,
            ColorSpace::Hsb => to_rgb(mixed),
        };
        Rgba::from_channels(rgb)
    }

    /// Overwrite every pixel of `fb` from row-major normalized `values`.
    ///
    /// `values` must hold at least `fb.pixel_count()` entries.
    pub fn paint(&self, values: &[f32], fb: &mut Framebuffer) {
        let width = fb.width() as usize;
        for (y, row_values) in (0..fb.height()).zip(values.chunks_exact(width)) {
            let Some(row) = fb.row_mut(y) else {
                break;
            };
            for (pixel, &t) in row.chunks_exact_mut(4).zip(row_values) {
                pixel.copy_from_slice(&self.color(t).to_array());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_ramp_endpoints() {
        let ramp = Colorizer::new(ColorSpace::Rgb, [0.0, 0.0, 0.0], [255.0, 255.0, 255.0]);
        assert_eq!(ramp.color(0.0), Rgba::BLACK);
        assert_eq!(ramp.color(1.0), Rgba::WHITE);
        assert_eq!(ramp.color(0.5), Rgba::rgb(127, 127, 127));
    }

    #[test]
    fn test_rgb_ramp_clamps() {
        let ramp = Colorizer::new(ColorSpace::Rgb, [-100.0, 0.0, 0.0], [400.0, 0.0, 0.0]);
        assert_eq!(ramp.color(0.0), Rgba::BLACK);
        assert_eq!(ramp.color(1.0), Rgba::RED);
    }

    #[test]
    fn test_hsb_ramp_interpolates_hue() {
        // Red to blue through the hue circle.
        let ramp = Colorizer::new(ColorSpace::Hsb, [0.0, 100.0, 100.0], [240.0, 100.0, 100.0]);
        assert_eq!(ramp.color(0.0), Rgba::RED);
        assert_eq!(ramp.color(1.0), Rgba::BLUE);
        // Midpoint hue 120 is pure green, not a muddy mix.
        assert_eq!(ramp.color(0.5), Rgba::GREEN);
    }

    #[test]
    fn test_from_config_defaults() {
        let ramp = Colorizer::from_config(&DrawConfig::default());
        assert_eq!(ramp.color(0.0), Rgba::BLACK);
        assert_eq!(ramp.color(1.0), Rgba::WHITE);
    }

    #[test]
    fn test_paint_fills_every_pixel() {
        let ramp = Colorizer::new(ColorSpace::Rgb, [0.0, 0.0, 0.0], [255.0, 0.0, 0.0]);
        let mut fb = Framebuffer::new(3, 2).unwrap();
        let values = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];

        ramp.paint(&values, &mut fb);

        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(1, 0), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(0, 1), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(2, 1), Some(Rgba::RED));
    }
}
