//! Drawing configuration held by each [`Canvas`](crate::canvas::Canvas).
//!
//! Settings only affect calls made after they change; nothing already in the
//! intensity grid is touched.

use crate::color::{to_hsb, to_rgb, ColorSpace};

/// Mutable drawing state of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawConfig {
    /// Per-call coverage multiplier. Unbounded, not capped at 255.
    pub intensity: f32,
    /// Stroke thickness in pixels (1 = hairline).
    pub weight: f32,
    /// Subtract instead of add, clamping cells at zero.
    pub carve: bool,
    /// Anchor shapes and placed images at their center instead of their
    /// top-left corner.
    pub centered: bool,
    /// Min-max normalization (`true`) or clamp-at-255 (`false`).
    pub normalize: bool,
    /// Interpretation of the color anchors.
    pub color_space: ColorSpace,
    /// Color for normalized value 0.
    pub start_color: [f32; 3],
    /// Color for normalized value 1.
    pub target_color: [f32; 3],
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            weight: 1.0,
            carve: false,
            centered: false,
            normalize: true,
            color_space: ColorSpace::Rgb,
            start_color: [0.0, 0.0, 0.0],
            target_color: [255.0, 255.0, 255.0],
        }
    }
}

impl DrawConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set intensity.
    #[must_use]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set stroke weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Enable or disable carving.
    #[must_use]
    pub fn with_carve(mut self, carve: bool) -> Self {
        self.carve = carve;
        self
    }

    /// Enable or disable centered anchoring.
    #[must_use]
    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Choose min-max normalization or clamp-at-255.
    #[must_use]
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set both color anchors, interpreted in `space`.
    #[must_use]
    pub fn with_colors(mut self, space: ColorSpace, start: [f32; 3], target: [f32; 3]) -> Self {
        self.color_space = space;
        self.start_color = start;
        self.target_color = target;
        self
    }

    /// Sign applied to coverage: `-1` when carving, `1` otherwise.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> f32 {
        if self.carve {
            -1.0
        } else {
            1.0
        }
    }

    /// Switch the anchor color space, converting both stored anchors.
    ///
    /// Returns `false` when `space` is already active.
    pub fn convert_color_space(&mut self, space: ColorSpace) -> bool {
        if self.color_space == space {
            return false;
        }

        let convert: fn([f32; 3]) -> [f32; 3] = match space {
            ColorSpace::Hsb => to_hsb,
            ColorSpace::Rgb => to_rgb,
        };
        self.start_color = convert(self.start_color);
        self.target_color = convert(self.target_color);
        self.color_space = space;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_defaults() {
        let config = DrawConfig::default();
        assert_abs_diff_eq!(config.intensity, 1.0);
        assert_abs_diff_eq!(config.weight, 1.0);
        assert!(!config.carve);
        assert!(!config.centered);
        assert!(config.normalize);
        assert_eq!(config.color_space, ColorSpace::Rgb);
        assert_eq!(config.start_color, [0.0, 0.0, 0.0]);
        assert_eq!(config.target_color, [255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_builder() {
        let config = DrawConfig::new()
            .with_intensity(3.0)
            .with_weight(4.0)
            .with_carve(true)
            .with_centered(true)
            .with_normalize(false);

        assert_abs_diff_eq!(config.intensity, 3.0);
        assert_abs_diff_eq!(config.weight, 4.0);
        assert_abs_diff_eq!(config.sign(), -1.0);
        assert!(config.centered);
        assert!(!config.normalize);
    }

    #[test]
    fn test_convert_color_space() {
        let mut config = DrawConfig::new();
        assert!(!config.convert_color_space(ColorSpace::Rgb));

        assert!(config.convert_color_space(ColorSpace::Hsb));
        assert_eq!(config.color_space, ColorSpace::Hsb);
        assert_abs_diff_eq!(config.target_color[2], 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(config.start_color[2], 0.0);

        assert!(config.convert_color_space(ColorSpace::Rgb));
        assert_abs_diff_eq!(config.target_color[0], 255.0, epsilon = 1e-3);
    }
}
