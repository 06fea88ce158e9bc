//! Color types and color space conversions.
//!
//! Provides the 8-bit RGBA pixel type used by framebuffers and the closed-form
//! HSB ↔ RGB conversion used for the canvas color anchors.
//!
//! Anchor triples are plain `[f32; 3]`: `[r, g, b]` with each channel in
//! 0-255, or `[h, s, b]` with hue in 0-360 and saturation/brightness in 0-100.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from floating-point channels in 0-255.
    ///
    /// Channels are clamped to 0-255 and truncated.
    #[must_use]
    pub fn from_channels([r, g, b]: [f32; 3]) -> Self {
        let quantize = |c: f32| c.clamp(0.0, 255.0) as u8;
        Self::rgb(quantize(r), quantize(g), quantize(b))
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Sum of the red, green and blue channels (0-765).
    #[must_use]
    pub fn channel_sum(self) -> u32 {
        u32::from(self.r) + u32::from(self.g) + u32::from(self.b)
    }
}

/// Interpretation of the canvas color anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// Red, green, blue, each in 0-255.
    #[default]
    Rgb,
    /// Hue in 0-360, saturation and brightness in 0-100.
    Hsb,
}

/// Convert an RGB triple (0-255 per channel) to HSB (0-360, 0-100, 0-100).
///
/// Hue is undefined for grays; it is reported as 0.
#[must_use]
pub fn to_hsb([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let saturation = if max == 0.0 { 0.0 } else { d / max };

    let hue = if saturation == 0.0 {
        0.0
    } else {
        let sector = if r == max {
            (g - b) / d
        } else if g == max {
            2.0 + (b - r) / d
        } else {
            4.0 + (r - g) / d
        };
        let degrees = sector * 60.0;
        if degrees < 0.0 {
            degrees + 360.0
        } else {
            degrees
        }
    };

    [hue, saturation * 100.0, max * 100.0 / 255.0]
}

/// Convert an HSB triple (0-360, 0-100, 0-100) to RGB (0-255 per channel).
///
/// Standard six-sector decomposition of the hue circle.
#[must_use]
pub fn to_rgb([h, s, b]: [f32; 3]) -> [f32; 3] {
    let value = b * 255.0 / 100.0;
    let chroma = value * s / 100.0;
    let m = value - chroma;

    let h = (h / 60.0).rem_euclid(6.0);
    let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());

    let (r, g, b) = match h.floor() as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Per-channel linear interpolation between two triples.
#[inline]
#[must_use]
pub fn lerp3(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    let inv_t = 1.0 - t;
    [
        from[0] * inv_t + to[0] * t,
        from[1] * inv_t + to[1] * t,
        from[2] * inv_t + to[2] * t,
    ]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// RGB -> HSB -> RGB reproduces the input triple.
        #[test]
        fn prop_rgb_hsb_round_trip(r in 0.0f32..=255.0, g in 0.0f32..=255.0, b in 0.0f32..=255.0) {
            let back = to_rgb(to_hsb([r, g, b]));
            prop_assert!((back[0] - r).abs() < 1e-2, "r {} -> {}", r, back[0]);
            prop_assert!((back[1] - g).abs() < 1e-2, "g {} -> {}", g, back[1]);
            prop_assert!((back[2] - b).abs() < 1e-2, "b {} -> {}", b, back[2]);
        }

        /// HSB components stay inside their documented ranges.
        #[test]
        fn prop_hsb_ranges(r in 0.0f32..=255.0, g in 0.0f32..=255.0, b in 0.0f32..=255.0) {
            let [h, s, v] = to_hsb([r, g, b]);
            prop_assert!((0.0..=360.0).contains(&h));
            prop_assert!((0.0..=100.0).contains(&s));
            prop_assert!((0.0..=100.0 + 1e-3).contains(&v));
        }
    }
}
