//! External pixel sources ingested into the intensity grid.
//!
//! Decoding is left to the caller; the canvas only needs the per-pixel sum of
//! the red, green and blue channels.

use crate::error::{Error, Result};

/// Read access to an RGB pixel grid.
///
/// Coordinates passed to [`PixelSource::channel_sum`] are always inside
/// `0..width` × `0..height`.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Sum of the red, green and blue channels at `(x, y)`, in 0-765.
    fn channel_sum(&self, x: u32, y: u32) -> u32;
}

/// Borrowed view over a packed RGB byte buffer (3 bytes per pixel, row-major).
#[derive(Debug, Clone, Copy)]
pub struct RgbImage<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> RgbImage<'a> {
    /// Wrap a packed RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero and
    /// [`Error::ImageSizeMismatch`] if `data.len() != width * height * 3`.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_canvas::image::{PixelSource, RgbImage};
    ///
    /// let data = [255, 0, 0, 0, 255, 0];
    /// let img = RgbImage::new(2, 1, &data).unwrap();
    /// assert_eq!(img.channel_sum(1, 0), 255);
    /// ```
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let expected = (width as usize) * (height as usize) * 3;
        if data.len() != expected {
            return Err(Error::ImageSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl PixelSource for RgbImage<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn channel_sum(&self, x: u32, y: u32) -> u32 {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        self.data[idx..idx + 3].iter().map(|&c| u32::from(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_image_size_check() {
        let data = vec![0u8; 12];
        assert!(RgbImage::new(2, 2, &data).is_ok());

        let err = RgbImage::new(3, 2, &data).unwrap_err();
        assert!(matches!(
            err,
            Error::ImageSizeMismatch {
                expected: 18,
                actual: 12
            }
        ));
    }

    #[test]
    fn test_rgb_image_zero_dimensions() {
        assert!(matches!(
            RgbImage::new(0, 4, &[]),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_channel_sum_row_major() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let img = RgbImage::new(2, 2, &data).unwrap();

        assert_eq!(img.channel_sum(0, 0), 6);
        assert_eq!(img.channel_sum(1, 0), 15);
        assert_eq!(img.channel_sum(0, 1), 24);
        assert_eq!(img.channel_sum(1, 1), 33);
    }
}
