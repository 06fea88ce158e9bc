//! RGBA pixel surface.
//!
//! A framebuffer is used in two places: it is the colorized image produced by
//! [`Canvas::output`](crate::canvas::Canvas::output), and it is the host drawing
//! surface handed out by
//! [`Canvas::buffer_canvas`](crate::canvas::Canvas::buffer_canvas) for free-form
//! drawing that is later folded into the intensity grid.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::image::PixelSource;

/// Row alignment in bytes (AVX-512 register width).
const SIMD_ALIGNMENT: usize = 64;

/// SIMD-aligned RGBA framebuffer.
///
/// Rows are padded to a 64-byte stride so each row starts on a SIMD boundary.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// `[r, g, b, a]` per pixel, row-major, `stride` bytes per row.
    pixels: Vec<u8>,
    stride: usize,
}

impl Framebuffer {
    /// Create a framebuffer filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_canvas::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.pixel_count(), 480_000);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = row_bytes.next_multiple_of(SIMD_ALIGNMENT);

        Ok(Self {
            width,
            height,
            pixels: vec![0; stride * (height as usize)],
            stride,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row length in bytes, padding included.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Pixels of row `y` without padding, or `None` below the last row.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        Some(&mut self.pixels[start..start + (self.width as usize) * 4])
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let pattern = color.to_array();
        let row_bytes = (self.width as usize) * 4;

        for row in self.pixels.chunks_exact_mut(self.stride) {
            for chunk in row[..row_bytes].chunks_exact_mut(4) {
                chunk.copy_from_slice(&pattern);
            }
        }
    }

    /// Fill the `w`×`h` block at `(x, y)`, clipped to the framebuffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let pattern = color.to_array();
        let span = ((x2 - x1) as usize) * 4;

        for row_y in y1..y2 {
            let start = self.pixel_index(x1, row_y);
            for chunk in self.pixels[start..start + span].chunks_exact_mut(4) {
                chunk.copy_from_slice(&pattern);
            }
        }
    }

    /// Color at `(x, y)`, or `None` off the framebuffer.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(Rgba::from_array(rgba))
    }

    /// Overwrite the pixel at `(x, y)`. Off-framebuffer writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Composite `color` over the pixel at `(x, y)`.
    ///
    /// Useful for soft brushes on the host surface: only the blended RGB
    /// channels reach the intensity grid.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let over = |src: u8, dst: u8| {
            let mixed = f32::from(src) * src_a + f32::from(dst) * dst_a * (1.0 - src_a);
            (mixed / out_a) as u8
        };
        let [r, g, b, _] = color.to_array();
        self.pixels[idx] = over(r, self.pixels[idx]);
        self.pixels[idx + 1] = over(g, self.pixels[idx + 1]);
        self.pixels[idx + 2] = over(b, self.pixels[idx + 2]);
        self.pixels[idx + 3] = (out_a * 255.0) as u8;
    }

    /// Tightly packed RGB bytes, row padding and alpha removed.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;
        let mut out = Vec::with_capacity(self.pixel_count() * 3);
        for row in self.pixels.chunks_exact(self.stride) {
            for pixel in row[..row_bytes].chunks_exact(4) {
                out.extend_from_slice(&pixel[..3]);
            }
        }
        out
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }
}

impl PixelSource for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn channel_sum(&self, x: u32, y: u32) -> u32 {
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 3].iter().map(|&c| u32::from(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_aligned() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.pixel_count(), 5000);
        assert_eq!(fb.stride(), 448);
        assert_eq!(fb.stride() % SIMD_ALIGNMENT, 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Framebuffer::new(0, 100),
            Err(Error::InvalidDimensions { width: 0, height: 100 })
        ));
        assert!(Framebuffer::new(100, 0).is_err());
    }

    #[test]
    fn test_clear_leaves_padding() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.clear(Rgba::RED);

        assert_eq!(fb.get_pixel(2, 1), Some(Rgba::RED));
        assert!(fb.pixels[12..fb.stride].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::BLACK);
        fb.fill_rect(15, 15, u32::MAX, 10, Rgba::WHITE);

        assert_eq!(fb.get_pixel(19, 19), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(14, 19), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(19, 14), Some(Rgba::BLACK));
    }

    #[test]
    fn test_pixel_access_out_of_bounds() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.set_pixel(3, 3, Rgba::BLUE);
        fb.set_pixel(4, 0, Rgba::BLUE);

        assert_eq!(fb.get_pixel(3, 3), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(4, 0), None);
        assert_eq!(fb.row_mut(4), None);
    }

    #[test]
    fn test_blend_half_red_over_white() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.clear(Rgba::WHITE);
        fb.blend_pixel(1, 1, Rgba::new(255, 0, 0, 128));

        let px = fb.get_pixel(1, 1).unwrap();
        assert!(px.r >= 254);
        assert!(px.g > 120 && px.g < 130);
        assert!(px.a >= 254);
    }

    #[test]
    fn test_blend_onto_transparent_keeps_color() {
        let mut fb = Framebuffer::new(1, 1).unwrap();
        fb.blend_pixel(0, 0, Rgba::new(200, 100, 50, 64));

        let px = fb.get_pixel(0, 0).unwrap();
        assert!(px.r.abs_diff(200) <= 1);
        assert!(px.g.abs_diff(100) <= 1);
        assert!(px.b.abs_diff(50) <= 1);
        assert!(px.a.abs_diff(64) <= 1);
    }

    #[test]
    fn test_channel_sum_ignores_alpha() {
        let mut fb = Framebuffer::new(3, 3).unwrap();
        fb.set_pixel(1, 2, Rgba::new(10, 20, 30, 0));

        assert_eq!(PixelSource::channel_sum(&fb, 1, 2), 60);
        assert_eq!(PixelSource::channel_sum(&fb, 0, 0), 0);
    }

    #[test]
    fn test_rgb_bytes_drop_alpha_and_padding() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.clear(Rgba::GREEN);
        fb.set_pixel(2, 1, Rgba::new(1, 2, 3, 4));

        let bytes = fb.to_rgb_bytes();
        assert_eq!(bytes.len(), 18);
        assert_eq!(&bytes[..3], &[0, 255, 0]);
        assert_eq!(&bytes[15..], &[1, 2, 3]);
    }
}
