//! PNG export of colorized canvases.
//!
//! Canvas output is always opaque, so images are written as 8-bit RGB; the
//! alpha channel and the framebuffer's row padding are dropped on the way.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder {
    compression: png::Compression,
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self {
            compression: png::Compression::Default,
        }
    }
}

impl PngEncoder {
    /// Encoder with default compression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trade file size for encoding speed.
    #[must_use]
    pub fn with_compression(mut self, compression: png::Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Encode `fb` as RGB PNG into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or PNG encoding fails.
    pub fn encode<W: Write>(&self, fb: &Framebuffer, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(self.compression);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&fb.to_rgb_bytes())?;
        writer.finish()?;
        Ok(())
    }

    /// Write `fb` to a PNG file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.encode(fb, BufWriter::new(file))?;
        log::debug!("wrote {}x{} PNG to {}", fb.width(), fb.height(), path.as_ref().display());
        Ok(())
    }

    /// Encode `fb` to in-memory PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(fb, &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_to_bytes_magic() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);

        let bytes = PngEncoder::new().to_bytes(&fb).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_round_trip_decodes() {
        let mut fb = Framebuffer::new(4, 3).unwrap();
        fb.clear(Rgba::BLACK);
        fb.set_pixel(1, 2, Rgba::rgb(10, 200, 30));

        let bytes = PngEncoder::new()
            .with_compression(png::Compression::Fast)
            .to_bytes(&fb)
            .unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!((info.width, info.height), (4, 3));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        let idx = (2 * 4 + 1) * 3;
        assert_eq!(&buf[idx..idx + 3], &[10, 200, 30]);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let fb = Framebuffer::new(5, 5).unwrap();

        PngEncoder::new().write_to_file(&fb, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }
}
