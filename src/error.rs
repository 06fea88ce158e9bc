//! Error types for trueno-canvas operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-canvas operations.
///
/// Drawing calls never fail: degenerate geometry degrades silently. Errors are
/// reserved for construction-time preconditions and export.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a canvas, framebuffer or image.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer length does not match the claimed image dimensions.
    #[error("Image buffer size mismatch: expected {expected} bytes, got {actual}")]
    ImageSizeMismatch {
        /// Byte length implied by the dimensions.
        expected: usize,
        /// Actual byte length of the buffer.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_image_size_mismatch() {
        let err = Error::ImageSizeMismatch {
            expected: 12,
            actual: 9,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("9"));
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
