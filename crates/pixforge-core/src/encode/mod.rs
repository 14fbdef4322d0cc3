//! Export encoding for edited buffers.
//!
//! Two targets:
//! - PNG: lossless RGBA; decoding the result reproduces the buffer exactly
//! - JPEG: lossy with configurable quality; alpha is flattened against
//!   opaque white since the format carries no alpha plane
//!
//! The encoders produce byte streams only; saving or downloading them is the
//! hosting application's job.

mod jpeg;
mod png;

use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::ExportFormat;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during export encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG quality outside 1-100
    #[error("Invalid JPEG quality: {0} (must be 1-100)")]
    InvalidQuality(u8),

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a buffer into the requested export format.
pub fn encode(buffer: &PixelBuffer, format: &ExportFormat) -> Result<Vec<u8>, EncodeError> {
    match *format {
        ExportFormat::Png => encode_png(buffer),
        ExportFormat::Jpeg { quality } => encode_jpeg(buffer, quality),
    }
}

/// Shared validation for both encoders.
fn validate_buffer(buffer: &PixelBuffer) -> Result<(), EncodeError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }

    let expected = (buffer.width as usize) * (buffer.height as usize) * 4;
    if buffer.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    Ok(())
}
