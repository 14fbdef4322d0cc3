//! Source bitmap decoding.
//!
//! The hosting application owns file and network I/O; this module only turns
//! already-loaded bytes into an RGBA [`PixelBuffer`]. Failures surface as
//! typed errors and are never papered over with placeholder imagery.

use std::io::Cursor;

use image::ImageReader;
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors for source bitmaps that cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input byte buffer is empty.
    #[error("empty input buffer")]
    EmptyInput,

    /// The file format is not recognized or supported.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Decode an image (PNG, JPEG) from bytes into an RGBA buffer.
///
/// The container format is sniffed from the bytes themselves.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyInput`] for an empty slice,
/// [`DecodeError::InvalidFormat`] when the format is unrecognized or
/// unsupported, and [`DecodeError::CorruptedFile`] when the data is damaged.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    Ok(PixelBuffer::from_rgba_image(img.into_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;

    #[test]
    fn test_decode_empty_input() {
        let result = decode(&[]);
        assert!(matches!(result, Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_decode_garbage_bytes() {
        let result = decode(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        // A valid PNG signature followed by nothing
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let result = decode(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_png_bytes() {
        let src = PixelBuffer::filled(3, 2, [12, 34, 56, 255]);
        let png = encode_png(&src).unwrap();

        let decoded = decode(&png).unwrap();
        assert_eq!(decoded.width, 3);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.pixels, src.pixels);
    }

    #[test]
    fn test_decode_preserves_alpha() {
        let src = PixelBuffer::filled(2, 2, [200, 100, 50, 33]);
        let png = encode_png(&src).unwrap();

        let decoded = decode(&png).unwrap();
        assert_eq!(decoded.pixel(1, 1), [200, 100, 50, 33]);
    }
}
