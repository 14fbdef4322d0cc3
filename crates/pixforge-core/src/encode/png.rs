//! Lossless PNG export.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{validate_buffer, EncodeError};
use crate::buffer::PixelBuffer;

/// Encode an RGBA buffer to PNG bytes.
///
/// PNG carries the full RGBA payload losslessly: decoding the returned bytes
/// reproduces the buffer bit-for-bit.
///
/// # Errors
///
/// Returns an error when the buffer has zero dimensions, when the pixel data
/// length doesn't match `width * height * 4`, or when the encoder itself
/// fails.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(buffer)?;

    let mut out = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut out);

    encoder
        .write_image(
            &buffer.pixels,
            buffer.width,
            buffer.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;

    /// PNG file signature.
    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let buf = PixelBuffer::filled(10, 10, [128, 64, 32, 255]);
        let bytes = encode_png(&buf).unwrap();
        assert_eq!(&bytes[0..8], PNG_MAGIC);
    }

    #[test]
    fn test_encode_png_round_trip_exact() {
        // Exercise a buffer with varied channel and alpha values
        let mut pixels = Vec::with_capacity(8 * 8 * 4);
        for i in 0..(8 * 8) {
            pixels.extend_from_slice(&[
                (i * 3 % 256) as u8,
                (i * 7 % 256) as u8,
                (i * 11 % 256) as u8,
                (i * 5 % 256) as u8,
            ]);
        }
        let buf = PixelBuffer::new(8, 8, pixels);

        let bytes = encode_png(&buf).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.width, buf.width);
        assert_eq!(decoded.height, buf.height);
        assert_eq!(decoded.pixels, buf.pixels);
    }

    #[test]
    fn test_encode_png_zero_width() {
        let buf = PixelBuffer::new(0, 10, vec![]);
        let result = encode_png(&buf);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_pixel_data_mismatch() {
        let buf = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![0u8; 10 * 10 * 3],
        };
        let result = encode_png(&buf);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_1x1() {
        let buf = PixelBuffer::new(1, 1, vec![255, 0, 0, 128]);
        let bytes = encode_png(&buf).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.pixel(0, 0), [255, 0, 0, 128]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
