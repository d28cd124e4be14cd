//! Lossless PNG encoding for the rendered output.
//!
//! The pixel-art look depends on hard cell edges, so the output format must
//! be lossless; PNG is the export format throughout. Encoding uses the
//! `image` crate's PNG encoder.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero dimension,
/// `EncodeError::InvalidPixelData` for a mismatched buffer, or
/// `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: encoding always produces a valid PNG signature for
        /// valid input.
        #[test]
        fn prop_valid_input_produces_png(
            width in 1u32..=32,
            height in 1u32..=32,
            seed in any::<u8>(),
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels: Vec<u8> = (0..size).map(|i| (i as u8).wrapping_add(seed)).collect();

            let png = encode_png(&pixels, width, height);
            prop_assert!(png.is_ok());
            let png = png.unwrap();
            prop_assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);
        }
    }
}
