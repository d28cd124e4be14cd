//! Source image decoding.
//!
//! The pipeline consumes an already-uploaded image file as raw bytes (PNG or
//! JPEG) and works on a plain RGB buffer from then on. Alpha is discarded at
//! decode time; the pixel-art pipeline is opaque end to end.

use thiserror::Error;

/// Errors that can occur while reading a source image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized or supported image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded but cannot be represented as an RGB buffer.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),
}

/// A decoded source image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a SourceImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for resampling.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Decode PNG or JPEG bytes into a `SourceImage`.
///
/// Format detection is by content, not by file name. Any alpha channel is
/// dropped during the RGB conversion.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a supported
/// format, or `DecodeError::CorruptedFile` if decoding fails partway.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    let dynamic = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = dynamic.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(DecodeError::UnsupportedImage(
            "Image has zero width or height".to_string(),
        ));
    }

    Ok(SourceImage::from_rgb_image(rgb))
}
