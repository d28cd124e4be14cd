//! The coarse pixel-art grid and its resampling operations.
//!
//! A `PixelGrid` is the working resolution of a pixelation run: each grid
//! cell corresponds to a `pixel_size x pixel_size` block of the source image.
//! The grid is created by box-downsampling the source, quantized (and
//! optionally dithered) in place, then upsampled back to the source
//! dimensions with nearest-neighbor scaling so every cell becomes a hard-edged
//! block.
//!
//! Each pipeline invocation owns its grid exclusively; grids are never shared
//! or reused across runs.

use crate::color::Color;
use crate::decode::{DecodeError, SourceImage};

/// Compute the coarse grid dimensions for an image and pixel size.
///
/// `max(1, floor(dim / pixel_size))` per axis, so even a source smaller than
/// one cell still produces a 1x1 grid.
#[inline]
pub fn grid_dimensions(image_width: u32, image_height: u32, pixel_size: u32) -> (u32, u32) {
    let w = (image_width / pixel_size.max(1)).max(1);
    let h = (image_height / pixel_size.max(1)).max(1);
    (w, h)
}

/// A 2D grid of colors at the coarse pixel-art resolution.
///
/// Stored as a flat RGB buffer (3 bytes per cell, row-major) to match the
/// source image representation and the resampling routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// RGB cell data in row-major order (3 bytes per cell).
    pub pixels: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid from raw RGB cell data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Cell buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Downsample a source image into a coarse grid for the given pixel size.
    ///
    /// Uses box/bilinear resampling (the `image` crate's triangle filter), so
    /// each cell averages the source block it covers. The grid dimensions are
    /// `grid_dimensions(image.width, image.height, pixel_size)`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::CorruptedFile` if the source buffer does not
    /// match its declared dimensions.
    pub fn from_image(image: &SourceImage, pixel_size: u32) -> Result<Self, DecodeError> {
        let (grid_w, grid_h) = grid_dimensions(image.width, image.height, pixel_size);

        let rgb = image
            .to_rgb_image()
            .ok_or_else(|| DecodeError::CorruptedFile("Source buffer size mismatch".to_string()))?;

        let small = image::imageops::resize(
            &rgb,
            grid_w,
            grid_h,
            image::imageops::FilterType::Triangle,
        );

        Ok(Self {
            width: grid_w,
            height: grid_h,
            pixels: small.into_raw(),
        })
    }

    /// Upsample the grid to the given dimensions with nearest-neighbor
    /// scaling, producing hard pixel edges.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::CorruptedFile` if the cell buffer does not
    /// match the grid dimensions.
    pub fn upsample(&self, target_width: u32, target_height: u32) -> Result<Vec<u8>, DecodeError> {
        let small = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| DecodeError::CorruptedFile("Grid buffer size mismatch".to_string()))?;

        let big = image::imageops::resize(
            &small,
            target_width,
            target_height,
            image::imageops::FilterType::Nearest,
        );

        Ok(big.into_raw())
    }

    /// Get the color of a cell.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let i = self.index(x, y);
        Color::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    /// Set the color of a cell.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
    }

    /// Iterate over all cell colors in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2]))
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "Cell out of bounds");
        ((y * self.width + x) * 3) as usize
    }
}
