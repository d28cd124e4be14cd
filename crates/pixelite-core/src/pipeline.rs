//! The pixelation pipeline orchestrator.
//!
//! [`pixelate`] is the sole processing entry point: it takes a decoded source
//! image and a settings value, and produces an encoded PNG plus the coarse
//! grid dimensions. Data flows strictly forward:
//!
//! downsample -> resolve palette -> quantize/dither -> upsample ->
//! grid lines -> cell labels -> frame overlay -> encode
//!
//! Every invocation is a pure function of its inputs and owns its buffers
//! exclusively; nothing is shared or reused across runs. The pipeline has no
//! cancellation primitive - callers superseding a stale run simply ignore its
//! result. All errors are terminal for the invocation; no partial output is
//! ever returned.

use crate::decode::{DecodeError, SourceImage};
use crate::dither::dither_grid;
use crate::encode::{encode_png, EncodeError};
use crate::grid::PixelGrid;
use crate::mask::composite_frame;
use crate::overlay::{
    draw_cell_labels, draw_grid_lines, GRID_MIN_PIXEL_SIZE, LABEL_MIN_PIXEL_SIZE,
};
use crate::palette::resolve_palette;
use crate::quantize::{quantize_grid, QuantizeError};
use crate::PixelationSettings;
use thiserror::Error;

/// Errors that can terminate a pipeline invocation.
#[derive(Debug, Error)]
pub enum PixelateError {
    /// The source image could not be read.
    #[error("Failed to read source image: {0}")]
    Decode(#[from] DecodeError),

    /// The source image has no pixels.
    #[error("Source image is empty")]
    EmptyImage,

    /// The pixel size is below the minimum of 2.
    #[error("Invalid pixel size {0}: must be at least 2")]
    InvalidPixelSize(u32),

    /// The color count is below the minimum of 2.
    #[error("Invalid color count {0}: must be at least 2")]
    InvalidColorCount(u32),

    /// The shape transform holds a value that clamping cannot repair
    /// (NaN coordinates or scale).
    #[error("Shape transform is out of range and cannot be clamped")]
    InvalidShapeTransform,

    /// An empty palette reached the quantizer.
    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    /// Encoding the output failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The rendered output of a pipeline run.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Losslessly encoded (PNG) output raster at the source dimensions.
    pub png: Vec<u8>,
    /// Coarse grid width - the pixel-art resolution, not the raster width.
    pub grid_width: u32,
    /// Coarse grid height.
    pub grid_height: u32,
}

impl PixelationSettings {
    /// Validate the settings against the pipeline's hard minimums.
    pub fn validate(&self) -> Result<(), PixelateError> {
        if self.pixel_size < 2 {
            return Err(PixelateError::InvalidPixelSize(self.pixel_size));
        }
        if self.color_count < 2 {
            return Err(PixelateError::InvalidColorCount(self.color_count));
        }
        if !self.shape_transform.is_clamped() {
            return Err(PixelateError::InvalidShapeTransform);
        }
        Ok(())
    }
}

/// Render a source image as pixel art.
///
/// See the module docs for the stage order. The frame overlay is baked into
/// the encoded output only when `settings.bake_frame_overlay` is set; with it
/// disabled the caller composites the overlay live instead (preview-only
/// framing).
///
/// # Errors
///
/// * `PixelateError::EmptyImage` - the source has no pixels
/// * `PixelateError::InvalidPixelSize` / `InvalidColorCount` - settings below
///   their minimums
/// * `PixelateError::Quantize` - an empty palette reached the quantizer
/// * `PixelateError::Decode` / `Encode` - resampling or encoding failed
pub fn pixelate(
    image: &SourceImage,
    settings: &PixelationSettings,
) -> Result<RenderResult, PixelateError> {
    settings.validate()?;
    if image.is_empty() {
        return Err(PixelateError::EmptyImage);
    }

    // 1. Downsample onto the coarse grid
    let mut grid = PixelGrid::from_image(image, settings.pixel_size)?;

    // 2. Resolve the palette: custom palette verbatim when non-empty,
    //    otherwise derive from the grid's own colors
    let palette = resolve_palette(
        settings.custom_palette.as_deref(),
        grid.colors(),
        settings.color_count as usize,
    );

    // 3. Quantize, with or without error diffusion
    if settings.dithering {
        dither_grid(&mut grid, &palette)?;
    } else {
        quantize_grid(&mut grid, &palette)?;
    }

    // 4. Upsample back to source dimensions with hard edges
    let mut output = grid.upsample(image.width, image.height)?;

    // 5. Optional grid lines
    if settings.show_grid && settings.pixel_size > GRID_MIN_PIXEL_SIZE {
        draw_grid_lines(&mut output, image.width, image.height, grid.width, grid.height);
    }

    // 6. Optional cell-index labels
    if settings.show_pixel_numbers && settings.pixel_size >= LABEL_MIN_PIXEL_SIZE {
        draw_cell_labels(&mut output, image.width, image.height, grid.width, grid.height);
    }

    // 7. Frame overlay, per the caller's bake policy
    if settings.bake_frame_overlay {
        composite_frame(
            &mut output,
            image.width,
            image.height,
            settings.frame_shape,
            &settings.shape_transform,
            &settings.overlay_style,
        );
    }

    // 8. Encode losslessly
    let png = encode_png(&output, image.width, image.height)?;

    Ok(RenderResult {
        png,
        grid_width: grid.width,
        grid_height: grid.height,
    })
}
