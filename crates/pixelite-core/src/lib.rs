//! Pixelite Core - Pixel art rendering library
//!
//! This crate provides the core image-transform pipeline for Pixelite:
//! palette derivation, nearest-color quantization, Floyd-Steinberg error
//! diffusion, frame-shape masking, and the downsample/upsample compositor
//! that turns a photo into stylized pixel art.
//!
//! The pipeline is pure and deterministic: [`pipeline::pixelate`] is a
//! function of the source image and a [`PixelationSettings`] value, with no
//! shared state between runs. The surrounding application (file handling, UI
//! controls, the generative palette service) stays outside this crate.

pub mod color;
pub mod decode;
pub mod dither;
pub mod encode;
pub mod grid;
pub mod mask;
pub mod overlay;
pub mod palette;
pub mod pipeline;
pub mod quantize;

pub use color::Color;
pub use decode::{decode_image, DecodeError, SourceImage};
pub use grid::{grid_dimensions, PixelGrid};
pub use mask::{FrameShape, OverlayStyle, ShapeTransform};
pub use palette::{build_palette, parse_hex_palette, GenerationError, PaletteSource};
pub use pipeline::{pixelate, PixelateError, RenderResult};

use serde::{Deserialize, Serialize};

/// Configuration for a pixelation run.
///
/// A plain value object: the caller clones and updates it, the pipeline only
/// reads it. Settings that change the quantized grid (pixel size, color
/// count, dithering, palette) warrant a fresh pipeline run; the shape
/// transform alone is a lightweight edit that the interactive overlay can
/// track without re-rendering.
///
/// All fields have serde defaults, so a partial JSON object deserializes
/// into defaults for whatever it omits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PixelationSettings {
    /// Side of a source block that collapses into one grid cell (minimum 2).
    pub pixel_size: u32,
    /// Number of palette colors to derive (minimum 2).
    pub color_count: u32,
    /// Apply Floyd-Steinberg error diffusion.
    pub dithering: bool,
    /// Draw grid lines at cell boundaries (needs pixel_size > 2).
    pub show_grid: bool,
    /// Draw "x,y" coordinate labels in each cell (needs pixel_size >= 24).
    pub show_pixel_numbers: bool,
    /// The frame shape; `Rectangle` means no masking.
    pub frame_shape: FrameShape,
    /// Placement of the frame shape over the viewport.
    pub shape_transform: ShapeTransform,
    /// Palette supplied by an external collaborator; used verbatim when
    /// non-empty, otherwise the builder derives one from the image.
    pub custom_palette: Option<Vec<Color>>,
    /// Bake the frame overlay into the encoded output. Disable to keep the
    /// export clean and composite the overlay live instead.
    pub bake_frame_overlay: bool,
    /// Visual style of the frame overlay.
    pub overlay_style: OverlayStyle,
}

impl Default for PixelationSettings {
    fn default() -> Self {
        Self {
            pixel_size: 12,
            color_count: 16,
            dithering: true,
            show_grid: false,
            show_pixel_numbers: false,
            frame_shape: FrameShape::Rectangle,
            shape_transform: ShapeTransform::default(),
            custom_palette: None,
            bake_frame_overlay: true,
            overlay_style: OverlayStyle::default(),
        }
    }
}

impl PixelationSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// True when a non-empty custom palette will override the builder.
    pub fn has_custom_palette(&self) -> bool {
        self.custom_palette
            .as_ref()
            .is_some_and(|palette| !palette.is_empty())
    }
}
