//! Pixelation pipeline WASM bindings.
//!
//! The settings arrive from TypeScript as a plain JSON object via
//! serde_wasm_bindgen; every field is optional and defaults to the core's
//! `PixelationSettings` defaults. The result wraps the encoded PNG plus the
//! coarse grid dimensions (the "pixel art" resolution shown in the UI).

use crate::types::JsSourceImage;
use pixelite_core::PixelationSettings;
use wasm_bindgen::prelude::*;

/// The rendered output of a pixelation run.
#[wasm_bindgen]
pub struct JsRenderResult {
    png: Vec<u8>,
    grid_width: u32,
    grid_height: u32,
}

#[wasm_bindgen]
impl JsRenderResult {
    /// Losslessly encoded PNG bytes at the source image's dimensions.
    pub fn png(&self) -> Vec<u8> {
        self.png.clone()
    }

    /// Coarse grid width - the pixel-art resolution, not the raster width.
    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    /// Coarse grid height.
    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }
}

/// Render a source image as pixel art.
///
/// # Arguments
/// * `image` - The decoded source image
/// * `settings` - JSON settings object (PixelationSettings structure);
///   missing fields take their defaults
///
/// # Example (TypeScript)
/// ```typescript
/// const result = pixelate(image, {
///   pixel_size: 12,
///   color_count: 16,
///   dithering: true,
///   frame_shape: 'heart',
/// });
/// const blob = new Blob([result.png()], { type: 'image/png' });
/// ```
#[wasm_bindgen]
pub fn pixelate(image: &JsSourceImage, settings: JsValue) -> Result<JsRenderResult, JsValue> {
    let settings: PixelationSettings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;

    let source = image.to_source();
    let result = pixelite_core::pixelate(&source, &settings)
        .map_err(|e| JsValue::from_str(&format!("Pixelation failed: {}", e)))?;

    Ok(JsRenderResult {
        png: result.png,
        grid_width: result.grid_width,
        grid_height: result.grid_height,
    })
}

/// Validate and convert a hex-string palette from the palette-generation
/// service into the settings' `custom_palette` representation.
///
/// # Arguments
/// * `entries` - Hex color strings such as `"#ff8800"`
///
/// # Returns
/// An array of `{r, g, b}` color objects, ready to embed in the settings.
///
/// # Errors
///
/// Throws a string error when the list is empty or an entry does not parse.
#[wasm_bindgen]
pub fn palette_from_hex(entries: Vec<String>) -> Result<JsValue, JsValue> {
    let palette = pixelite_core::parse_hex_palette(&entries)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&palette).map_err(|e| JsValue::from_str(&e.to_string()))
}
