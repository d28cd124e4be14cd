//! Pixelite WASM - WebAssembly bindings for Pixelite
//!
//! This crate exposes the pixelite-core pipeline to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `pixelate` - The pixelation pipeline entry point and palette helpers
//! - `shape` - Interactive frame-shape overlay state (drag / wheel / outline)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, pixelate } from '@pixelite/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const result = pixelate(image, { pixel_size: 12, color_count: 16 });
//! ```

use wasm_bindgen::prelude::*;

mod pixelate;
mod shape;
mod types;

// Re-export public types
pub use pixelate::{palette_from_hex, pixelate, JsRenderResult};
pub use shape::{shape_outline, ShapeOverlay};
pub use types::{decode_image, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
