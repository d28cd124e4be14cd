//! Interactive frame-shape overlay bindings.
//!
//! The live preview strokes the frame shape on its own canvas while the user
//! drags or zooms, without re-running the pixelation pipeline. `ShapeOverlay`
//! holds that interaction state: the selected shape and its transform, with
//! clamping applied on every update. `shape_outline` hands the flattened
//! outline to JavaScript for canvas stroking.

use pixelite_core::mask::placed_shape_path;
use pixelite_core::{FrameShape, ShapeTransform};
use wasm_bindgen::prelude::*;

/// Parse a wire-format shape name ("rectangle", "circle", ...).
fn frame_shape_from_str(name: &str) -> Result<FrameShape, JsValue> {
    match name {
        "rectangle" => Ok(FrameShape::Rectangle),
        "circle" => Ok(FrameShape::Circle),
        "square" => Ok(FrameShape::Square),
        "heart" => Ok(FrameShape::Heart),
        "star" => Ok(FrameShape::Star),
        other => Err(JsValue::from_str(&format!("Unknown frame shape: {}", other))),
    }
}

/// Interaction state for the frame-shape overlay.
///
/// Pan deltas arrive in viewport pixels (pointer movement) and are converted
/// to the transform's normalized coordinates; wheel deltas arrive as
/// multiplicative zoom steps. Every update re-clamps, so the getters never
/// expose an out-of-range value.
#[wasm_bindgen]
pub struct ShapeOverlay {
    shape: FrameShape,
    transform: ShapeTransform,
    viewport_width: f32,
    viewport_height: f32,
}

#[wasm_bindgen]
impl ShapeOverlay {
    /// Create an overlay for a viewport, with the shape centered at unit
    /// scale.
    #[wasm_bindgen(constructor)]
    pub fn new(
        shape: &str,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<ShapeOverlay, JsValue> {
        Ok(ShapeOverlay {
            shape: frame_shape_from_str(shape)?,
            transform: ShapeTransform::default(),
            viewport_width: viewport_width.max(1.0),
            viewport_height: viewport_height.max(1.0),
        })
    }

    /// Switch the frame shape, keeping the current transform.
    pub fn set_shape(&mut self, shape: &str) -> Result<(), JsValue> {
        self.shape = frame_shape_from_str(shape)?;
        Ok(())
    }

    /// Pan by a pointer drag delta in viewport pixels.
    pub fn pan(&mut self, dx_px: f32, dy_px: f32) {
        self.transform
            .pan(dx_px / self.viewport_width, dy_px / self.viewport_height);
    }

    /// Zoom by a multiplicative factor (wheel up > 1.0, wheel down < 1.0).
    pub fn zoom(&mut self, factor: f32) {
        self.transform.zoom(factor);
    }

    /// Center X as a fraction of viewport width (always clamped to 0..1).
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f32 {
        self.transform.x
    }

    /// Center Y as a fraction of viewport height (always clamped to 0..1).
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f32 {
        self.transform.y
    }

    /// Scale factor (always clamped to the configured range).
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// The transform as a JSON object for embedding in pipeline settings.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.transform).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// True when a viewport point falls inside the placed shape.
    ///
    /// Rectangle has no outline; every point counts as inside the frame.
    pub fn hit_test(&self, x_px: f32, y_px: f32) -> bool {
        if self.shape == FrameShape::Rectangle {
            return true;
        }
        let path = placed_shape_path(
            self.shape,
            &self.transform,
            self.viewport_width,
            self.viewport_height,
        );
        path.contains(x_px, y_px)
    }

    /// The placed outline as a flat `[x0, y0, x1, y1, ...]` polyline for
    /// canvas stroking. Empty for the rectangle shape.
    pub fn outline(&self) -> Vec<f32> {
        let path = placed_shape_path(
            self.shape,
            &self.transform,
            self.viewport_width,
            self.viewport_height,
        );
        path.flatten().into_iter().flat_map(|(x, y)| [x, y]).collect()
    }
}

/// Flatten a shape's outline for an arbitrary transform without holding
/// overlay state.
///
/// Returns a flat `[x0, y0, x1, y1, ...]` array in viewport coordinates.
#[wasm_bindgen]
pub fn shape_outline(
    shape: &str,
    x: f32,
    y: f32,
    scale: f32,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<Vec<f32>, JsValue> {
    let shape = frame_shape_from_str(shape)?;
    let transform = ShapeTransform::new(x, y, scale);
    let path = placed_shape_path(shape, &transform, viewport_width, viewport_height);
    Ok(path.flatten().into_iter().flat_map(|(x, y)| [x, y]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_names_parse() {
        for name in ["rectangle", "circle", "square", "heart", "star"] {
            assert!(frame_shape_from_str(name).is_ok(), "{} should parse", name);
        }
        assert!(frame_shape_from_str("triangle").is_err());
    }

    #[test]
    fn test_overlay_starts_centered() {
        let overlay = ShapeOverlay::new("circle", 200.0, 200.0).unwrap();
        assert_eq!(overlay.x(), 0.5);
        assert_eq!(overlay.y(), 0.5);
        assert_eq!(overlay.scale(), 1.0);
    }

    #[test]
    fn test_pan_converts_pixels_to_normalized() {
        let mut overlay = ShapeOverlay::new("circle", 200.0, 100.0).unwrap();
        overlay.pan(20.0, 10.0);
        assert!((overlay.x() - 0.6).abs() < 1e-6);
        assert!((overlay.y() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_pan_clamps_at_viewport_edge() {
        let mut overlay = ShapeOverlay::new("square", 100.0, 100.0).unwrap();
        overlay.pan(1e6, -1e6);
        assert_eq!(overlay.x(), 1.0);
        assert_eq!(overlay.y(), 0.0);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut overlay = ShapeOverlay::new("heart", 100.0, 100.0).unwrap();
        overlay.zoom(1e9);
        assert_eq!(overlay.scale(), 3.0);
        overlay.zoom(1e-9);
        assert_eq!(overlay.scale(), 0.1);
    }

    #[test]
    fn test_hit_test_circle() {
        let overlay = ShapeOverlay::new("circle", 200.0, 200.0).unwrap();
        // Centered circle in a 100x100 box at (100, 100)
        assert!(overlay.hit_test(100.0, 100.0));
        assert!(!overlay.hit_test(10.0, 10.0));
    }

    #[test]
    fn test_hit_test_rectangle_always_inside() {
        let overlay = ShapeOverlay::new("rectangle", 200.0, 200.0).unwrap();
        assert!(overlay.hit_test(0.0, 0.0));
        assert!(overlay.hit_test(199.0, 199.0));
    }

    #[test]
    fn test_outline_interleaved_pairs() {
        let overlay = ShapeOverlay::new("square", 100.0, 100.0).unwrap();
        let outline = overlay.outline();
        assert!(!outline.is_empty());
        assert_eq!(outline.len() % 2, 0, "Outline must be (x, y) pairs");
    }

    #[test]
    fn test_rectangle_outline_empty() {
        let overlay = ShapeOverlay::new("rectangle", 100.0, 100.0).unwrap();
        assert!(overlay.outline().is_empty());
    }

    #[test]
    fn test_shape_outline_free_function_clamps() {
        // Out-of-range transform inputs are clamped, not rejected
        let outline = shape_outline("star", 7.0, -3.0, 99.0, 100.0, 100.0).unwrap();
        assert!(!outline.is_empty());

        // Scale clamps to 3.0 -> box size 150 centered at (100, 0)
        let max_x = outline.chunks(2).map(|p| p[0]).fold(f32::MIN, f32::max);
        assert!(max_x <= 175.0 + 1e-3);
    }
}
