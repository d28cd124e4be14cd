//! Frame-shape masks for non-rectangular framing.
//!
//! This module defines the supported frame shapes, the user-driven transform
//! (pan + scale) that places a shape over the viewport, and the compositing
//! step that dims everything outside the shape while revealing its interior.
//!
//! ## Design
//!
//! Geometry is declarative: [`shape_path`] produces a vector outline, and the
//! compositor rasterizes it with an explicit even-odd fill rule. There is no
//! implicit drawing-context state; the "cut a hole" subtract semantics are a
//! contract of the path itself.

pub mod composite;
pub mod path;

pub use composite::{composite_frame, OverlayStyle};
pub use path::{placed_shape_path, shape_path, PathSegment, ShapePath};

use serde::{Deserialize, Serialize};

/// Minimum allowed shape scale factor.
pub const SHAPE_SCALE_MIN: f32 = 0.1;

/// Maximum allowed shape scale factor.
pub const SHAPE_SCALE_MAX: f32 = 3.0;

/// Fraction of the viewport's short edge used as the shape's base size.
///
/// At scale 1.0 a shape occupies half the short edge, so a 200x200 viewport
/// gets a 100x100 bounding box.
pub const SHAPE_BASE_RATIO: f32 = 0.5;

/// The frame shapes a user can pick.
///
/// `Rectangle` is the full-frame default: no mask is drawn and the transform,
/// while still tracked, is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameShape {
    /// Full frame, no masking.
    #[default]
    Rectangle,
    /// Ellipse inscribed in the shape's bounding box.
    Circle,
    /// Centered square of side `min(width, height)`.
    Square,
    /// Two mirrored cubic lobes meeting at a bottom point and top notch.
    Heart,
    /// Five-point star.
    Star,
}

/// User-controlled placement of a frame shape over the viewport.
///
/// `x` and `y` are the shape's center as a fraction of the viewport's width
/// and height; `scale` multiplies the base size. Every construction and
/// update re-clamps to the valid ranges - a transform can never hold an
/// out-of-range value, regardless of the drag or wheel deltas that fed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeTransform {
    /// Center X as a fraction of viewport width (0.0 to 1.0).
    pub x: f32,
    /// Center Y as a fraction of viewport height (0.0 to 1.0).
    pub y: f32,
    /// Size multiplier (SHAPE_SCALE_MIN to SHAPE_SCALE_MAX).
    pub scale: f32,
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            scale: 1.0,
        }
    }
}

impl ShapeTransform {
    /// Create a transform, clamping all components into range.
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
            scale: scale.clamp(SHAPE_SCALE_MIN, SHAPE_SCALE_MAX),
        }
    }

    /// Pan the center by normalized deltas, then re-clamp.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx).clamp(0.0, 1.0);
        self.y = (self.y + dy).clamp(0.0, 1.0);
    }

    /// Multiply the scale by a zoom factor, then re-clamp.
    pub fn zoom(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(SHAPE_SCALE_MIN, SHAPE_SCALE_MAX);
    }

    /// True when every component is inside its valid range.
    pub fn is_clamped(&self) -> bool {
        (0.0..=1.0).contains(&self.x)
            && (0.0..=1.0).contains(&self.y)
            && (SHAPE_SCALE_MIN..=SHAPE_SCALE_MAX).contains(&self.scale)
    }

    /// The shape's placed bounding box for a viewport: `(left, top, size)`.
    ///
    /// Base size is `min(vw, vh) * SHAPE_BASE_RATIO`, multiplied by `scale`
    /// and centered at `(x * vw, y * vh)`.
    pub fn bounding_box(&self, viewport_width: f32, viewport_height: f32) -> (f32, f32, f32) {
        let size = viewport_width.min(viewport_height) * SHAPE_BASE_RATIO * self.scale;
        let cx = self.x * viewport_width;
        let cy = self.y * viewport_height;
        (cx - size / 2.0, cy - size / 2.0, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform_centered() {
        let t = ShapeTransform::default();
        assert_eq!(t.x, 0.5);
        assert_eq!(t.y, 0.5);
        assert_eq!(t.scale, 1.0);
        assert!(t.is_clamped());
    }

    #[test]
    fn test_default_shape_is_rectangle() {
        assert_eq!(FrameShape::default(), FrameShape::Rectangle);
    }

    #[test]
    fn test_new_clamps_out_of_range_inputs() {
        let t = ShapeTransform::new(-3.0, 42.0, 100.0);
        assert_eq!(t.x, 0.0);
        assert_eq!(t.y, 1.0);
        assert_eq!(t.scale, SHAPE_SCALE_MAX);
    }

    #[test]
    fn test_pan_clamps_at_edges() {
        let mut t = ShapeTransform::default();
        t.pan(10.0, -10.0);
        assert_eq!(t.x, 1.0);
        assert_eq!(t.y, 0.0);

        t.pan(-0.25, 0.25);
        assert_eq!(t.x, 0.75);
        assert_eq!(t.y, 0.25);
    }

    #[test]
    fn test_zoom_clamps_at_limits() {
        let mut t = ShapeTransform::default();
        t.zoom(1000.0);
        assert_eq!(t.scale, SHAPE_SCALE_MAX);

        t.zoom(0.00001);
        assert_eq!(t.scale, SHAPE_SCALE_MIN);

        t.zoom(2.0);
        assert!((t.scale - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box_centered_unit_scale() {
        // 200x200 viewport, centered, scale 1 -> a 100x100 box centered
        // at (100, 100)
        let t = ShapeTransform::default();
        let (left, top, size) = t.bounding_box(200.0, 200.0);
        assert_eq!(size, 100.0);
        assert_eq!(left, 50.0);
        assert_eq!(top, 50.0);
    }

    #[test]
    fn test_bounding_box_uses_short_edge() {
        let t = ShapeTransform::default();
        let (_, _, size) = t.bounding_box(400.0, 100.0);
        assert_eq!(size, 50.0, "Base size should track the short edge");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: after any sequence of pans and zooms with arbitrary
        /// deltas, the transform is still clamped.
        #[test]
        fn prop_transform_always_clamped(
            start_x in -10.0f32..10.0,
            start_y in -10.0f32..10.0,
            start_scale in -10.0f32..10.0,
            ops in prop::collection::vec((-5.0f32..5.0, -5.0f32..5.0, 0.01f32..20.0), 0..64),
        ) {
            let mut t = ShapeTransform::new(start_x, start_y, start_scale);
            prop_assert!(t.is_clamped());

            for (dx, dy, factor) in ops {
                t.pan(dx, dy);
                t.zoom(factor);
                prop_assert!(t.is_clamped(), "Transform escaped its range: {:?}", t);
            }
        }

        /// Property: the bounding box is always centered on the transformed
        /// center point.
        #[test]
        fn prop_bounding_box_centered(
            x in 0.0f32..=1.0,
            y in 0.0f32..=1.0,
            scale in SHAPE_SCALE_MIN..=SHAPE_SCALE_MAX,
            vw in 1.0f32..=2000.0,
            vh in 1.0f32..=2000.0,
        ) {
            let t = ShapeTransform::new(x, y, scale);
            let (left, top, size) = t.bounding_box(vw, vh);
            prop_assert!((left + size / 2.0 - x * vw).abs() < 1e-2);
            prop_assert!((top + size / 2.0 - y * vh).abs() < 1e-2);
        }
    }
}
