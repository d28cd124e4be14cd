//! Frame-mask compositing.
//!
//! Rasterizes a placed shape over the output image: everything outside the
//! shape is covered by a translucent dim layer (the shape interior is the
//! cut-out that reveals the image), and the outline is stroked with a dashed
//! line as a drag/zoom affordance.
//!
//! The fill uses an even-odd scanline rasterization of the flattened outline,
//! matching the even-odd containment test in [`super::path`].

use super::path::placed_shape_path;
use super::{FrameShape, ShapeTransform};
use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Visual style of the frame overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Color of the dim layer outside the shape.
    pub dim_color: Color,
    /// Opacity of the dim layer (0.0 to 1.0).
    pub dim_alpha: f32,
    /// Color of the dashed outline stroke.
    pub stroke_color: Color,
    /// Opacity of the outline stroke (0.0 to 1.0).
    pub stroke_alpha: f32,
    /// Length of a dash segment in pixels.
    pub dash_length: f32,
    /// Length of the gap between dashes in pixels.
    pub gap_length: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            dim_color: Color::new(0, 0, 0),
            dim_alpha: 0.5,
            stroke_color: Color::new(255, 255, 255),
            stroke_alpha: 0.9,
            dash_length: 6.0,
            gap_length: 4.0,
        }
    }
}

/// Alpha-blend a color onto one pixel of an RGB buffer.
#[inline]
pub(crate) fn blend_pixel(pixels: &mut [u8], width: u32, x: u32, y: u32, color: Color, alpha: f32) {
    let i = ((y * width + x) * 3) as usize;
    let a = alpha.clamp(0.0, 1.0);
    pixels[i] = (pixels[i] as f32 * (1.0 - a) + color.r as f32 * a).round() as u8;
    pixels[i + 1] = (pixels[i + 1] as f32 * (1.0 - a) + color.g as f32 * a).round() as u8;
    pixels[i + 2] = (pixels[i + 2] as f32 * (1.0 - a) + color.b as f32 * a).round() as u8;
}

/// Composite the frame overlay onto an RGB buffer.
///
/// For `FrameShape::Rectangle` this is a no-op: the full frame applies, the
/// transform stays tracked but inert. For every other shape the viewport is
/// dimmed outside the placed outline and the outline is stroked dashed.
pub fn composite_frame(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    shape: FrameShape,
    transform: &ShapeTransform,
    style: &OverlayStyle,
) {
    if shape == FrameShape::Rectangle || width == 0 || height == 0 {
        return;
    }

    let path = placed_shape_path(shape, transform, width as f32, height as f32);
    let polygon = path.flatten();
    if polygon.len() < 3 {
        return;
    }

    dim_outside(pixels, width, height, &polygon, style);
    stroke_dashed(pixels, width, height, &polygon, style);
}

/// Dim every pixel whose center falls outside the polygon (even-odd rule).
fn dim_outside(pixels: &mut [u8], width: u32, height: u32, polygon: &[(f32, f32)], style: &OverlayStyle) {
    let mut crossings: Vec<f32> = Vec::new();

    for y in 0..height {
        let yc = y as f32 + 0.5;

        crossings.clear();
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let (xi, yi) = polygon[i];
            let (xj, yj) = polygon[j];
            if (yi > yc) != (yj > yc) {
                crossings.push(xi + (yc - yi) / (yj - yi) * (xj - xi));
            }
            j = i;
        }
        crossings.sort_by(f32::total_cmp);

        // Walk the row once; parity of crossings passed so far decides
        // inside/outside for each pixel center
        let mut next = 0;
        let mut inside = false;
        for x in 0..width {
            let xc = x as f32 + 0.5;
            while next < crossings.len() && crossings[next] <= xc {
                inside = !inside;
                next += 1;
            }
            if !inside {
                blend_pixel(pixels, width, x, y, style.dim_color, style.dim_alpha);
            }
        }
    }
}

/// Stroke the closed outline with a dashed line.
fn stroke_dashed(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    polygon: &[(f32, f32)],
    style: &OverlayStyle,
) {
    let period = style.dash_length + style.gap_length;
    if period <= 0.0 {
        return;
    }

    let mut distance = 0.0f32;
    let mut last_stamp: Option<(u32, u32)> = None;

    for i in 0..polygon.len() {
        let (x0, y0) = polygon[i];
        let (x1, y1) = polygon[(i + 1) % polygon.len()];
        let seg_len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        if seg_len <= f32::EPSILON {
            continue;
        }

        let steps = seg_len.ceil() as usize;
        for step in 0..steps {
            let t = step as f32 / steps as f32;
            let d = distance + seg_len * t;
            if d % period >= style.dash_length {
                continue; // in a gap
            }

            let px = x0 + (x1 - x0) * t;
            let py = y0 + (y1 - y0) * t;
            if px < 0.0 || py < 0.0 {
                continue;
            }
            let (ix, iy) = (px as u32, py as u32);
            if ix >= width || iy >= height {
                continue;
            }
            // Avoid re-blending the same pixel on consecutive steps
            if last_stamp == Some((ix, iy)) {
                continue;
            }
            last_stamp = Some((ix, iy));
            blend_pixel(pixels, width, ix, iy, style.stroke_color, style.stroke_alpha);
        }

        distance += seg_len;
    }
}
