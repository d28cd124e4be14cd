//! Vector outlines for the frame shapes.
//!
//! Shapes are defined as paths of line and cubic Bezier segments in local
//! coordinates with the origin at the bounding box's top-left corner. Paths
//! are left un-closed; consumers treat the outline as an implicit loop from
//! the last point back to the first.
//!
//! The path is the single source of truth for a shape: the compositor
//! rasterizes it (even-odd), hit-testing queries it, and the interactive
//! overlay strokes its flattened polyline.

use super::{FrameShape, ShapeTransform};

/// Bezier circle approximation constant: `4/3 * (sqrt(2) - 1)`.
const KAPPA: f32 = 0.552_284_8;

/// Line segments per cubic Bezier when flattening. Fixed so flattening (and
/// everything derived from it) is deterministic.
const CURVE_STEPS: usize = 24;

/// One segment of a shape outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a subpath at a point.
    MoveTo(f32, f32),
    /// Straight line to a point.
    LineTo(f32, f32),
    /// Cubic Bezier to a point via two control handles.
    CubicTo {
        /// First control handle.
        c1: (f32, f32),
        /// Second control handle.
        c2: (f32, f32),
        /// Curve endpoint.
        to: (f32, f32),
    },
}

/// A shape outline as a sequence of segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapePath {
    /// Outline segments; empty for the pass-through rectangle "shape".
    pub segments: Vec<PathSegment>,
}

impl ShapePath {
    /// An empty path (no outline, nothing masked).
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Translate all coordinates by an offset.
    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        for seg in &mut self.segments {
            match seg {
                PathSegment::MoveTo(x, y) | PathSegment::LineTo(x, y) => {
                    *x += dx;
                    *y += dy;
                }
                PathSegment::CubicTo { c1, c2, to } => {
                    c1.0 += dx;
                    c1.1 += dy;
                    c2.0 += dx;
                    c2.1 += dy;
                    to.0 += dx;
                    to.1 += dy;
                }
            }
        }
        self
    }

    /// Flatten the outline to a polyline.
    ///
    /// Cubic segments are subdivided at a fixed step count, so the polyline
    /// is deterministic for a given path. The implicit closing edge (last
    /// point back to the first) is not emitted.
    pub fn flatten(&self) -> Vec<(f32, f32)> {
        let mut points = Vec::new();
        let mut current = (0.0, 0.0);

        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(x, y) => {
                    current = (x, y);
                    points.push(current);
                }
                PathSegment::LineTo(x, y) => {
                    current = (x, y);
                    points.push(current);
                }
                PathSegment::CubicTo { c1, c2, to } => {
                    for step in 1..=CURVE_STEPS {
                        let t = step as f32 / CURVE_STEPS as f32;
                        points.push(cubic_point(current, c1, c2, to, t));
                    }
                    current = to;
                }
            }
        }

        points
    }

    /// Even-odd point-in-shape test against the flattened outline.
    ///
    /// A horizontal ray is cast from `(x, y)`; the point is inside when it
    /// crosses the outline an odd number of times. An empty path contains
    /// nothing.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let polygon = self.flatten();
        if polygon.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let (xi, yi) = polygon[i];
            let (xj, yj) = polygon[j];
            if (yi > y) != (yj > y) {
                let x_cross = xi + (y - yi) / (yj - yi) * (xj - xi);
                if x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Evaluate a cubic Bezier at parameter `t`.
#[inline]
fn cubic_point(
    from: (f32, f32),
    c1: (f32, f32),
    c2: (f32, f32),
    to: (f32, f32),
    t: f32,
) -> (f32, f32) {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;
    (
        w0 * from.0 + w1 * c1.0 + w2 * c2.0 + w3 * to.0,
        w0 * from.1 + w1 * c1.1 + w2 * c2.1 + w3 * to.1,
    )
}

/// Build the outline for a shape in a `width x height` local box.
///
/// The origin is the bounding box's top-left corner. `Rectangle` returns an
/// empty path: the full frame applies and nothing is masked.
pub fn shape_path(shape: FrameShape, width: f32, height: f32) -> ShapePath {
    match shape {
        FrameShape::Rectangle => ShapePath::empty(),
        FrameShape::Square => square_path(width, height),
        FrameShape::Circle => ellipse_path(width, height),
        FrameShape::Heart => heart_path(width, height),
        FrameShape::Star => star_path(width, height),
    }
}

/// Build a shape's outline placed over a viewport by a transform.
///
/// The local box is `transform.bounding_box(vw, vh)`; the path is generated
/// at that size and translated into viewport coordinates.
pub fn placed_shape_path(
    shape: FrameShape,
    transform: &ShapeTransform,
    viewport_width: f32,
    viewport_height: f32,
) -> ShapePath {
    let (left, top, size) = transform.bounding_box(viewport_width, viewport_height);
    shape_path(shape, size, size).translate(left, top)
}

/// Centered square of side `min(width, height)`.
fn square_path(width: f32, height: f32) -> ShapePath {
    let side = width.min(height);
    let left = (width - side) / 2.0;
    let top = (height - side) / 2.0;

    ShapePath {
        segments: vec![
            PathSegment::MoveTo(left, top),
            PathSegment::LineTo(left + side, top),
            PathSegment::LineTo(left + side, top + side),
            PathSegment::LineTo(left, top + side),
        ],
    }
}

/// Ellipse inscribed in the bounding box, as four cubic arcs.
fn ellipse_path(width: f32, height: f32) -> ShapePath {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let (rx, ry) = (width / 2.0, height / 2.0);
    let (ox, oy) = (rx * KAPPA, ry * KAPPA);

    ShapePath {
        segments: vec![
            PathSegment::MoveTo(cx, cy - ry),
            PathSegment::CubicTo {
                c1: (cx + ox, cy - ry),
                c2: (cx + rx, cy - oy),
                to: (cx + rx, cy),
            },
            PathSegment::CubicTo {
                c1: (cx + rx, cy + oy),
                c2: (cx + ox, cy + ry),
                to: (cx, cy + ry),
            },
            PathSegment::CubicTo {
                c1: (cx - ox, cy + ry),
                c2: (cx - rx, cy + oy),
                to: (cx - rx, cy),
            },
            PathSegment::CubicTo {
                c1: (cx - rx, cy - oy),
                c2: (cx - ox, cy - ry),
                to: (cx, cy - ry),
            },
        ],
    }
}

/// Two mirrored cubic lobes meeting at a top notch and a bottom point.
///
/// Endpoints: top notch `(w/2, 0.35h)`, bottom point `(w/2, h)`. The right
/// lobe's handles are `(0.7w, 0.1h)` and `(w, 0.5h)`; the left lobe mirrors
/// them about the vertical center line.
fn heart_path(width: f32, height: f32) -> ShapePath {
    let notch = (width / 2.0, 0.35 * height);
    let point = (width / 2.0, height);

    ShapePath {
        segments: vec![
            PathSegment::MoveTo(notch.0, notch.1),
            // Right lobe, down to the bottom point
            PathSegment::CubicTo {
                c1: (0.7 * width, 0.1 * height),
                c2: (width, 0.5 * height),
                to: point,
            },
            // Left lobe, back up to the notch (handles mirrored)
            PathSegment::CubicTo {
                c1: (0.0, 0.5 * height),
                c2: (0.3 * width, 0.1 * height),
                to: notch,
            },
        ],
    }
}

/// Five-point star with inner radius `outer / 2.5`.
///
/// Ten alternating outer/inner vertices at `angle = i * PI / 5 - PI / 2`,
/// starting with an outer vertex at the top.
fn star_path(width: f32, height: f32) -> ShapePath {
    const POINTS: usize = 5;

    let (cx, cy) = (width / 2.0, height / 2.0);
    let outer = width.min(height) / 2.0;
    let inner = outer / 2.5;

    let mut segments = Vec::with_capacity(POINTS * 2);
    for i in 0..POINTS * 2 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = i as f32 * std::f32::consts::PI / POINTS as f32 - std::f32::consts::FRAC_PI_2;
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin();
        segments.push(if i == 0 {
            PathSegment::MoveTo(x, y)
        } else {
            PathSegment::LineTo(x, y)
        });
    }

    ShapePath { segments }
}
