//! RGB color type and color-space utilities.
//!
//! Provides the `Color` value type used throughout the pipeline, plus
//! luminance calculation (ITU-R BT.709 coefficients) and the Euclidean
//! distance metric used for nearest-palette-color selection. Hex conversion
//! supports the palette-generation collaborator, which exchanges colors as
//! `"#RRGGBB"` strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Errors that can occur when parsing a hex color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not 3 or 6 hex digits (after an optional `#`).
    #[error("Invalid hex color length: {0:?}")]
    InvalidLength(String),

    /// A character is not a hex digit.
    #[error("Invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// An 8-bit RGB color.
///
/// A plain value type with no identity: two colors with equal channels are
/// the same color. Palette entries, grid cells, and quantizer results are all
/// `Color` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
}

impl Color {
    /// Create a color from its channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to another color in RGB space.
    ///
    /// `sqrt(dr^2 + dg^2 + db^2)` over the raw 0-255 channel values. This is
    /// the metric the quantizer uses; no perceptual weighting.
    #[inline]
    pub fn distance(self, other: Color) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Perceptual luminance using ITU-R BT.709 coefficients.
    ///
    /// Operates on the raw 0-255 channel values, so the result is in the
    /// 0.0-255.0 range. Used by the palette builder to order distinct colors.
    #[inline]
    pub fn luminance(self) -> f32 {
        LUMINANCE_R * self.r as f32 + LUMINANCE_G * self.g as f32 + LUMINANCE_B * self.b as f32
    }

    /// Parse a hex color string such as `"#ff8800"`, `"ff8800"` or `"#f80"`.
    ///
    /// Accepts an optional leading `#` and either 6-digit or 3-digit
    /// shorthand notation. Parsing is case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidDigit(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            3 => {
                // Shorthand: each digit doubles, "f80" -> "ff8800"
                let expand = |s: &str| channel(s).map(|v| v * 16 + v);
                Ok(Self {
                    r: expand(&digits[0..1])?,
                    g: expand(&digits[1..2])?,
                    b: expand(&digits[2..3])?,
                })
            }
            _ => Err(ColorParseError::InvalidLength(hex.to_string())),
        }
    }

    /// Format as a lowercase `"#rrggbb"` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
