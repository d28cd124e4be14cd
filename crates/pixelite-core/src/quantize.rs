//! Nearest-palette-color quantization.
//!
//! Maps every color to its closest palette entry by Euclidean RGB distance.
//! Ties keep the first entry in palette order, so results are deterministic
//! given the palette ordering. The ditherer reuses [`nearest_color`] as its
//! color-selection step.

use crate::color::Color;
use crate::grid::PixelGrid;
use thiserror::Error;

/// Errors from the quantizer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantizeError {
    /// An empty palette reached the quantizer.
    #[error("Cannot quantize against an empty palette")]
    EmptyPalette,
}

/// Find the palette entry nearest to a color.
///
/// Distance is Euclidean in RGB space. The comparison is strict, so when two
/// entries are equidistant the one that appears first in the palette wins.
/// Repeated calls with the same inputs always produce the same result, and
/// the result is always a member of the palette.
///
/// # Errors
///
/// Returns `QuantizeError::EmptyPalette` if the palette has no entries.
pub fn nearest_color(color: Color, palette: &[Color]) -> Result<Color, QuantizeError> {
    nearest_color_components(
        [color.r as f32, color.g as f32, color.b as f32],
        palette,
    )
}

/// Find the palette entry nearest to unclamped float RGB components.
///
/// The ditherer accumulates diffusion error on a float buffer, so values may
/// fall outside 0-255 at selection time; the distance comparison works on
/// the raw components without clamping. Tie-break and determinism rules are
/// identical to [`nearest_color`].
///
/// # Errors
///
/// Returns `QuantizeError::EmptyPalette` if the palette has no entries.
pub fn nearest_color_components(rgb: [f32; 3], palette: &[Color]) -> Result<Color, QuantizeError> {
    let distance_sq = |entry: Color| {
        let dr = rgb[0] - entry.r as f32;
        let dg = rgb[1] - entry.g as f32;
        let db = rgb[2] - entry.b as f32;
        dr * dr + dg * dg + db * db
    };

    let mut entries = palette.iter();
    let mut closest = *entries.next().ok_or(QuantizeError::EmptyPalette)?;
    let mut min_distance = distance_sq(closest);

    for &entry in entries {
        let distance = distance_sq(entry);
        if distance < min_distance {
            min_distance = distance;
            closest = entry;
        }
    }

    Ok(closest)
}

/// Quantize every grid cell independently against the palette.
///
/// No error propagation between cells; this is the non-dithered path.
///
/// # Errors
///
/// Returns `QuantizeError::EmptyPalette` if the palette has no entries.
pub fn quantize_grid(grid: &mut PixelGrid, palette: &[Color]) -> Result<(), QuantizeError> {
    if palette.is_empty() {
        return Err(QuantizeError::EmptyPalette);
    }

    for y in 0..grid.height {
        for x in 0..grid.width {
            let quantized = nearest_color(grid.get(x, y), palette)?;
            grid.set(x, y, quantized);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bw_palette() -> Vec<Color> {
        vec![Color::new(0, 0, 0), Color::new(255, 255, 255)]
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = nearest_color(Color::new(1, 2, 3), &[]);
        assert_eq!(result, Err(QuantizeError::EmptyPalette));
    }

    #[test]
    fn test_exact_match() {
        let palette = bw_palette();
        assert_eq!(
            nearest_color(Color::new(0, 0, 0), &palette).unwrap(),
            Color::new(0, 0, 0)
        );
    }

    #[test]
    fn test_nearest_selection() {
        let palette = bw_palette();
        assert_eq!(
            nearest_color(Color::new(30, 30, 30), &palette).unwrap(),
            Color::new(0, 0, 0)
        );
        assert_eq!(
            nearest_color(Color::new(220, 220, 220), &palette).unwrap(),
            Color::new(255, 255, 255)
        );
    }

    #[test]
    fn test_tie_break_first_in_palette_order() {
        // (100,0,0) and (0,100,0) are equidistant from (50,50,0)
        let palette = vec![Color::new(100, 0, 0), Color::new(0, 100, 0)];
        let result = nearest_color(Color::new(50, 50, 0), &palette).unwrap();
        assert_eq!(result, Color::new(100, 0, 0), "Tie should keep first entry");

        // Reversing the palette flips the winner
        let reversed = vec![Color::new(0, 100, 0), Color::new(100, 0, 0)];
        let result = nearest_color(Color::new(50, 50, 0), &reversed).unwrap();
        assert_eq!(result, Color::new(0, 100, 0));
    }

    #[test]
    fn test_result_is_palette_member() {
        let palette = vec![
            Color::new(10, 20, 30),
            Color::new(200, 100, 0),
            Color::new(0, 0, 250),
        ];
        for c in [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(128, 64, 32),
        ] {
            let result = nearest_color(c, &palette).unwrap();
            assert!(palette.contains(&result));
        }
    }

    #[test]
    fn test_quantize_grid_all_cells() {
        let mut grid = PixelGrid::new(2, 2, vec![0u8; 12]);
        grid.set(0, 0, Color::new(10, 10, 10));
        grid.set(1, 0, Color::new(240, 240, 240));
        grid.set(0, 1, Color::new(120, 120, 120));
        grid.set(1, 1, Color::new(130, 130, 130));

        quantize_grid(&mut grid, &bw_palette()).unwrap();

        assert_eq!(grid.get(0, 0), Color::new(0, 0, 0));
        assert_eq!(grid.get(1, 0), Color::new(255, 255, 255));
        assert_eq!(grid.get(0, 1), Color::new(0, 0, 0));
        assert_eq!(grid.get(1, 1), Color::new(255, 255, 255));
    }

    #[test]
    fn test_quantize_grid_empty_palette() {
        let mut grid = PixelGrid::new(1, 1, vec![0u8; 3]);
        assert_eq!(
            quantize_grid(&mut grid, &[]),
            Err(QuantizeError::EmptyPalette)
        );
    }
}
