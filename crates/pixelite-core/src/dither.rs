//! Floyd-Steinberg error-diffusion dithering.
//!
//! Raster-scans the grid row-major (y outer, x inner). Each cell is quantized
//! against a float working copy that carries the accumulated diffusion error,
//! and the signed per-channel error `old - new` is pushed forward onto the
//! not-yet-visited neighbors with the classic weights:
//!
//! ```text
//!             x    7/16
//!   3/16    5/16   1/16
//! ```
//!
//! The working buffer is never clamped between steps; values only collapse to
//! the palette's discrete set when their own cell is visited. The strict
//! row-major visitation order is load-bearing: it is what makes the output
//! bit-for-bit reproducible, and it forbids parallelizing this step within a
//! single run.

use crate::color::Color;
use crate::grid::PixelGrid;
use crate::quantize::{nearest_color_components, QuantizeError};

/// Floyd-Steinberg diffusion targets as (dx, dy, weight).
const DIFFUSION: [(i64, i64, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Dither the grid in place against the palette.
///
/// # Errors
///
/// Returns `QuantizeError::EmptyPalette` if the palette has no entries; the
/// grid is left untouched in that case.
pub fn dither_grid(grid: &mut PixelGrid, palette: &[Color]) -> Result<(), QuantizeError> {
    if palette.is_empty() {
        return Err(QuantizeError::EmptyPalette);
    }

    let width = grid.width as i64;
    let height = grid.height as i64;

    // Float working copy holding source values plus accumulated error
    let mut working: Vec<f32> = grid.pixels.iter().map(|&v| v as f32).collect();

    for y in 0..height {
        for x in 0..width {
            let i = ((y * width + x) * 3) as usize;
            let old = [working[i], working[i + 1], working[i + 2]];
            let new = nearest_color_components(old, palette)?;

            grid.set(x as u32, y as u32, new);

            let err = [
                old[0] - new.r as f32,
                old[1] - new.g as f32,
                old[2] - new.b as f32,
            ];

            for (dx, dy, weight) in DIFFUSION {
                let tx = x + dx;
                let ty = y + dy;
                // Out-of-bounds targets are silently skipped
                if tx < 0 || tx >= width || ty < 0 || ty >= height {
                    continue;
                }
                let j = ((ty * width + tx) * 3) as usize;
                working[j] += err[0] * weight;
                working[j + 1] += err[1] * weight;
                working[j + 2] += err[2] * weight;
            }
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

    fn solid_grid(width: u32, height: u32, color: Color) -> PixelGrid {
        let pixels = (0..width * height)
            .flat_map(|_| [color.r, color.g, color.b])
            .collect();
        PixelGrid::new(width, height, pixels)
    }

    #[test]
    fn test_empty_palette_rejected_and_grid_untouched() {
        let mut grid = solid_grid(2, 2, Color::new(128, 128, 128));
        let before = grid.clone();

        assert_eq!(dither_grid(&mut grid, &[]), Err(QuantizeError::EmptyPalette));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_output_cells_are_palette_members() {
        let mut grid = PixelGrid::new(4, 4, (0..48).map(|i| (i * 5) as u8).collect());
        let palette = bw_palette();

        dither_grid(&mut grid, &palette).unwrap();

        for c in grid.colors() {
            assert!(
                palette.contains(&c),
                "Dithered cell {:?} should be a palette color",
                c
            );
        }
    }

    #[test]
    fn test_exact_palette_color_unchanged() {
        // A grid entirely at a palette color has zero error everywhere
        let mut grid = solid_grid(3, 3, Color::new(255, 255, 255));
        dither_grid(&mut grid, &bw_palette()).unwrap();

        for c in grid.colors() {
            assert_eq!(c, Color::new(255, 255, 255));
        }
    }

    #[test]
    fn test_mid_gray_alternates() {
        // 50% gray against black/white should produce a mix of both, with
        // the overall tone preserved
        let mut grid = solid_grid(8, 8, Color::new(128, 128, 128));
        dither_grid(&mut grid, &bw_palette()).unwrap();

        let white_cells = grid
            .colors()
            .filter(|c| *c == Color::new(255, 255, 255))
            .count();
        let total = grid.cell_count() as usize;

        assert!(white_cells > 0, "Dithering should produce some white");
        assert!(white_cells < total, "Dithering should produce some black");

        // Average tone stays near 50%: 128/255 of 64 cells ~ 32
        let ratio = white_cells as f32 / total as f32;
        assert!(
            (ratio - 0.5).abs() < 0.2,
            "White ratio should approximate the source tone, got {}",
            ratio
        );
    }

    #[test]
    fn test_first_cell_error_diffuses_right() {
        // Single row: 1/16 and the row-below weights fall out of bounds, so
        // 7/16 of the first cell's error lands on the second cell.
        // Start: [200, 100] against black/white.
        // Cell 0: 200 -> white (255), err = -55, cell 1 becomes
        // 100 - 55*7/16 = 75.9 -> black.
        let mut grid = PixelGrid::new(2, 1, vec![200, 200, 200, 100, 100, 100]);
        dither_grid(&mut grid, &bw_palette()).unwrap();

        assert_eq!(grid.get(0, 0), Color::new(255, 255, 255));
        assert_eq!(grid.get(1, 0), Color::new(0, 0, 0));
    }

    #[test]
    fn test_reproducible_bit_for_bit() {
        let pixels: Vec<u8> = (0..10 * 10 * 3).map(|i| ((i * 37) % 251) as u8).collect();
        let palette = vec![
            Color::new(0, 0, 0),
            Color::new(85, 85, 85),
            Color::new(170, 170, 170),
            Color::new(255, 255, 255),
        ];

        let mut first = PixelGrid::new(10, 10, pixels.clone());
        let mut second = PixelGrid::new(10, 10, pixels);

        dither_grid(&mut first, &palette).unwrap();
        dither_grid(&mut second, &palette).unwrap();

        assert_eq!(first.pixels, second.pixels, "Runs must agree bit for bit");
    }

    #[test]
    fn test_single_cell_grid() {
        let mut grid = solid_grid(1, 1, Color::new(100, 100, 100));
        dither_grid(&mut grid, &bw_palette()).unwrap();
        // All diffusion targets are out of bounds; the cell just quantizes
        assert_eq!(grid.get(0, 0), Color::new(0, 0, 0));
    }

    #[test]
    fn test_differs_from_plain_quantization() {
        // On a gradient, dithering and plain quantization must disagree
        // somewhere (that is the point of error diffusion)
        let pixels: Vec<u8> = (0..16 * 16)
            .flat_map(|i| {
                let v = (i * 255 / (16 * 16 - 1)) as u8;
                [v, v, v]
            })
            .collect();
        let palette = bw_palette();

        let mut dithered = PixelGrid::new(16, 16, pixels.clone());
        dither_grid(&mut dithered, &palette).unwrap();

        let mut plain = PixelGrid::new(16, 16, pixels);
        crate::quantize::quantize_grid(&mut plain, &palette).unwrap();

        assert_ne!(dithered.pixels, plain.pixels);
    }
}
