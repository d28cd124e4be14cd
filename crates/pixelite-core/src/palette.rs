//! Palette derivation and the external palette-generation seam.
//!
//! When the user does not supply a palette, the builder reduces the coarse
//! grid's colors with a deliberately simple scheme: collect the distinct
//! colors, and if there are more than requested, sort them by luminance and
//! sample the sorted list at a fixed stride. This is systematic sampling, not
//! an optimal clustering; full k-means or median-cut reduction is out of
//! scope.
//!
//! An external collaborator (a generative-AI service in the reference UI) may
//! instead propose a palette from a prompt. That collaborator lives behind
//! the [`PaletteSource`] trait so the core stays deterministic and
//! offline-testable; its hex-string replies are validated by
//! [`parse_hex_palette`].

use crate::color::{Color, ColorParseError};
use crate::decode::SourceImage;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from an external palette-generation collaborator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The collaborator is not configured or reachable.
    #[error("Palette generation is unavailable")]
    Unavailable,

    /// The collaborator replied with something that is not a palette.
    #[error("Invalid palette response: {0}")]
    InvalidResponse(String),

    /// The generation request itself failed.
    #[error("Palette generation failed: {0}")]
    Failed(String),
}

/// A capability that proposes a palette for an image from a text prompt.
///
/// Implemented outside the core (the reference app calls a generative-AI
/// service); the pipeline only ever consumes the returned colors as a
/// pre-validated `custom_palette`.
pub trait PaletteSource {
    /// Generate a palette of `color_count` colors for the image and prompt.
    fn generate(
        &self,
        image: &SourceImage,
        prompt: &str,
        color_count: usize,
    ) -> Result<Vec<Color>, GenerationError>;
}

/// Validate a collaborator's hex-string palette reply.
///
/// Every entry must parse as a hex color and the list must be non-empty.
///
/// # Errors
///
/// Returns `GenerationError::InvalidResponse` with the offending entry or an
/// empty-palette message.
pub fn parse_hex_palette(entries: &[String]) -> Result<Vec<Color>, GenerationError> {
    if entries.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "Palette is empty".to_string(),
        ));
    }

    entries
        .iter()
        .map(|s| {
            Color::from_hex(s).map_err(|e: ColorParseError| {
                GenerationError::InvalidResponse(e.to_string())
            })
        })
        .collect()
}

/// Derive a reduced palette from sampled colors.
///
/// Collects the distinct colors in first-encountered order. If there are at
/// most `color_count` of them, that distinct set is the palette. Otherwise
/// the distinct colors are sorted ascending by luminance and picked at stride
/// `floor(distinct / color_count)` starting at index 0.
///
/// The result is empty only for empty input, and may contain fewer than
/// `color_count` entries when the source has few distinct colors.
pub fn build_palette(samples: impl IntoIterator<Item = Color>, color_count: usize) -> Vec<Color> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for color in samples {
        if seen.insert(color) {
            distinct.push(color);
        }
    }

    if distinct.len() <= color_count {
        return distinct;
    }

    distinct.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));

    let step = distinct.len() / color_count;
    (0..color_count).map(|i| distinct[i * step]).collect()
}

/// Resolve the palette for a pipeline run.
///
/// A non-empty custom palette is used verbatim; otherwise the builder runs
/// over the grid samples.
pub fn resolve_palette(
    custom: Option<&[Color]>,
    samples: impl IntoIterator<Item = Color>,
    color_count: usize,
) -> Vec<Color> {
    match custom {
        Some(palette) if !palette.is_empty() => palette.to_vec(),
        _ => build_palette(samples, color_count),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn color_strategy() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b))
    }

    proptest! {
        /// Property: the builder never returns more colors than requested
        /// (for a non-zero request) and never invents colors.
        #[test]
        fn prop_palette_bounded_and_sampled(
            samples in prop::collection::vec(color_strategy(), 0..200),
            color_count in 1usize..=32,
        ) {
            let palette = build_palette(samples.clone(), color_count);

            prop_assert!(palette.len() <= color_count);
            for entry in &palette {
                prop_assert!(samples.contains(entry));
            }
        }

        /// Property: when the distinct count fits, the palette is exactly the
        /// distinct set.
        #[test]
        fn prop_distinct_set_preserved(
            samples in prop::collection::vec(color_strategy(), 1..60),
        ) {
            let distinct: Vec<Color> = {
                let mut seen = std::collections::HashSet::new();
                samples.iter().copied().filter(|c| seen.insert(*c)).collect()
            };
            let palette = build_palette(samples, distinct.len());
            prop_assert_eq!(palette, distinct);
        }
    }
}
