//! Named color palette extraction.
//!
//! ```text
//! raster ──▶ opaque pixels ──▶ k-means (≤ max_colors) ──▶ vibrancy targets ──▶ Palette
//! ```
//!
//! Candidate colors come from `kmeans_colors` clustering in CIE Lab; the
//! selector classifies them in HSL (via the `palette` crate) against six
//! luminance/saturation targets and assigns one swatch to each
//! [`SwatchName`].
//!
//! Every name is always present in the result. A target with no candidate in
//! its window falls back to the dominant swatch, so a solid-color image maps
//! all six names to that one color.

mod quantize;
mod vibrancy;

use image::{DynamicImage, Rgb};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

/// Accepted range for the number of quantized candidate colors.
pub const COLOR_COUNT_RANGE: RangeInclusive<usize> = 2..=256;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Image has no opaque pixels")]
    Empty,
    #[error("Color count {0} out of range {min}..={max}", min = COLOR_COUNT_RANGE.start(), max = COLOR_COUNT_RANGE.end())]
    ColorCount(usize),
}

/// A representative color and how many pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swatch {
    pub rgb: Rgb<u8>,
    pub population: u32,
}

impl Swatch {
    /// CSS hex notation, e.g. `#1a2b3c`.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Semantic swatch names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SwatchName {
    Vibrant,
    LightVibrant,
    DarkVibrant,
    Muted,
    LightMuted,
    DarkMuted,
}

impl SwatchName {
    pub const ALL: [SwatchName; 6] = [
        SwatchName::Vibrant,
        SwatchName::LightVibrant,
        SwatchName::DarkVibrant,
        SwatchName::Muted,
        SwatchName::LightMuted,
        SwatchName::DarkMuted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SwatchName::Vibrant => "Vibrant",
            SwatchName::LightVibrant => "LightVibrant",
            SwatchName::DarkVibrant => "DarkVibrant",
            SwatchName::Muted => "Muted",
            SwatchName::LightMuted => "LightMuted",
            SwatchName::DarkMuted => "DarkMuted",
        }
    }
}

impl fmt::Display for SwatchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The extracted palette: one swatch per [`SwatchName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: BTreeMap<SwatchName, Swatch>,
}

impl Palette {
    pub fn get(&self, name: SwatchName) -> Option<&Swatch> {
        self.swatches.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SwatchName, &Swatch)> {
        self.swatches.iter().map(|(name, swatch)| (*name, swatch))
    }

    /// Swatch name → `#rrggbb`, the shape written to JSON.
    pub fn to_hex_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, swatch)| (name.to_string(), swatch.hex()))
            .collect()
    }
}

/// Extract a named palette from up to `max_colors` quantized colors.
pub fn extract(raster: &DynamicImage, max_colors: usize) -> Result<Palette, PaletteError> {
    if !COLOR_COUNT_RANGE.contains(&max_colors) {
        return Err(PaletteError::ColorCount(max_colors));
    }
    let pixels = quantize::opaque_pixels(raster);
    if pixels.is_empty() {
        return Err(PaletteError::Empty);
    }
    let candidates = quantize::cluster(&pixels, max_colors);
    debug!(candidates = candidates.len(), "quantized palette");
    Ok(Palette {
        swatches: vibrancy::select(&candidates),
    })
}
