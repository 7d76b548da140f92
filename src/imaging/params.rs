//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what previews to create) and the [`backend`](super::backend)
//! (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`PreviewSize`]: Exact target dimensions of a preview raster.
//! - [`EncodeParams`]: Output format plus quality for a single encode.

use image::ImageFormat;

/// Quality setting for lossy image encoding (1-100).
///
/// Only JPEG previews are lossy; PNG and GIF ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Exact dimensions of a preview raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl PreviewSize {
    /// The tiny 3×3 preview.
    pub const BASIC: PreviewSize = PreviewSize {
        width: 3,
        height: 3,
    };

    /// The slightly larger 12×12 preview.
    pub const ENHANCED: PreviewSize = PreviewSize {
        width: 12,
        height: 12,
    };
}

impl From<[u32; 2]> for PreviewSize {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

/// Parameters for a single encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub format: ImageFormat,
    pub quality: Quality,
}
