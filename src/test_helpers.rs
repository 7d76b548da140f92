//! Shared test utilities for the lqip test suite.
//!
//! Fixtures are synthesized with the `image` encoders rather than checked in,
//! so every test knows the exact dimensions and colors it is working with.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("fixture.png");
//! write_image(&path, &gradient_image(800, 600), ImageFormat::Png);
//! ```

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// An RGB gradient: red follows x, green follows y, blue is fixed.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// A single-color RGB image.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// Encode `img` to `path` in `format`. Panics on failure.
///
/// JPEG gets RGB, everything else RGBA, so each encoder sees a color type it
/// accepts.
pub fn write_image(path: &Path, img: &DynamicImage, format: ImageFormat) {
    let converted = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    };
    converted
        .save_with_format(path, format)
        .unwrap_or_else(|e| panic!("failed to write {format:?} fixture {}: {e}", path.display()));
}
