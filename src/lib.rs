//! # lqip
//!
//! Low Quality Image Placeholders for progressive-loading UIs. Given an image,
//! lqip reports its dimensions and aspect ratio, a named color palette, and two
//! tiny base64 data-URI previews (3×3 and 12×12) that a front-end can inline
//! and blur while the real image loads.
//!
//! ```no_run
//! use lqip::{Image, ImageOps};
//!
//! let image = Image::open("photo.jpg")?;
//! let (height, width) = image.dimensions()?;
//! let data = image.summarize()?;
//! println!("{width}x{height} → {}", data.preview_src);
//! # Ok::<(), lqip::LqipError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`placeholder`] | The [`Image`] facade: lazy decode, accessors, concurrent summary |
//! | [`imaging`] | Codec backend (decode, Lanczos resize, encode) and data-URI building |
//! | [`palette`] | k-means candidate colors and named swatch selection |
//! | [`config`] | Optional `lqip.toml` loading, merging, and validation |
//! | [`types`] | [`ImageData`], the JSON output shape |
//! | [`output`] | Table and JSON rendering for the CLI |
//!
//! # Design Decisions
//!
//! ## Previews Keep the Source Format
//!
//! A PNG input yields PNG previews and a JPEG input yields JPEG previews, so
//! the placeholder matches what the browser will eventually show. Only PNG, GIF
//! and JPEG have preview encoders; other decodable formats (BMP, TIFF, WebP)
//! report their dimensions and palette but fail on preview generation.
//!
//! ## Exact-Size Previews
//!
//! Previews are resized to exactly 3×3 and 12×12 regardless of aspect ratio.
//! The front-end stretches them to the real box using `aspectRatio`, and the
//! blur hides the distortion.
//!
//! ## Decode Once
//!
//! The raster is decoded on first access and kept for the life of the
//! [`Image`]. Palette and previews are pure functions of that raster, which is
//! what makes running them in parallel safe.

pub mod config;
pub mod imaging;
pub mod output;
pub mod palette;
pub mod placeholder;
pub mod types;

pub use placeholder::{Image, ImageOps, LqipError, LqipOptions};
pub use types::ImageData;

#[cfg(test)]
pub(crate) mod test_helpers;
