//! The [`Image`] facade: decode once, derive everything a placeholder needs.
//!
//! ```text
//! Image::new(path) ──first access──▶ backend.decode ──▶ OnceLock<DecodedImage>
//!                                                          │
//!            ┌──────────────────┬───────────────────────────┼──────────────────┐
//!        dimensions       aspect_ratio               preview_src(3×3)   color_palette
//!                                                  preview_enhanced(12×12)
//! ```
//!
//! The decoded raster is immutable after the first access. [`Image::summarize`]
//! computes the palette and both previews concurrently with `rayon::join`, since
//! all three only read the shared raster.

use crate::config::LqipConfig;
use crate::imaging::{
    BackendError, DecodedImage, ImageBackend, ImageSource, PreviewSize, Quality, RustBackend,
    aspect_ratio, preview_src,
};
use crate::palette::{self, Palette, PaletteError};
use crate::types::ImageData;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LqipError {
    #[error("Cannot obtain image config from {source_name}: {error}")]
    Decode {
        source_name: String,
        #[source]
        error: BackendError,
    },
    #[error("Cannot read image input: {0}")]
    Read(#[from] std::io::Error),
    #[error("Cannot convert resized image to base64 string: {0}")]
    Preview(BackendError),
    #[error("Cannot obtain color palette from the image: {0}")]
    Palette(#[from] PaletteError),
}

/// Knobs for preview and palette generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LqipOptions {
    pub basic: PreviewSize,
    pub enhanced: PreviewSize,
    pub quality: Quality,
    pub max_colors: usize,
}

impl Default for LqipOptions {
    fn default() -> Self {
        Self {
            basic: PreviewSize::BASIC,
            enhanced: PreviewSize::ENHANCED,
            quality: Quality::default(),
            max_colors: 32,
        }
    }
}

impl From<&LqipConfig> for LqipOptions {
    fn from(config: &LqipConfig) -> Self {
        Self {
            basic: config.preview.basic.into(),
            enhanced: config.preview.enhanced.into(),
            quality: Quality::new(config.preview.jpeg_quality),
            max_colors: config.palette.max_colors,
        }
    }
}

/// The public placeholder operations.
pub trait ImageOps {
    /// `(height, width)` of the decoded raster.
    fn dimensions(&self) -> Result<(u32, u32), LqipError>;

    /// `height / width`, truncated to 2 decimals.
    fn aspect_ratio(&self) -> Result<f64, LqipError>;

    /// The small preview as a base64 data URI.
    fn preview_src(&self) -> Result<String, LqipError>;

    /// The enhanced preview as a base64 data URI.
    fn preview_enhanced_src(&self) -> Result<String, LqipError>;

    /// Named swatches extracted from the image.
    fn color_palette(&self) -> Result<Palette, LqipError>;
}

/// An image file (or buffer) and its lazily decoded raster.
pub struct Image<B: ImageBackend = RustBackend> {
    source: ImageSource,
    backend: B,
    options: LqipOptions,
    decoded: OnceLock<DecodedImage>,
}

impl Image<RustBackend> {
    /// Lazily decoded image at `path`. Nothing is read until first access.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_backend(ImageSource::Path(path.as_ref().to_path_buf()), RustBackend::new())
    }

    /// Open and decode `path` immediately, failing fast on unreadable input.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LqipError> {
        let image = Self::new(path);
        image.decoded()?;
        Ok(image)
    }

    /// Image held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::with_backend(ImageSource::Bytes(bytes), RustBackend::new())
    }

    /// Read an open handle to the end and keep its bytes.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, LqipError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl<B: ImageBackend> Image<B> {
    pub fn with_backend(source: ImageSource, backend: B) -> Self {
        Self {
            source,
            backend,
            options: LqipOptions::default(),
            decoded: OnceLock::new(),
        }
    }

    pub fn with_options(mut self, options: LqipOptions) -> Self {
        self.options = options;
        self
    }

    /// The decoded raster, decoding on first call.
    ///
    /// Concurrent first calls may both decode; only one result is kept.
    fn decoded(&self) -> Result<&DecodedImage, LqipError> {
        if let Some(decoded) = self.decoded.get() {
            return Ok(decoded);
        }
        let decoded = self
            .backend
            .decode(&self.source)
            .map_err(|error| LqipError::Decode {
                source_name: self.source.to_string(),
                error,
            })?;
        Ok(self.decoded.get_or_init(|| decoded))
    }

    fn preview(&self, size: PreviewSize) -> Result<String, LqipError> {
        let decoded = self.decoded()?;
        preview_src(&self.backend, decoded, size, self.options.quality).map_err(LqipError::Preview)
    }

    /// Compute every field of [`ImageData`].
    ///
    /// Decodes first, then runs the palette and both previews in parallel and
    /// joins them. The first error wins; there are no partial results.
    pub fn summarize(&self) -> Result<ImageData, LqipError> {
        let (height, width) = self.dimensions()?;
        let aspect_ratio = self.aspect_ratio()?;

        let (palette, (preview, enhanced)) = rayon::join(
            || self.color_palette(),
            || {
                rayon::join(
                    || self.preview_src(),
                    || self.preview_enhanced_src(),
                )
            },
        );

        let data = ImageData {
            height,
            width,
            preview_src: preview?,
            preview_enhanced_src: enhanced?,
            aspect_ratio,
            color_palette: palette?.to_hex_map(),
        };
        debug!(source = %self.source, height, width, "summarized image");
        Ok(data)
    }
}

impl<B: ImageBackend> ImageOps for Image<B> {
    fn dimensions(&self) -> Result<(u32, u32), LqipError> {
        let dims = self.decoded()?.dimensions();
        Ok((dims.height, dims.width))
    }

    fn aspect_ratio(&self) -> Result<f64, LqipError> {
        let (height, width) = self.dimensions()?;
        Ok(aspect_ratio(height, width))
    }

    fn preview_src(&self) -> Result<String, LqipError> {
        self.preview(self.options.basic)
    }

    fn preview_enhanced_src(&self) -> Result<String, LqipError> {
        self.preview(self.options.enhanced)
    }

    fn color_palette(&self) -> Result<Palette, LqipError> {
        let decoded = self.decoded()?;
        Ok(palette::extract(&decoded.raster, self.options.max_colors)?)
    }
}
