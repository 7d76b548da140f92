//! Pure Rust image codec backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (RGB, quality from params) |
//! | Encode → GIF | `image::codecs::gif::GifEncoder` via `write_to` (RGBA) |

use super::backend::{BackendError, DecodedImage, ImageBackend, ImageSource, format_name};
use super::params::{EncodeParams, PreviewSize};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::io::{BufRead, Cursor, Seek};
use tracing::debug;

/// Formats previews can be re-encoded in.
pub const PREVIEW_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Gif, ImageFormat::Jpeg];

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Sniff the format from the leading bytes, then decode.
///
/// Content sniffing wins over the file extension, so a PNG saved as
/// `photo.jpg` still decodes and re-encodes as PNG.
fn decode_reader<R: BufRead + Seek>(reader: ImageReader<R>) -> Result<DecodedImage, BackendError> {
    let reader = reader.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| BackendError::UnsupportedFormat("unrecognized image data".to_string()))?;
    let raster = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(u) => BackendError::UnsupportedFormat(u.to_string()),
        ImageError::IoError(io) => BackendError::Io(io),
        other => BackendError::Decode(other.to_string()),
    })?;
    Ok(DecodedImage { raster, format })
}

impl ImageBackend for RustBackend {
    fn decode(&self, source: &ImageSource) -> Result<DecodedImage, BackendError> {
        let decoded = match source {
            ImageSource::Path(path) => decode_reader(ImageReader::open(path)?)?,
            ImageSource::Bytes(bytes) => decode_reader(ImageReader::new(Cursor::new(bytes)))?,
        };
        debug!(
            source = %source,
            format = %format_name(decoded.format),
            width = decoded.raster.width(),
            height = decoded.raster.height(),
            "decoded image"
        );
        Ok(decoded)
    }

    fn resize(&self, raster: &DynamicImage, size: PreviewSize) -> DynamicImage {
        raster.resize_exact(size.width, size.height, FilterType::Lanczos3)
    }

    fn encode(
        &self,
        raster: &DynamicImage,
        params: &EncodeParams,
    ) -> Result<Vec<u8>, BackendError> {
        if !PREVIEW_FORMATS.contains(&params.format) {
            return Err(BackendError::UnsupportedFormat(format_name(params.format)));
        }
        let mut buf = Vec::new();
        let result = match params.format {
            ImageFormat::Png => raster.write_with_encoder(PngEncoder::new(&mut buf)),
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel
                let quality = params.quality.value() as u8;
                DynamicImage::ImageRgb8(raster.to_rgb8())
                    .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
            }
            ImageFormat::Gif => DynamicImage::ImageRgba8(raster.to_rgba8())
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Gif),
            other => return Err(BackendError::UnsupportedFormat(format_name(other))),
        };
        result.map_err(|e| BackendError::Encode(e.to_string()))?;
        Ok(buf)
    }
}
