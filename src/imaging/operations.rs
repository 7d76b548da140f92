//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take a
//! decoded image and preview settings, compute parameters, and call the
//! backend.

use super::backend::{BackendError, DecodedImage, ImageBackend};
use super::params::{EncodeParams, PreviewSize, Quality};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use tracing::debug;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Wrap encoded bytes as a `data:` URI using the format's MIME type.
///
/// ```text
/// data:image/png;base64,iVBORw0KGgo...
/// ```
pub fn data_uri(format: ImageFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes))
}

/// Resize the decoded raster to `size`, re-encode it in the source format,
/// and return it as a base64 data URI.
///
/// Fails with [`BackendError::UnsupportedFormat`] when the source format has
/// no preview encoder (anything other than PNG, GIF or JPEG).
pub fn preview_src(
    backend: &impl ImageBackend,
    decoded: &DecodedImage,
    size: PreviewSize,
    quality: Quality,
) -> Result<String> {
    let resized = backend.resize(&decoded.raster, size);
    let bytes = backend.encode(
        &resized,
        &EncodeParams {
            format: decoded.format,
            quality,
        },
    )?;
    debug!(
        width = size.width,
        height = size.height,
        bytes = bytes.len(),
        "encoded preview"
    );
    Ok(data_uri(decoded.format, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use image::DynamicImage;

    fn decoded(format: ImageFormat) -> DecodedImage {
        DecodedImage {
            raster: DynamicImage::new_rgb8(40, 30),
            format,
        }
    }

    #[test]
    fn data_uri_uses_mime_type_and_standard_base64() {
        assert_eq!(data_uri(ImageFormat::Png, b"hello"), "data:image/png;base64,aGVsbG8=");
        assert_eq!(data_uri(ImageFormat::Jpeg, b"hi"), "data:image/jpeg;base64,aGk=");
        assert_eq!(data_uri(ImageFormat::Gif, b""), "data:image/gif;base64,");
    }

    #[test]
    fn preview_resizes_then_encodes_in_source_format() {
        let backend = MockBackend::failing();
        let src = preview_src(
            &backend,
            &decoded(ImageFormat::Jpeg),
            PreviewSize::ENHANCED,
            Quality::new(60),
        )
        .unwrap();

        assert_eq!(src, data_uri(ImageFormat::Jpeg, b"mock"));
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Resize {
                    width: 12,
                    height: 12
                },
                RecordedOp::Encode {
                    format: ImageFormat::Jpeg,
                    quality: 60
                },
            ]
        );
    }

    #[test]
    fn preview_of_unencodable_format_errors() {
        let backend = MockBackend::failing();
        let result = preview_src(
            &backend,
            &decoded(ImageFormat::Bmp),
            PreviewSize::BASIC,
            Quality::default(),
        );
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(f)) if f == "bmp"));
    }
}
