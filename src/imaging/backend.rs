//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: decode, resize, and encode.
//!
//! The production implementation,
//! [`RustBackend`](super::rust_backend::RustBackend), is pure Rust built on the
//! `image` crate. Tests swap in a recording mock so facade logic can be
//! exercised without touching real codecs.

use super::params::{EncodeParams, PreviewSize};
use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Where the encoded image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}

/// Raster dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded raster plus the container format it was read from.
///
/// The format is what previews are re-encoded in, so a PNG input yields PNG
/// previews and a JPEG input yields JPEG previews.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub raster: DynamicImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.raster.width(),
            height: self.raster.height(),
        }
    }
}

/// Lowercase short name of a format, as used in error messages.
pub fn format_name(format: ImageFormat) -> String {
    format!("{format:?}").to_lowercase()
}

/// Trait for image codec backends.
///
/// `Sync` is required because the derived values (palette and both previews)
/// are computed concurrently over the same decoded raster.
pub trait ImageBackend: Sync {
    /// Decode the source, sniffing the container format from its content.
    fn decode(&self, source: &ImageSource) -> Result<DecodedImage, BackendError>;

    /// Resize to exactly `size`, ignoring the source aspect ratio.
    fn resize(&self, raster: &DynamicImage, size: PreviewSize) -> DynamicImage;

    /// Encode the raster in the requested format.
    fn encode(&self, raster: &DynamicImage, params: &EncodeParams)
    -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::rust_backend::PREVIEW_FORMATS;
    use std::sync::Mutex;

    /// Mock backend that records operations and hands back canned results.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon::join.
    pub struct MockBackend {
        pub decoded: Mutex<Option<DecodedImage>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Resize { width: u32, height: u32 },
        Encode { format: ImageFormat, quality: u32 },
    }

    impl MockBackend {
        /// A backend whose decode always fails.
        pub fn failing() -> Self {
            Self {
                decoded: Mutex::new(None),
                operations: Mutex::new(Vec::new()),
            }
        }

        /// A backend that decodes every source to the given raster and format.
        pub fn with_image(raster: DynamicImage, format: ImageFormat) -> Self {
            Self {
                decoded: Mutex::new(Some(DecodedImage { raster, format })),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn decode_count(&self) -> usize {
            self.get_operations()
                .iter()
                .filter(|op| matches!(op, RecordedOp::Decode(_)))
                .count()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, source: &ImageSource) -> Result<DecodedImage, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(source.to_string()));

            self.decoded
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| BackendError::Decode("No mock image".to_string()))
        }

        fn resize(&self, _raster: &DynamicImage, size: PreviewSize) -> DynamicImage {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                width: size.width,
                height: size.height,
            });
            DynamicImage::new_rgb8(size.width, size.height)
        }

        fn encode(
            &self,
            _raster: &DynamicImage,
            params: &EncodeParams,
        ) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                format: params.format,
                quality: params.quality.value(),
            });
            if PREVIEW_FORMATS.contains(&params.format) {
                Ok(b"mock".to_vec())
            } else {
                Err(BackendError::UnsupportedFormat(format_name(params.format)))
            }
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_image(DynamicImage::new_rgb8(8, 4), ImageFormat::Png);

        let decoded = backend
            .decode(&ImageSource::Path("/test/image.png".into()))
            .unwrap();
        assert_eq!(
            decoded.dimensions(),
            Dimensions {
                width: 8,
                height: 4
            }
        );

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_failing_decode_errors() {
        let backend = MockBackend::failing();
        let result = backend.decode(&ImageSource::Bytes(vec![1, 2, 3]));
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn source_display() {
        assert_eq!(
            ImageSource::Path("/a/b.png".into()).to_string(),
            "/a/b.png"
        );
        assert_eq!(
            ImageSource::Bytes(vec![0; 12]).to_string(),
            "<12 bytes in memory>"
        );
    }

    #[test]
    fn format_names_are_lowercase() {
        assert_eq!(format_name(ImageFormat::Bmp), "bmp");
        assert_eq!(format_name(ImageFormat::WebP), "webp");
        assert_eq!(format_name(ImageFormat::Jpeg), "jpeg");
    }
}
