//! Image processing in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content-sniffed format) |
//! | **Resize** | `resize_exact` with Lanczos3 |
//! | **Encode** | PNG / GIF / JPEG encoders from `image` |
//! | **Data URI** | `base64` standard engine |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining parameters + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, DecodedImage, Dimensions, ImageBackend, ImageSource};
pub use calculations::aspect_ratio;
pub use operations::{data_uri, preview_src};
pub use params::{EncodeParams, PreviewSize, Quality};
pub use rust_backend::RustBackend;
