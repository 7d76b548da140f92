//! Output types shared by the library and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a front-end needs to render a placeholder for one image.
///
/// Serialized with camelCase keys:
///
/// ```json
/// {
///   "height": 600,
///   "width": 800,
///   "previewSrc": "data:image/png;base64,...",
///   "previewEnhancedSrc": "data:image/png;base64,...",
///   "aspectRatio": 0.75,
///   "colorPalette": { "DarkMuted": "#282828", "Vibrant": "#ff0000" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub height: u32,
    pub width: u32,
    /// 3×3 preview as a data URI
    pub preview_src: String,
    /// 12×12 preview as a data URI
    pub preview_enhanced_src: String,
    /// `height / width`, truncated to 2 decimals
    pub aspect_ratio: f64,
    /// Swatch name → `#rrggbb`
    pub color_palette: BTreeMap<String, String>,
}
