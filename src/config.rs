//! Tool configuration module.
//!
//! Handles loading, validating, and merging an optional `lqip.toml`. Stock
//! defaults reproduce the classic placeholder output (3×3 and 12×12 previews,
//! 32 palette candidates), so the file is only needed to tune things.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [preview]
//! basic = [3, 3]            # Small preview [width, height]
//! enhanced = [12, 12]       # Enhanced preview [width, height]
//! jpeg_quality = 75         # Quality for JPEG previews (1-100)
//!
//! [palette]
//! max_colors = 32           # Quantized candidates for swatch selection (2-256)
//!
//! [output]
//! wrap_width = 120          # Column at which data URIs wrap in the table view
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::palette::COLOR_COUNT_RANGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LqipConfig {
    /// Preview sizes and encoding quality.
    pub preview: PreviewConfig,
    /// Palette extraction settings.
    pub palette: PaletteConfig,
    /// Table rendering settings.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl LqipConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("preview.basic", self.preview.basic),
            ("preview.enhanced", self.preview.enhanced),
        ];
        for (key, [w, h]) in sizes {
            if w == 0 || h == 0 {
                return Err(ConfigError::Validation(format!(
                    "{key} values must be non-zero"
                )));
            }
        }
        if !(1..=100).contains(&self.preview.jpeg_quality) {
            return Err(ConfigError::Validation(
                "preview.jpeg_quality must be 1-100".into(),
            ));
        }
        if !COLOR_COUNT_RANGE.contains(&self.palette.max_colors) {
            return Err(ConfigError::Validation(format!(
                "palette.max_colors must be {}-{}",
                COLOR_COUNT_RANGE.start(),
                COLOR_COUNT_RANGE.end()
            )));
        }
        Ok(())
    }
}

/// Preview generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Small preview as `[width, height]`.
    pub basic: [u32; 2],
    /// Enhanced preview as `[width, height]`.
    pub enhanced: [u32; 2],
    /// Encoding quality for JPEG previews.
    pub jpeg_quality: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            basic: [3, 3],
            enhanced: [12, 12],
            jpeg_quality: 75,
        }
    }
}

/// Palette extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Number of quantized candidate colors the swatches are chosen from.
    pub max_colors: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { max_colors: 32 }
    }
}

/// Table rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Data URIs are hard-wrapped at this column. `0` disables wrapping.
    pub wrap_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { wrap_width: 120 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of worker threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(LqipConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<LqipConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LqipConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file path.
///
/// Unlike a discovered config, a path given on the command line must exist.
pub fn load_config(path: &Path) -> Result<LqipConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `lqip.toml` with all keys and explanations.
///
/// Used by the `--gen-config` CLI flag.
pub fn stock_config_toml() -> &'static str {
    r##"# lqip configuration
# ==================
#
# Every key is optional. Values shown are the built-in defaults.

[preview]
# Size of the small preview as [width, height]. The image is resized to
# exactly this size; its aspect ratio is not preserved.
basic = [3, 3]

# Size of the enhanced preview as [width, height].
enhanced = [12, 12]

# Encoding quality (1-100) used when the source is a JPEG.
# PNG and GIF previews are lossless and ignore it.
jpeg_quality = 75

[palette]
# Number of quantized colors the named swatches are chosen from (2-256).
max_colors = 32

[output]
# Column at which data URIs wrap in the table view. 0 disables wrapping.
wrap_width = 120

[processing]
# Maximum number of worker threads. Omit to use every CPU core.
# max_processes = 4
"##
}
