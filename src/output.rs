//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Table
//!
//! ```text
//! File ::: photos/dawn.png
//! +----------------------+----------------------------------+
//! | Height               | 600                              |
//! +----------------------+----------------------------------+
//! | Width                | 800                              |
//! +----------------------+----------------------------------+
//! | Aspect ratio         | 0.75                             |
//! +----------------------+----------------------------------+
//! | Color Palette        | DarkMuted - #282828              |
//! |                      | Vibrant - #ff0000                |
//! +----------------------+----------------------------------+
//! | Preview src          | data:image/png;base64,iVBORw0KGg |
//! |                      | oAAAANSUhEUgAAAAMAAAADCAIAAADZSi |
//! +----------------------+----------------------------------+
//! ```
//!
//! ## JSON
//!
//! Pretty-printed [`ImageData`], written next to the input
//! (`photos/dawn.png` → `photos/dawn.json`) unless an output path is given.
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` for testability and a `print_*`
//! wrapper writes to stdout. Format functions are pure: no I/O, no side
//! effects.

use crate::types::ImageData;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Break `text` into lines of at most `width` characters.
///
/// Surrounding whitespace is trimmed first. A width of `0` disables wrapping.
pub fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let text = text.trim();
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// One `name - #hex` line per swatch.
fn palette_lines(data: &ImageData) -> Vec<String> {
    data.color_palette
        .iter()
        .map(|(name, hex)| format!("{name} - {hex}"))
        .collect()
}

/// Rows of the table view as (label, cell lines).
fn table_rows(data: &ImageData, wrap_width: usize) -> Vec<(&'static str, Vec<String>)> {
    vec![
        ("Height", vec![data.height.to_string()]),
        ("Width", vec![data.width.to_string()]),
        ("Aspect ratio", vec![format!("{:.2}", data.aspect_ratio)]),
        ("Color Palette", palette_lines(data)),
        ("Preview src", hard_wrap(&data.preview_src, wrap_width)),
        (
            "Preview enhanced src",
            hard_wrap(&data.preview_enhanced_src, wrap_width),
        ),
    ]
}

fn border(label_width: usize, value_width: usize) -> String {
    format!(
        "+{}+{}+",
        "-".repeat(label_width + 2),
        "-".repeat(value_width + 2)
    )
}

/// Format the bordered two-column table, left aligned, with a separator line
/// between rows. Multi-line cells extend their row.
pub fn format_table(data: &ImageData, wrap_width: usize) -> Vec<String> {
    let rows = table_rows(data, wrap_width);
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .flat_map(|(_, cell)| cell.iter().map(|line| line.chars().count()))
        .max()
        .unwrap_or(0);

    let separator = border(label_width, value_width);
    let mut lines = vec![separator.clone()];
    for (label, cell) in &rows {
        let height = cell.len().max(1);
        for i in 0..height {
            let left = if i == 0 { *label } else { "" };
            let right = cell.get(i).map(String::as_str).unwrap_or("");
            lines.push(format!(
                "| {left:<label_width$} | {right:<value_width$} |"
            ));
        }
        lines.push(separator.clone());
    }
    lines
}

/// Header naming the input file, printed above the table.
pub fn format_file_header(input: &Path) -> String {
    format!("File ::: {}", input.display())
}

/// Print the table view for `input` to stdout.
pub fn print_table(input: &Path, data: &ImageData, wrap_width: usize) {
    println!("{}", format_file_header(input));
    for line in format_table(data, wrap_width) {
        println!("{}", line);
    }
}

/// Default JSON path: the input path with its extension replaced by `.json`.
///
/// Only the final extension is replaced, so dotted directory names and
/// file names survive (`v1.2/my.photo.png` → `v1.2/my.photo.json`).
pub fn default_json_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// Serialize `data` as pretty JSON (2-space indent).
pub fn to_json(data: &ImageData) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Write `data` as pretty JSON to `path`, replacing any existing file.
pub fn write_json(path: &Path, data: &ImageData) -> Result<(), OutputError> {
    std::fs::write(path, to_json(data)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample() -> ImageData {
        ImageData {
            height: 600,
            width: 800,
            preview_src: "data:image/png;base64,ABCDEFGHIJ".to_string(),
            preview_enhanced_src: "data:image/png;base64,KLMN".to_string(),
            aspect_ratio: 0.75,
            color_palette: BTreeMap::from([
                ("DarkMuted".to_string(), "#282828".to_string()),
                ("Vibrant".to_string(), "#ff0000".to_string()),
            ]),
        }
    }

    #[test]
    fn hard_wrap_splits_at_width() {
        assert_eq!(hard_wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(hard_wrap("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(hard_wrap("  abc  ", 10), vec!["abc"]);
    }

    #[test]
    fn hard_wrap_zero_width_disables_wrapping() {
        assert_eq!(hard_wrap("abcdefgh", 0), vec!["abcdefgh"]);
        assert_eq!(hard_wrap("", 5), vec![""]);
    }

    #[test]
    fn table_layout() {
        let lines = format_table(&sample(), 0);
        let border = "+----------------------+----------------------------------+";
        assert_eq!(lines[0], border);
        assert_eq!(
            lines[1],
            "| Height               | 600                              |"
        );
        assert_eq!(lines[2], border);
        assert!(lines.contains(&"| Aspect ratio         | 0.75                             |".to_string()));
        // Palette spans two lines; label only on the first
        assert!(lines.contains(&"| Color Palette        | DarkMuted - #282828              |".to_string()));
        assert!(lines.contains(&"|                      | Vibrant - #ff0000                |".to_string()));
        assert_eq!(lines.last().unwrap(), border);
        // Every line is the same width
        assert!(lines.iter().all(|l| l.len() == border.len()));
    }

    #[test]
    fn table_wraps_data_uris() {
        let lines = format_table(&sample(), 10);
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("| Preview src ") && l.contains("| data:image "))
        );
        assert!(lines.iter().any(|l| l.contains("| /png;base6 ")));
        assert!(lines.iter().any(|l| l.contains("| 4,ABCDEFGH ")));
        assert!(!lines.iter().any(|l| l.contains("ABCDEFGHIJ")));
    }

    #[test]
    fn file_header() {
        assert_eq!(
            format_file_header(Path::new("photos/dawn.png")),
            "File ::: photos/dawn.png"
        );
    }

    #[test]
    fn default_json_path_replaces_last_extension_only() {
        assert_eq!(
            default_json_path(Path::new("photos/dawn.png")),
            PathBuf::from("photos/dawn.json")
        );
        assert_eq!(
            default_json_path(Path::new("v1.2/my.photo.jpeg")),
            PathBuf::from("v1.2/my.photo.json")
        );
        assert_eq!(
            default_json_path(Path::new("noext")),
            PathBuf::from("noext.json")
        );
    }

    #[test]
    fn json_is_pretty_with_two_space_indent() {
        let json = to_json(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"height\": 600,\n  \"width\": 800,"));
        assert!(json.contains("\n  \"colorPalette\": {\n    \"DarkMuted\": \"#282828\""));
    }

    #[test]
    fn write_json_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        write_json(&path, &sample()).unwrap();

        let back: ImageData =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn write_json_to_missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing/out.json");
        assert!(matches!(
            write_json(&path, &sample()),
            Err(OutputError::Io(_))
        ));
    }
}
