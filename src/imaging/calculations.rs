//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the aspect ratio `height / width`, truncated to 2 decimal places.
///
/// Truncation happens in integer space so values like 29/100 come out as
/// exactly `0.29` rather than `0.28` from a float multiply-then-truncate.
///
/// # Examples
/// ```
/// # use lqip::imaging::aspect_ratio;
/// // 100 tall, 33 wide → 3.0303… → 3.03 (truncated, not rounded)
/// assert_eq!(aspect_ratio(100, 33), 3.03);
///
/// // 2:3 → 0.666… → 0.66
/// assert_eq!(aspect_ratio(2, 3), 0.66);
/// ```
pub fn aspect_ratio(height: u32, width: u32) -> f64 {
    if width == 0 {
        return 0.0;
    }
    let hundredths = u64::from(height) * 100 / u64::from(width);
    hundredths as f64 / 100.0
}
