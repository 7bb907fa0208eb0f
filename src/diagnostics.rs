//! Visual diagnostics rendered from a delta map
//!
//! Both renderings are pure functions of the map (plus the mask threshold):
//! a grayscale heatmap scaled against the 99.5th-percentile cap, and a binary
//! exceedance mask. Each is encoded as a grayscale PNG and base64'd for
//! embedding in the report.

use crate::delta_e::percentile;
use crate::error::{Result, SoftproofError};
use crate::types::DeltaMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::GrayImage;
use std::io::Cursor;

/// Render the delta map as a base64-encoded grayscale PNG heatmap
///
/// The scale cap is the 99.5th percentile of the map, with a 1.0 fallback
/// when the map is entirely zero, so a handful of outliers cannot wash out
/// the rendering. Values are scaled by `255 / cap`, clipped to `[0, 255]` and
/// rounded.
///
/// # Errors
///
/// Returns [`SoftproofError::Processing`] when PNG encoding fails.
pub fn render_heatmap(map: &DeltaMap) -> Result<String> {
    let mut sorted: Vec<f32> = map.iter().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut cap = percentile(&sorted, 99.5);
    if cap <= 0.0 {
        cap = 1.0;
    }
    let scale = 255.0 / cap;

    let pixels: Vec<u8> = map
        .iter()
        .map(|&v| (f64::from(v) * scale).clamp(0.0, 255.0).round() as u8)
        .collect();
    encode_gray_png(map, pixels)
}

/// Render the binary exceedance mask as a base64-encoded grayscale PNG
///
/// A pixel is 255 where its delta strictly exceeds `threshold`, 0 otherwise.
///
/// # Errors
///
/// Returns [`SoftproofError::Processing`] when PNG encoding fails.
pub fn render_mask(map: &DeltaMap, threshold: f64) -> Result<String> {
    let pixels: Vec<u8> = map
        .iter()
        .map(|&v| if f64::from(v) > threshold { 255 } else { 0 })
        .collect();
    encode_gray_png(map, pixels)
}

fn encode_gray_png(map: &DeltaMap, pixels: Vec<u8>) -> Result<String> {
    let (height, width) = map.dim();
    let gray = GrayImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| SoftproofError::processing("grayscale buffer does not match map shape"))?;

    let mut bytes = Vec::new();
    gray.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| SoftproofError::processing(format!("PNG encoding failed: {e}")))?;
    Ok(STANDARD.encode(bytes))
}
