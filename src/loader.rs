//! Image loading and working-size reduction
//!
//! The loader forces every input to 3-channel 8-bit RGB; the resizer bounds
//! the cost of the later per-pixel stages by capping the long edge of the
//! working image.

use crate::error::{Result, SoftproofError};
use image::RgbImage;
use log::debug;
use std::path::Path;

/// Decode an image file into an 8-bit RGB raster
///
/// Source format and bit depth are normalized away: everything becomes
/// 3-channel RGB8.
///
/// # Errors
///
/// Returns [`SoftproofError::Decode`] when the file cannot be read or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| {
        SoftproofError::decode(format!("{}: {}", path.display(), e))
    })?;
    debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgb8())
}

/// Downscale so the long edge does not exceed `max_size`
///
/// `max_size <= 0` disables resizing. Images already within the bound are
/// returned unchanged; otherwise the image is scaled uniformly, preserving
/// aspect ratio, so the long edge equals `max_size` exactly.
#[must_use]
pub fn resize_to_bound(image: RgbImage, max_size: i32) -> RgbImage {
    if max_size <= 0 {
        return image;
    }
    let bound = max_size as u32;
    let (width, height) = image.dimensions();
    let long_edge = width.max(height);
    if long_edge <= bound {
        return image;
    }

    let scale = f64::from(bound) / f64::from(long_edge);
    let new_width = ((f64::from(width) * scale).round() as u32).max(1);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);
    debug!("resizing working image {width}x{height} -> {new_width}x{new_height}");

    image::imageops::resize(
        &image,
        new_width,
        new_height,
        image::imageops::FilterType::Triangle,
    )
}
