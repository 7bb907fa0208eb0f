//! Per-pixel colorimetric difference and its aggregation
//!
//! CIEDE2000 comes from `palette`; this module owns the map construction and
//! the summary statistics, including the interpolated percentile semantics
//! the rank score depends on.

use crate::error::{Result, SoftproofError};
use crate::types::{DeltaMap, LabImage};
use palette::color_difference::Ciede2000;
use serde::Serialize;

/// Summary statistics over a [`DeltaMap`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaEStats {
    /// Arithmetic mean over all pixels
    pub mean_de: f64,
    /// 95th percentile (linear interpolation between order statistics)
    pub p95_de: f64,
    /// Maximum over all pixels
    pub max_de: f64,
    /// Percentage of pixels with ΔE strictly greater than t1
    pub pct_de_gt_t1: f64,
    /// Percentage of pixels with ΔE strictly greater than t2
    pub pct_de_gt_t2: f64,
}

/// Compute the per-pixel ΔE2000 map between two Lab images
///
/// # Errors
///
/// Returns [`SoftproofError::Processing`] when the shapes differ (there is no
/// implicit resampling) or the images are empty.
pub fn delta_e_map(original: &LabImage, proof: &LabImage) -> Result<DeltaMap> {
    if original.width() != proof.width() || original.height() != proof.height() {
        return Err(SoftproofError::processing(format!(
            "Lab image shapes differ: {}x{} vs {}x{}",
            original.width(),
            original.height(),
            proof.width(),
            proof.height()
        )));
    }
    if original.pixels().is_empty() {
        return Err(SoftproofError::processing("empty working image"));
    }

    let values: Vec<f32> = original
        .pixels()
        .iter()
        .zip(proof.pixels())
        .map(|(&a, &b)| a.difference(b))
        .collect();

    DeltaMap::from_shape_vec(
        (original.height() as usize, original.width() as usize),
        values,
    )
    .map_err(|e| SoftproofError::processing(format!("delta map shape: {e}")))
}

/// Aggregate a delta map into [`DeltaEStats`]
///
/// Threshold comparisons are strict (`>`); `t1 > t2` is accepted as supplied.
#[must_use]
pub fn summarize(map: &DeltaMap, t1: f64, t2: f64) -> DeltaEStats {
    let n = map.len();
    let mut sorted: Vec<f32> = map.iter().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean_de = map.iter().map(|&v| f64::from(v)).sum::<f64>() / n as f64;
    let max_de = sorted.last().map_or(0.0, |&v| f64::from(v));
    let p95_de = percentile(&sorted, 95.0);

    let gt_t1 = map.iter().filter(|&&v| f64::from(v) > t1).count();
    let gt_t2 = map.iter().filter(|&&v| f64::from(v) > t2).count();

    DeltaEStats {
        mean_de,
        p95_de,
        max_de,
        pct_de_gt_t1: gt_t1 as f64 / n as f64 * 100.0,
        pct_de_gt_t2: gt_t2 as f64 / n as f64 * 100.0,
    }
}

/// Percentile with linear interpolation between order statistics
///
/// `sorted` must be ascending. Empty input yields 0.
pub(crate) fn percentile(sorted: &[f32], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let weight = rank - lo as f64;
    f64::from(sorted[lo]) * (1.0 - weight) + f64::from(sorted[hi]) * weight
}
