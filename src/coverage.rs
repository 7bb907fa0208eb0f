//! Total area/ink coverage estimation
//!
//! Works on the device-space proof with any channel count. The estimator is
//! best-effort by contract: anything it cannot make sense of degrades to
//! [`Coverage::Unsupported`] and the analysis continues.

use crate::delta_e::percentile;
use crate::types::DeviceImage;
use log::warn;

/// Coverage estimation outcome, selected explicitly by the estimator
#[derive(Debug, Clone, PartialEq)]
pub enum Coverage {
    /// Estimation succeeded
    Supported(CoverageStats),
    /// Channel layout or sample values could not be interpreted
    Unsupported,
}

/// Coverage statistics in percent of total colorant
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageStats {
    /// Echoed limit, when one was supplied
    pub limit: Option<f64>,
    /// 95th-percentile per-pixel coverage
    pub p95: f64,
    /// Maximum per-pixel coverage
    pub max: f64,
    /// Percentage of pixels strictly above the limit, when one was supplied
    pub pct_gt_limit: Option<f64>,
}

/// Estimate total coverage of the device-space proof
///
/// The sample range is inferred from the maximum observed value. The branch
/// thresholds (1.5 and 150.0) and their order are a behavioural invariant of
/// the estimator; they are deliberately heuristic and format-sensitive:
///
/// - max <= 1.5: samples are already normalized to `[0, 1]`
/// - max > 150.0: samples are 0-255
/// - otherwise: samples are already a 0-100 percent range
pub fn estimate(proof: &DeviceImage, limit: Option<f64>) -> Coverage {
    match coverage_stats(&proof.samples_f32(), proof.channels(), limit) {
        Some(stats) => Coverage::Supported(stats),
        None => {
            warn!(
                "coverage unsupported for {} channel device image",
                proof.channels()
            );
            Coverage::Unsupported
        },
    }
}

fn coverage_stats(samples: &[f32], channels: usize, limit: Option<f64>) -> Option<CoverageStats> {
    if channels == 0 || samples.is_empty() || samples.len() % channels != 0 {
        return None;
    }

    let max_sample = samples.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(f64::from(v)));
    if !max_sample.is_finite() {
        return None;
    }
    let divisor = if max_sample <= 1.5 {
        1.0
    } else if max_sample > 150.0 {
        255.0
    } else {
        100.0
    };

    let mut per_pixel: Vec<f32> = samples
        .chunks_exact(channels)
        .map(|px| {
            let sum: f64 = px.iter().map(|&v| f64::from(v)).sum();
            (sum / divisor * 100.0) as f32
        })
        .collect();
    if per_pixel.iter().any(|v| !v.is_finite()) {
        return None;
    }
    per_pixel.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let p95 = percentile(&per_pixel, 95.0);
    let max = per_pixel.last().map_or(0.0, |&v| f64::from(v));
    let pct_gt_limit = limit.map(|lim| {
        let over = per_pixel.iter().filter(|&&v| f64::from(v) > lim).count();
        over as f64 / per_pixel.len() as f64 * 100.0
    });

    Some(CoverageStats {
        limit,
        p95,
        max,
        pct_gt_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceImage, SampleKind};

    fn device_f32(width: u32, height: u32, channels: usize, values: &[f32]) -> DeviceImage {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        DeviceImage::new(width, height, channels, SampleKind::F32, bytes).unwrap()
    }

    fn stats(coverage: Coverage) -> CoverageStats {
        match coverage {
            Coverage::Supported(stats) => stats,
            Coverage::Unsupported => panic!("expected supported coverage"),
        }
    }

    #[test]
    fn test_normalized_range_branch() {
        // max 1.0 -> divisor 1.0; a (0.5, 0.5) pixel covers 100%
        let proof = device_f32(2, 1, 2, &[0.5, 0.5, 1.0, 0.0]);
        let stats = stats(estimate(&proof, None));
        assert!((stats.max - 100.0).abs() < 1e-4, "max = {}", stats.max);
    }

    #[test]
    fn test_percent_range_branch() {
        // max 50 -> divisor 100.0; (50, 50) covers 100%
        let proof = device_f32(2, 1, 2, &[50.0, 50.0, 10.0, 10.0]);
        let stats = stats(estimate(&proof, None));
        assert!((stats.max - 100.0).abs() < 1e-4, "max = {}", stats.max);
    }

    #[test]
    fn test_eight_bit_range_branch() {
        // max 200 -> divisor 255.0; (200, 55) covers 100%
        let proof = device_f32(2, 1, 2, &[200.0, 55.0, 0.0, 0.0]);
        let stats = stats(estimate(&proof, None));
        assert!((stats.max - 100.0).abs() < 1e-4, "max = {}", stats.max);
    }

    #[test]
    fn test_branch_boundaries() {
        // Exactly 1.5 stays in the normalized branch
        let proof = device_f32(1, 1, 1, &[1.5]);
        let stats = stats(estimate(&proof, None));
        assert!((stats.max - 150.0).abs() < 1e-4);

        // Exactly 150 stays in the percent branch
        let proof = device_f32(1, 1, 1, &[150.0]);
        let stats = self::stats(estimate(&proof, None));
        assert!((stats.max - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_limit_exceedance_is_strict() {
        // CMYK-ish u8 pixels: totals 400%, 300%, 240% of 255-scale
        let proof = device_f32(
            3,
            1,
            4,
            &[
                255.0, 255.0, 255.0, 255.0, // 400%
                255.0, 255.0, 255.0, 0.0, // 300%
                255.0, 255.0, 102.0, 0.0, // 240%
            ],
        );
        let stats = stats(estimate(&proof, Some(300.0)));
        assert_eq!(stats.limit, Some(300.0));
        // Only the 400% pixel strictly exceeds 300
        let pct = stats.pct_gt_limit.unwrap();
        assert!((pct - 100.0 / 3.0).abs() < 1e-4, "pct = {pct}");
    }

    #[test]
    fn test_no_limit_omits_exceedance() {
        let proof = device_f32(1, 1, 1, &[0.5]);
        let stats = stats(estimate(&proof, None));
        assert!(stats.pct_gt_limit.is_none());
    }

    #[test]
    fn test_unsupported_cases() {
        assert_eq!(coverage_stats(&[], 4, None), None);
        assert_eq!(coverage_stats(&[1.0, 2.0, 3.0], 2, None), None);
        assert_eq!(coverage_stats(&[f32::NAN], 1, None), None);
    }
}
