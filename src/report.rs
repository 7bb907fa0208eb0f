//! Rank scoring and report assembly
//!
//! Field names follow the established report wire format: camelCase for the
//! echoed settings, snake_case for the statistics and preview keys.

use crate::config::{AnalysisConfig, RankWeights, RenderingIntent};
use crate::coverage::Coverage;
use crate::delta_e::DeltaEStats;
use serde::Serialize;

/// Composite ranking score usable to compare candidate output profiles
///
/// `w_p95 * p95_de + w_mean * mean_de`, with the weights used exactly as
/// supplied (no renormalization, no sum-to-one check).
#[must_use]
pub fn rank_score(stats: &DeltaEStats, weights: RankWeights) -> f64 {
    weights.p95 * stats.p95_de + weights.mean * stats.mean_de
}

/// Metadata of the candidate output profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileInfo {
    /// Display name (file basename of the output profile)
    pub name: String,
    /// Path or identifier the profile was opened from
    pub path: String,
    /// Device channel count of the proof image
    pub channels: usize,
    /// ICC description tag text, when the profile carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Device color-space label (`RGB`, `CMYK`, ...)
    #[serde(rename = "colorSpace", skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
}

/// Settings echoed back into the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsEcho {
    pub input_profile_path: String,
    pub output_profile_path: String,
    pub rendering_intent: RenderingIntent,
    pub black_point_compensation: bool,
    pub max_size: i32,
    pub delta_e_thresholds: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tac_limit: Option<f64>,
    pub rank_weights: RankWeights,
}

impl SettingsEcho {
    /// Echo an [`AnalysisConfig`] into its report representation
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            input_profile_path: config.input_profile.to_string(),
            output_profile_path: config.output_profile.to_string(),
            rendering_intent: config.intent,
            black_point_compensation: config.black_point_compensation,
            max_size: config.max_size,
            delta_e_thresholds: [config.de_thresholds.0, config.de_thresholds.1],
            tac_limit: config.tac_limit,
            rank_weights: config.rank_weights,
        }
    }
}

/// Difference statistics plus the composite rank score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsBlock {
    #[serde(flatten)]
    pub delta_e: DeltaEStats,
    pub rank_score: f64,
}

/// Coverage block; `supported: false` carries no numeric fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacBlock {
    pub supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_gt_limit: Option<f64>,
}

impl From<Coverage> for TacBlock {
    fn from(coverage: Coverage) -> Self {
        match coverage {
            Coverage::Supported(stats) => Self {
                supported: true,
                limit: stats.limit,
                p95: Some(stats.p95),
                max: Some(stats.max),
                pct_gt_limit: stats.pct_gt_limit,
            },
            Coverage::Unsupported => Self {
                supported: false,
                limit: None,
                p95: None,
                max: None,
                pct_gt_limit: None,
            },
        }
    }
}

/// Base64-encoded PNG previews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Previews {
    pub de_heatmap_png_base64: String,
    pub mask_png_base64: String,
}

/// Complete analysis report
///
/// Immutable once assembled; serialization is the caller's business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub profile: ProfileInfo,
    pub settings: SettingsEcho,
    pub stats: StatsBlock,
    pub tac: TacBlock,
    pub previews: Previews,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::CoverageStats;

    #[test]
    fn test_rank_score_exactness() {
        let stats = DeltaEStats {
            mean_de: 2.0,
            p95_de: 5.0,
            max_de: 9.0,
            pct_de_gt_t1: 0.0,
            pct_de_gt_t2: 0.0,
        };
        let score = rank_score(&stats, RankWeights { p95: 0.7, mean: 0.3 });
        assert!((score - 4.1).abs() < 1e-12, "score = {score}");
    }

    #[test]
    fn test_rank_weights_not_renormalized() {
        let stats = DeltaEStats {
            mean_de: 1.0,
            p95_de: 1.0,
            max_de: 1.0,
            pct_de_gt_t1: 0.0,
            pct_de_gt_t2: 0.0,
        };
        // Weights summing to 4 are applied as-is
        let score = rank_score(&stats, RankWeights { p95: 3.0, mean: 1.0 });
        assert!((score - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_settings_echo_keys() {
        let config = AnalysisConfig::builder()
            .output_profile("out.icc".parse().unwrap())
            .tac_limit(Some(320.0))
            .build()
            .unwrap();
        let json = serde_json::to_value(SettingsEcho::from_config(&config)).unwrap();

        assert_eq!(json["inputProfilePath"], "srgb");
        assert_eq!(json["outputProfilePath"], "out.icc");
        assert_eq!(json["renderingIntent"], "relative");
        assert_eq!(json["blackPointCompensation"], false);
        assert_eq!(json["maxSize"], 1024);
        assert_eq!(json["deltaEThresholds"][0], 2.0);
        assert_eq!(json["deltaEThresholds"][1], 5.0);
        assert_eq!(json["tacLimit"], 320.0);
        assert_eq!(json["rankWeights"]["p95"], 0.7);
        assert_eq!(json["rankWeights"]["mean"], 0.3);
    }

    #[test]
    fn test_settings_echo_omits_absent_tac_limit() {
        let json = serde_json::to_value(SettingsEcho::from_config(&AnalysisConfig::default()))
            .unwrap();
        assert!(json.get("tacLimit").is_none());
    }

    #[test]
    fn test_stats_block_flattens_delta_fields() {
        let block = StatsBlock {
            delta_e: DeltaEStats {
                mean_de: 1.0,
                p95_de: 2.0,
                max_de: 3.0,
                pct_de_gt_t1: 4.0,
                pct_de_gt_t2: 5.0,
            },
            rank_score: 1.7,
        };
        let json = serde_json::to_value(block).unwrap();
        assert_eq!(json["mean_de"], 1.0);
        assert_eq!(json["p95_de"], 2.0);
        assert_eq!(json["max_de"], 3.0);
        assert_eq!(json["pct_de_gt_t1"], 4.0);
        assert_eq!(json["pct_de_gt_t2"], 5.0);
        assert_eq!(json["rank_score"], 1.7);
    }

    #[test]
    fn test_unsupported_tac_serializes_minimal() {
        let json = serde_json::to_value(TacBlock::from(Coverage::Unsupported)).unwrap();
        assert_eq!(json, serde_json::json!({ "supported": false }));
    }

    #[test]
    fn test_supported_tac_block() {
        let block = TacBlock::from(Coverage::Supported(CoverageStats {
            limit: Some(300.0),
            p95: 250.0,
            max: 380.0,
            pct_gt_limit: Some(12.5),
        }));
        let json = serde_json::to_value(block).unwrap();
        assert_eq!(json["supported"], true);
        assert_eq!(json["limit"], 300.0);
        assert_eq!(json["p95"], 250.0);
        assert_eq!(json["max"], 380.0);
        assert_eq!(json["pct_gt_limit"], 12.5);
    }
}
