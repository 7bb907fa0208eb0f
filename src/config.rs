//! Configuration types for soft-proof analysis

use crate::error::{Result, SoftproofError};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

/// Rendering intent applied to every ICC transform in the chain
///
/// Closed enumeration: invalid values are rejected when parsing rather than
/// silently falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RenderingIntent {
    /// Relative colorimetric (default)
    Relative,
    /// Perceptual
    Perceptual,
    /// Saturation
    Saturation,
    /// Absolute colorimetric
    Absolute,
}

impl Default for RenderingIntent {
    fn default() -> Self {
        Self::Relative
    }
}

impl std::fmt::Display for RenderingIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Relative => write!(f, "relative"),
            Self::Perceptual => write!(f, "perceptual"),
            Self::Saturation => write!(f, "saturation"),
            Self::Absolute => write!(f, "absolute"),
        }
    }
}

impl FromStr for RenderingIntent {
    type Err = SoftproofError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "relative" => Ok(Self::Relative),
            "perceptual" => Ok(Self::Perceptual),
            "saturation" => Ok(Self::Saturation),
            "absolute" => Ok(Self::Absolute),
            other => Err(SoftproofError::invalid_config(format!(
                "unknown rendering intent '{other}' (expected relative, perceptual, saturation or absolute)"
            ))),
        }
    }
}

impl RenderingIntent {
    /// Map to the lcms2 intent constant
    #[must_use]
    pub fn to_lcms(self) -> lcms2::Intent {
        match self {
            Self::Relative => lcms2::Intent::RelativeColorimetric,
            Self::Perceptual => lcms2::Intent::Perceptual,
            Self::Saturation => lcms2::Intent::Saturation,
            Self::Absolute => lcms2::Intent::AbsoluteColorimetric,
        }
    }
}

/// Reference to an ICC profile: either lcms2's built-in sRGB or a file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileRef {
    /// Built-in sRGB profile, selected by the literal `srgb`
    Srgb,
    /// Profile loaded from an `.icc`/`.icm` file
    File(PathBuf),
}

impl FromStr for ProfileRef {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        if s.eq_ignore_ascii_case("srgb") {
            Ok(Self::Srgb)
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for ProfileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Srgb => write!(f, "srgb"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl ProfileRef {
    /// Short display name: file basename, or `srgb` for the built-in
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Srgb => "srgb".to_string(),
            Self::File(path) => path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            ),
        }
    }
}

/// Weights applied to the (p95, mean) ΔE statistics in the rank score
///
/// Used exactly as given: the scorer never renormalizes them or checks that
/// they sum to one. That is a documented caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankWeights {
    /// Weight on the 95th-percentile ΔE
    pub p95: f64,
    /// Weight on the mean ΔE
    pub mean: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self { p95: 0.7, mean: 0.3 }
    }
}

/// Configuration for a single analysis invocation
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Input (reference) profile; defaults to built-in sRGB
    pub input_profile: ProfileRef,
    /// Candidate output (printer/press) profile
    pub output_profile: ProfileRef,
    /// Rendering intent for every transform in the chain
    pub intent: RenderingIntent,
    /// Black-point compensation, applied to every transform in the chain
    pub black_point_compensation: bool,
    /// Long-edge bound for the working image; `<= 0` disables resizing
    pub max_size: i32,
    /// ΔE thresholds `(t1, t2)` for the exceedance percentages and the mask.
    /// Ordering (`t1 <= t2`) is intentionally not validated; callers supplying
    /// `t1 > t2` get a mask threshold tighter than `pct_de_gt_t1` implies.
    pub de_thresholds: (f64, f64),
    /// Optional total-area-coverage limit percentage
    pub tac_limit: Option<f64>,
    /// Rank score weights
    pub rank_weights: RankWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_profile: ProfileRef::Srgb,
            output_profile: ProfileRef::Srgb,
            intent: RenderingIntent::default(),
            black_point_compensation: false,
            max_size: 1024,
            de_thresholds: (2.0, 5.0),
            tac_limit: None,
            rank_weights: RankWeights::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration builder
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate numeric parameters
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::InvalidConfig`] when a threshold, weight or
    /// coverage limit is not a finite number.
    pub fn validate(&self) -> Result<()> {
        if !self.de_thresholds.0.is_finite() || !self.de_thresholds.1.is_finite() {
            return Err(SoftproofError::invalid_config(
                "ΔE thresholds must be finite numbers",
            ));
        }
        if !self.rank_weights.p95.is_finite() || !self.rank_weights.mean.is_finite() {
            return Err(SoftproofError::invalid_config(
                "rank weights must be finite numbers",
            ));
        }
        if let Some(limit) = self.tac_limit {
            if !limit.is_finite() {
                return Err(SoftproofError::invalid_config(
                    "TAC limit must be a finite number",
                ));
            }
        }
        Ok(())
    }
}

/// Builder for [`AnalysisConfig`]
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Set the input (reference) profile
    #[must_use]
    pub fn input_profile(mut self, profile: ProfileRef) -> Self {
        self.config.input_profile = profile;
        self
    }

    /// Set the candidate output profile
    #[must_use]
    pub fn output_profile(mut self, profile: ProfileRef) -> Self {
        self.config.output_profile = profile;
        self
    }

    /// Set the rendering intent
    #[must_use]
    pub fn intent(mut self, intent: RenderingIntent) -> Self {
        self.config.intent = intent;
        self
    }

    /// Enable or disable black-point compensation
    #[must_use]
    pub fn black_point_compensation(mut self, enabled: bool) -> Self {
        self.config.black_point_compensation = enabled;
        self
    }

    /// Set the long-edge bound (`<= 0` disables resizing)
    #[must_use]
    pub fn max_size(mut self, max_size: i32) -> Self {
        self.config.max_size = max_size;
        self
    }

    /// Set the ΔE thresholds `(t1, t2)`
    #[must_use]
    pub fn de_thresholds(mut self, t1: f64, t2: f64) -> Self {
        self.config.de_thresholds = (t1, t2);
        self
    }

    /// Set the optional TAC limit percentage
    #[must_use]
    pub fn tac_limit(mut self, limit: Option<f64>) -> Self {
        self.config.tac_limit = limit;
        self
    }

    /// Set the rank score weights
    #[must_use]
    pub fn rank_weights(mut self, p95: f64, mean: f64) -> Self {
        self.config.rank_weights = RankWeights { p95, mean };
        self
    }

    /// Build and validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`SoftproofError::InvalidConfig`] when validation fails.
    pub fn build(self) -> Result<AnalysisConfig> {
        let config = self.config;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_profile, ProfileRef::Srgb);
        assert_eq!(config.intent, RenderingIntent::Relative);
        assert!(!config.black_point_compensation);
        assert_eq!(config.max_size, 1024);
        assert_eq!(config.de_thresholds, (2.0, 5.0));
        assert_eq!(config.tac_limit, None);
        assert_eq!(config.rank_weights, RankWeights { p95: 0.7, mean: 0.3 });
    }

    #[test]
    fn test_builder_chaining() {
        let config = AnalysisConfig::builder()
            .output_profile("printer.icc".parse().unwrap())
            .intent(RenderingIntent::Perceptual)
            .black_point_compensation(true)
            .max_size(512)
            .de_thresholds(1.0, 3.0)
            .tac_limit(Some(300.0))
            .rank_weights(0.5, 0.5)
            .build()
            .unwrap();

        assert_eq!(
            config.output_profile,
            ProfileRef::File(PathBuf::from("printer.icc"))
        );
        assert_eq!(config.intent, RenderingIntent::Perceptual);
        assert!(config.black_point_compensation);
        assert_eq!(config.max_size, 512);
        assert_eq!(config.de_thresholds, (1.0, 3.0));
        assert_eq!(config.tac_limit, Some(300.0));
    }

    #[test]
    fn test_threshold_ordering_not_validated() {
        // t1 > t2 is caller responsibility, never an error
        let config = AnalysisConfig::builder().de_thresholds(5.0, 2.0).build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_validation_rejects_non_finite() {
        assert!(AnalysisConfig::builder()
            .de_thresholds(f64::NAN, 5.0)
            .build()
            .is_err());
        assert!(AnalysisConfig::builder()
            .rank_weights(f64::INFINITY, 0.3)
            .build()
            .is_err());
        assert!(AnalysisConfig::builder()
            .tac_limit(Some(f64::NAN))
            .build()
            .is_err());
    }

    #[test]
    fn test_rendering_intent_parse_and_display() {
        assert_eq!(
            "relative".parse::<RenderingIntent>().unwrap(),
            RenderingIntent::Relative
        );
        assert_eq!(
            "ABSOLUTE".parse::<RenderingIntent>().unwrap(),
            RenderingIntent::Absolute
        );
        assert!("vivid".parse::<RenderingIntent>().is_err());

        assert_eq!(format!("{}", RenderingIntent::Perceptual), "perceptual");
        assert_eq!(format!("{}", RenderingIntent::Saturation), "saturation");
    }

    #[test]
    fn test_profile_ref_parse() {
        assert_eq!("srgb".parse::<ProfileRef>().unwrap(), ProfileRef::Srgb);
        assert_eq!("SRGB".parse::<ProfileRef>().unwrap(), ProfileRef::Srgb);
        assert_eq!(
            "profiles/fogra39.icc".parse::<ProfileRef>().unwrap(),
            ProfileRef::File(PathBuf::from("profiles/fogra39.icc"))
        );
    }

    #[test]
    fn test_profile_ref_display_name() {
        let p: ProfileRef = "profiles/fogra39.icc".parse().unwrap();
        assert_eq!(p.display_name(), "fogra39.icc");
        assert_eq!(ProfileRef::Srgb.display_name(), "srgb");
    }
}
