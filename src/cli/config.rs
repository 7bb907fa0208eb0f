//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::{AnalysisConfig, ProfileRef};
use anyhow::{Context, Result};

/// Convert CLI arguments to a unified [`AnalysisConfig`]
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build an [`AnalysisConfig`] from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<AnalysisConfig> {
        let input_profile: ProfileRef = cli
            .input_profile
            .parse()
            .unwrap_or(ProfileRef::Srgb);
        let output_profile: ProfileRef = cli
            .output_profile
            .parse()
            .unwrap_or(ProfileRef::Srgb);

        let (t1, t2) = parse_pair(&cli.thresholds)
            .with_context(|| format!("invalid --thresholds value '{}'", cli.thresholds))?;
        let (w_p95, w_mean) = parse_pair(&cli.rank_weights)
            .with_context(|| format!("invalid --rank-weights value '{}'", cli.rank_weights))?;

        let config = AnalysisConfig::builder()
            .input_profile(input_profile)
            .output_profile(output_profile)
            .intent(cli.rendering_intent)
            .black_point_compensation(cli.black_point_compensation)
            .max_size(cli.max_size)
            .de_thresholds(t1, t2)
            .tac_limit(cli.tac_limit)
            .rank_weights(w_p95, w_mean)
            .build()?;
        Ok(config)
    }
}

/// Parse a "a,b" pair of floats
fn parse_pair(value: &str) -> Result<(f64, f64)> {
    let mut parts = value.splitn(2, ',');
    let first = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .context("expected two comma-separated numbers")?;
    let second = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .context("expected two comma-separated numbers")?;
    let a: f64 = first.parse().context("first value is not a number")?;
    let b: f64 = second.parse().context("second value is not a number")?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("2,5").unwrap(), (2.0, 5.0));
        assert_eq!(parse_pair("0.7, 0.3").unwrap(), (0.7, 0.3));
        assert!(parse_pair("2").is_err());
        assert!(parse_pair("2,").is_err());
        assert!(parse_pair("a,b").is_err());
    }

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::parse_from(["softproof", "photo.png", "-o", "printer.icc"]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.input_profile, ProfileRef::Srgb);
        assert_eq!(
            config.output_profile,
            ProfileRef::File("printer.icc".into())
        );
        assert_eq!(config.de_thresholds, (2.0, 5.0));
        assert_eq!(config.rank_weights.p95, 0.7);
        assert_eq!(config.rank_weights.mean, 0.3);
        assert_eq!(config.tac_limit, None);
    }

    #[test]
    fn test_from_cli_custom_pairs() {
        let cli = Cli::parse_from([
            "softproof",
            "photo.png",
            "-o",
            "printer.icc",
            "-t",
            "1,3",
            "--rank-weights",
            "0.5,0.5",
            "--tac-limit",
            "300",
        ]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.de_thresholds, (1.0, 3.0));
        assert_eq!(config.rank_weights.p95, 0.5);
        assert_eq!(config.tac_limit, Some(300.0));
    }

    #[test]
    fn test_from_cli_bad_thresholds() {
        let cli = Cli::parse_from(["softproof", "photo.png", "-o", "p.icc", "-t", "oops"]);
        assert!(CliConfigBuilder::from_cli(&cli).is_err());
    }
}
