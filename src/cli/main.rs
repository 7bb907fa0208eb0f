//! Soft-proof analysis CLI
//!
//! Runs one analysis and prints the JSON report to stdout. All diagnostics
//! go to stderr so the report stays pipeable.

use super::config::CliConfigBuilder;
use crate::{config::RenderingIntent, processor::ProofAnalyzer, tracing_config};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// ICC output-profile fidelity analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "softproof")]
pub struct Cli {
    /// Image file to analyze
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Candidate output profile (.icc file path)
    #[arg(short, long, value_name = "PROFILE")]
    pub output_profile: String,

    /// Input profile (.icc file path, or "srgb" for the built-in)
    #[arg(short, long, value_name = "PROFILE", default_value = "srgb")]
    pub input_profile: String,

    /// Rendering intent for all transforms
    #[arg(short, long, value_enum, default_value_t = RenderingIntent::Relative)]
    pub rendering_intent: RenderingIntent,

    /// Enable black-point compensation
    #[arg(short, long)]
    pub black_point_compensation: bool,

    /// Long-edge bound for the working image (0 disables resizing)
    #[arg(short, long, default_value_t = 1024)]
    pub max_size: i32,

    /// ΔE thresholds as "t1,t2"
    #[arg(short, long, value_name = "T1,T2", default_value = "2,5")]
    pub thresholds: String,

    /// Total-area-coverage limit percentage (e.g. 300 for a 300% press limit)
    #[arg(long, value_name = "PCT")]
    pub tac_limit: Option<f64>,

    /// Rank score weights as "p95,mean"
    #[arg(long, value_name = "W_P95,W_MEAN", default_value = "0.7,0.3")]
    pub rank_weights: String,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pub pretty: bool,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// CLI entry point
///
/// # Errors
///
/// Returns an error for invalid arguments or any pipeline failure; the
/// binary maps that to exit code 1.
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_config::init_cli_tracing(cli.verbose)?;

    let config = CliConfigBuilder::from_cli(&cli)?;
    let analyzer = ProofAnalyzer::new(config).context("invalid analysis configuration")?;

    let report = analyzer
        .analyze_file(&cli.image)
        .with_context(|| format!("failed to analyze {}", cli.image.display()))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    info!("analysis complete (rank score {:.3})", report.stats.rank_score);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["softproof", "photo.png", "-o", "printer.icc"]);
        assert_eq!(cli.input_profile, "srgb");
        assert_eq!(cli.rendering_intent, RenderingIntent::Relative);
        assert!(!cli.black_point_compensation);
        assert_eq!(cli.max_size, 1024);
        assert_eq!(cli.thresholds, "2,5");
        assert_eq!(cli.tac_limit, None);
        assert_eq!(cli.rank_weights, "0.7,0.3");
        assert!(!cli.pretty);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_requires_output_profile() {
        assert!(Cli::try_parse_from(["softproof", "photo.png"]).is_err());
    }

    #[test]
    fn test_cli_intent_value_enum() {
        let cli = Cli::parse_from([
            "softproof",
            "photo.png",
            "-o",
            "printer.icc",
            "-r",
            "perceptual",
        ]);
        assert_eq!(cli.rendering_intent, RenderingIntent::Perceptual);
        assert!(Cli::try_parse_from([
            "softproof",
            "photo.png",
            "-o",
            "printer.icc",
            "-r",
            "vivid"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_verbosity_count() {
        let cli = Cli::parse_from(["softproof", "photo.png", "-o", "p.icc", "-v", "-v"]);
        assert_eq!(cli.verbose, 2);
    }
}
