#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Softproof
//!
//! A Rust library for scoring how faithfully a candidate ICC output profile
//! reproduces an image. It simulates the full soft-proof chain with lcms2,
//! measures the per-pixel CIEDE2000 difference between the original and the
//! proofed image, and assembles one JSON-serializable report per run.
//!
//! ## Features
//!
//! - **Profile chain**: input profile (built-in sRGB or `.icc` file) through
//!   a candidate output profile and back, with selectable rendering intent
//!   and optional black-point compensation
//! - **ΔE statistics**: mean, 95th percentile, maximum and threshold
//!   exceedance percentages over the CIEDE2000 difference map
//! - **Visual diagnostics**: grayscale heatmap and binary problem mask as
//!   base64-encoded PNGs
//! - **Coverage estimate**: best-effort total-area-coverage statistics for
//!   multi-ink device spaces such as CMYK
//! - **Rank score**: a single weighted figure for comparing profiles
//! - **CLI Integration**: optional command-line interface (enable with the
//!   `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use softproof::{AnalysisConfig, ProofAnalyzer};
//!
//! # fn example() -> softproof::Result<()> {
//! let config = AnalysisConfig::builder()
//!     .output_profile("printer.icc".parse().unwrap())
//!     .tac_limit(Some(300.0))
//!     .build()?;
//!
//! let analyzer = ProofAnalyzer::new(config)?;
//! let report = analyzer.analyze_file("photo.jpg")?;
//! println!("rank score: {:.3}", report.stats.rank_score);
//! # Ok(())
//! # }
//! ```
//!
//! One-shot convenience functions are also available:
//!
//! ```rust,no_run
//! # fn example() -> softproof::Result<()> {
//! let config = softproof::AnalysisConfig::default();
//! let report = softproof::analyze_file("photo.jpg", &config)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod coverage;
pub mod delta_e;
pub mod diagnostics;
pub mod error;
pub mod icc;
pub mod loader;
pub mod processor;
pub mod report;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

pub use config::{AnalysisConfig, ProfileRef, RankWeights, RenderingIntent};
pub use coverage::{Coverage, CoverageStats};
pub use delta_e::DeltaEStats;
pub use error::{Result, SoftproofError};
pub use processor::ProofAnalyzer;
pub use report::{AnalysisReport, Previews, ProfileInfo, StatsBlock, TacBlock};
pub use types::{DeltaMap, DeviceImage, LabImage, SampleKind};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig};

use image::RgbImage;
use std::path::Path;

/// Analyze an image file with the given configuration
///
/// Convenience wrapper that builds a [`ProofAnalyzer`] for one call.
///
/// # Errors
///
/// Returns [`SoftproofError::InvalidConfig`] for an invalid configuration,
/// [`SoftproofError::Decode`] when the image cannot be read and
/// [`SoftproofError::Transform`] for profile failures.
pub fn analyze_file<P: AsRef<Path>>(path: P, config: &AnalysisConfig) -> Result<AnalysisReport> {
    ProofAnalyzer::new(config.clone())?.analyze_file(path)
}

/// Analyze an in-memory RGB image with the given configuration
///
/// # Errors
///
/// Same failure modes as [`analyze_file`], minus decoding.
pub fn analyze_image(image: RgbImage, config: &AnalysisConfig) -> Result<AnalysisReport> {
    ProofAnalyzer::new(config.clone())?.analyze_image(image)
}
