//! Unified soft-proof analysis pipeline
//!
//! [`ProofAnalyzer`] consolidates the stage sequencing for one analysis
//! invocation: load, resize, color transforms, ΔE analysis, visual
//! diagnostics, coverage estimation, rank scoring and report assembly.
//! The pipeline is fully synchronous; every stage runs to completion before
//! the next begins, and nothing is shared between invocations.

use crate::{
    config::AnalysisConfig,
    coverage,
    delta_e::{self, DeltaEStats},
    diagnostics,
    error::Result,
    icc::{lab_from_srgb8, ProofTransformer},
    loader,
    report::{
        rank_score, AnalysisReport, Previews, ProfileInfo, SettingsEcho, StatsBlock, TacBlock,
    },
};
use image::RgbImage;
use log::{debug, info};
use tracing::instrument;

/// Single-shot soft-proof analyzer
///
/// Holds only the configuration; each call builds and discards all of its
/// intermediate images, so one analyzer may be used from multiple threads
/// provided each call is independent.
pub struct ProofAnalyzer {
    config: AnalysisConfig,
}

impl ProofAnalyzer {
    /// Create an analyzer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::SoftproofError::InvalidConfig`] when validation
    /// fails.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Analysis configuration in effect
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze an image file against the configured output profile
    ///
    /// # Errors
    ///
    /// Returns [`crate::SoftproofError::Decode`] when the file cannot be
    /// decoded and [`crate::SoftproofError::Transform`] when a profile is
    /// missing, unreadable or incompatible.
    pub fn analyze_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<AnalysisReport> {
        let image = loader::load_image(path)?;
        self.analyze_image(image)
    }

    /// Analyze an in-memory RGB image against the configured output profile
    ///
    /// # Errors
    ///
    /// Returns [`crate::SoftproofError::Transform`] on any profile or
    /// conversion failure, [`crate::SoftproofError::Processing`] on other
    /// pipeline failures. Coverage estimation never fails the analysis.
    #[instrument(
        skip(self, image),
        fields(
            output_profile = %self.config.output_profile,
            intent = %self.config.intent,
            dimensions = %format!("{}x{}", image.width(), image.height())
        )
    )]
    pub fn analyze_image(&self, image: RgbImage) -> Result<AnalysisReport> {
        info!(
            "analyzing against output profile {} (intent {})",
            self.config.output_profile, self.config.intent
        );

        let working = loader::resize_to_bound(image, self.config.max_size);
        let (width, height) = working.dimensions();
        debug!("working image {width}x{height}");

        let transformer = ProofTransformer::new(&self.config)?;

        let original_lab = lab_from_srgb8(width, height, &transformer.original_srgb(&working)?)?;
        let proof_device = transformer.proof_device(&working)?;
        let proof_lab = lab_from_srgb8(width, height, &transformer.proof_srgb(&proof_device)?)?;

        let (t1, t2) = self.config.de_thresholds;
        let map = delta_e::delta_e_map(&original_lab, &proof_lab)?;
        let stats = delta_e::summarize(&map, t1, t2);
        debug!(
            "ΔE mean {:.3} p95 {:.3} max {:.3}",
            stats.mean_de, stats.p95_de, stats.max_de
        );

        let previews = Previews {
            de_heatmap_png_base64: diagnostics::render_heatmap(&map)?,
            mask_png_base64: diagnostics::render_mask(&map, t2)?,
        };

        // Best-effort stage: an Unsupported outcome never aborts the run
        let tac = TacBlock::from(coverage::estimate(&proof_device, self.config.tac_limit));

        Ok(self.assemble(&transformer, stats, tac, previews))
    }

    fn assemble(
        &self,
        transformer: &ProofTransformer,
        stats: DeltaEStats,
        tac: TacBlock,
        previews: Previews,
    ) -> AnalysisReport {
        let score = rank_score(&stats, self.config.rank_weights);
        AnalysisReport {
            profile: ProfileInfo {
                name: self.config.output_profile.display_name(),
                path: self.config.output_profile.to_string(),
                channels: transformer.device_channels(),
                description: transformer.output_description(),
                color_space: Some(transformer.device_color_space().to_string()),
            },
            settings: SettingsEcho::from_config(&self.config),
            stats: StatsBlock {
                delta_e: stats,
                rank_score: score,
            },
            tac,
            previews,
        }
    }
}
