//! Error types for soft-proof analysis
//!
//! The taxonomy mirrors the failure policy of the pipeline: decode and
//! transform failures abort the whole analysis, configuration problems are
//! caught at the boundary, and everything else is a generic processing
//! failure. Coverage estimation never surfaces here at all; it degrades to
//! [`crate::coverage::Coverage::Unsupported`] instead.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SoftproofError>;

/// All fatal failure modes of a single analysis invocation
#[derive(Debug, Error)]
pub enum SoftproofError {
    /// Input image file unreadable or corrupt; aborts before any transform
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// ICC profile missing/invalid or the requested conversion is unsupported
    #[error("ICC transform failed: {0}")]
    Transform(String),

    /// Invalid configuration supplied by the caller
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any other unexpected failure during analysis
    #[error("analysis failed: {0}")]
    Processing(String),
}

impl SoftproofError {
    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode(message.into())
    }

    /// Create a transform error
    pub fn transform<S: Into<String>>(message: S) -> Self {
        Self::Transform(message.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a generic processing error
    pub fn processing<S: Into<String>>(message: S) -> Self {
        Self::Processing(message.into())
    }
}
