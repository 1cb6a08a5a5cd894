//! Watermark error types.
//!
//! Every stage of the pipeline reports failure through [`WatermarkError`].
//! Errors propagate unchanged up to `WatermarkProcessor::add_watermark`,
//! which is the only place they are logged and discarded.

use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// Logo asset is missing or could not be decoded
    AssetError(String),

    /// Base image could not be opened, fetched or decoded
    AcquisitionError(String),

    /// Overlay geometry or blending failed (e.g. zero-sized overlay)
    CompositingError(String),

    /// Final image could not be serialized
    EncodeError(String),

    /// Invalid configuration
    ConfigError(String),
}

impl WatermarkError {
    /// Short machine-friendly name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AssetError(_) => "asset",
            Self::AcquisitionError(_) => "acquisition",
            Self::CompositingError(_) => "compositing",
            Self::EncodeError(_) => "encode",
            Self::ConfigError(_) => "config",
        }
    }
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetError(msg) => write!(f, "Logo asset error: {}", msg),
            Self::AcquisitionError(msg) => write!(f, "Failed to acquire image: {}", msg),
            Self::CompositingError(msg) => write!(f, "Failed to composite watermark: {}", msg),
            Self::EncodeError(msg) => write!(f, "Failed to encode image: {}", msg),
            Self::ConfigError(msg) => write!(f, "Watermark configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
