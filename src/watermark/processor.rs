//! Watermark processor: the public entry point of the engine.
//!
//! A processor owns one logo, one image acquirer and one configuration. The
//! logo is loaded when the processor is built; if that fails the processor
//! still exists but refuses every request before touching the network.
//!
//! # Error Boundary
//!
//! [`WatermarkProcessor::watermark`] returns typed errors. The string-based
//! [`WatermarkProcessor::add_watermark`] is the one place those errors are
//! logged and collapsed into `None` for the calling layer.
//!
//! # Example
//!
//! ```ignore
//! use brandmark::watermark::{WatermarkConfig, WatermarkProcessor};
//!
//! let processor = WatermarkProcessor::new("logo.png", WatermarkConfig::default())?;
//! if let Some(jpeg) = processor.add_watermark("https://cdn.example.com/p.jpg", "center", 0.8) {
//!     std::fs::write("out.jpg", jpeg)?;
//! }
//! ```

use super::{
    composite, encode, ImageAcquirer, ImageFetcher, LogoAsset, WatermarkConfig, WatermarkError,
    WatermarkPosition,
};
use std::path::Path;
use std::sync::Arc;

/// Applies the logo to base images and returns encoded JPEG bytes.
#[derive(Clone)]
pub struct WatermarkProcessor {
    logo: Option<LogoAsset>,
    acquirer: Arc<dyn ImageAcquirer>,
    config: WatermarkConfig,
}

impl std::fmt::Debug for WatermarkProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkProcessor")
            .field("logo", &self.logo)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WatermarkProcessor {
    /// Build a processor that loads its logo from `logo_path` and fetches
    /// base images with an HTTP client honoring the configured timeout.
    ///
    /// A missing or unreadable logo is logged and leaves the processor in a
    /// degraded state where every call fails with `AssetError`.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::ConfigError` if the configuration is invalid
    /// or the HTTP client cannot be created.
    pub fn new<P: AsRef<Path>>(
        logo_path: P,
        config: WatermarkConfig,
    ) -> Result<Self, WatermarkError> {
        config.validate().map_err(WatermarkError::ConfigError)?;

        let logo = match LogoAsset::load(logo_path.as_ref()) {
            Ok(logo) => Some(logo),
            Err(e) => {
                tracing::error!(
                    path = %logo_path.as_ref().display(),
                    error = %e,
                    "Logo unavailable, watermarking disabled"
                );
                None
            }
        };

        let fetcher = ImageFetcher::new(config.fetch_timeout())?;
        Ok(Self::with_parts(logo, Arc::new(fetcher), config))
    }

    /// Build a processor from already constructed parts.
    pub fn with_parts(
        logo: Option<LogoAsset>,
        acquirer: Arc<dyn ImageAcquirer>,
        config: WatermarkConfig,
    ) -> Self {
        Self {
            logo,
            acquirer,
            config,
        }
    }

    /// Whether a logo was loaded.
    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Positions accepted by [`add_watermark`](Self::add_watermark), in menu order.
    pub fn available_positions(&self) -> &'static [WatermarkPosition] {
        &WatermarkPosition::ALL
    }

    /// Watermark the image at `reference` and return JPEG bytes.
    ///
    /// # Errors
    ///
    /// - `AssetError` when no logo is loaded (checked before acquisition)
    /// - `AcquisitionError` when the image cannot be opened, fetched or decoded
    /// - `CompositingError` for non-finite opacity or a zero-sized overlay
    /// - `EncodeError` when JPEG serialization fails
    pub fn watermark(
        &self,
        reference: &str,
        position: WatermarkPosition,
        opacity: f32,
    ) -> Result<Vec<u8>, WatermarkError> {
        let logo = self
            .logo
            .as_ref()
            .ok_or_else(|| WatermarkError::AssetError("logo unavailable".to_string()))?;

        let base = self.acquirer.acquire(reference)?;
        let composited = composite(&base, logo, position, opacity, &self.config)?;
        encode(&composited, self.config.quality)
    }

    /// Watermark the image at `reference`, logging any failure.
    ///
    /// Unrecognized `position` strings fall back to bottom-right. Returns
    /// `None` on any failure; no partial output is ever returned.
    pub fn add_watermark(&self, reference: &str, position: &str, opacity: f32) -> Option<Vec<u8>> {
        let position = WatermarkPosition::parse_or_default(position);

        match self.watermark(reference, position, opacity) {
            Ok(bytes) => {
                tracing::info!(
                    reference,
                    %position,
                    opacity,
                    size_bytes = bytes.len(),
                    "Watermark added"
                );
                Some(bytes)
            }
            Err(e) => {
                tracing::error!(
                    reference,
                    %position,
                    opacity,
                    kind = e.kind(),
                    error = %e,
                    "Failed to add watermark"
                );
                None
            }
        }
    }

    /// [`add_watermark`](Self::add_watermark) on tokio's blocking pool, for
    /// callers running inside an async runtime.
    pub async fn add_watermark_async(
        self: Arc<Self>,
        reference: String,
        position: String,
        opacity: f32,
    ) -> Option<Vec<u8>> {
        let result = tokio::task::spawn_blocking(move || {
            self.add_watermark(&reference, &position, opacity)
        })
        .await;

        match result {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Watermark task failed to complete");
                None
            }
        }
    }
}
