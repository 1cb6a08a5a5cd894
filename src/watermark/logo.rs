//! Logo asset loading.
//!
//! The overlay is decoded once, normalized to RGBA8 and shared read-only
//! behind an `Arc`. Callers clone before resizing, so the cached pixels are
//! never modified after load.

use super::WatermarkError;
use image::{DynamicImage, RgbaImage};
use std::path::Path;
use std::sync::Arc;

/// Decoded overlay image with an alpha channel.
#[derive(Clone)]
pub struct LogoAsset {
    image: Arc<RgbaImage>,
}

impl std::fmt::Debug for LogoAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoAsset")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .finish()
    }
}

impl LogoAsset {
    /// Load a logo from disk, converting any source format to RGBA8.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::AssetError` if the file does not exist, cannot
    /// be read or does not decode as an image.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WatermarkError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WatermarkError::AssetError(format!(
                "Logo file not found: {}",
                path.display()
            )));
        }

        let decoded = image::io::Reader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| {
                WatermarkError::AssetError(format!("Failed to open {}: {e}", path.display()))
            })?
            .decode()
            .map_err(|e| {
                WatermarkError::AssetError(format!("Failed to decode {}: {e}", path.display()))
            })?;

        let asset = Self::from_image(decoded);
        tracing::info!(
            path = %path.display(),
            width = asset.width(),
            height = asset.height(),
            "Logo loaded"
        );
        Ok(asset)
    }

    /// Build an asset from an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        let rgba = match image {
            DynamicImage::ImageRgba8(rgba) => rgba,
            other => other.to_rgba8(),
        };
        Self {
            image: Arc::new(rgba),
        }
    }

    /// The shared RGBA pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
