//! Base image acquisition.
//!
//! Resolves a reference string into a decoded, opaque RGB image.
//!
//! # Supported References
//!
//! - `file:///path/to/photo.png` - local file, scheme prefix stripped
//! - `/path/to/photo.png` - any existing local filesystem path
//! - `https://example.com/photo.jpg` - anything else is fetched over HTTP
//!
//! # Normalization
//!
//! Images carrying an alpha channel are flattened onto a white canvas using
//! their own alpha as the mask. Everything else is converted to RGB8. The
//! compositor therefore always receives an opaque three-channel base.
//!
//! # Example
//!
//! ```ignore
//! use brandmark::watermark::image_fetcher::{ImageFetcher, ImageAcquirer};
//!
//! let fetcher = ImageFetcher::new(Duration::from_secs(30))?;
//! let base = fetcher.acquire("https://cdn.example.com/product.jpg")?;
//! ```

use super::encoder::flatten_onto_white;
use super::WatermarkError;
use crate::constants::FILE_URI_PREFIX;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Anything that can turn a reference string into an opaque base image.
///
/// `ImageFetcher` is the production implementation; tests plug in fakes.
pub trait ImageAcquirer: Send + Sync {
    fn acquire(&self, reference: &str) -> Result<RgbImage, WatermarkError>;
}

/// Where a base image reference points, resolved once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// `file://` URI with the scheme already stripped.
    FileUri(PathBuf),
    /// Existing local filesystem path.
    LocalPath(PathBuf),
    /// Remote URL fetched over HTTP(S).
    Remote(String),
}

impl ImageSource {
    /// Classify a reference string.
    ///
    /// The file scheme wins over everything else, then an existing path,
    /// then the remote fallback. A `file://` reference is not checked for
    /// existence here; opening it reports the failure.
    pub fn resolve(reference: &str) -> Self {
        if let Some(path) = reference.strip_prefix(FILE_URI_PREFIX) {
            ImageSource::FileUri(PathBuf::from(path))
        } else if Path::new(reference).exists() {
            ImageSource::LocalPath(PathBuf::from(reference))
        } else {
            ImageSource::Remote(reference.to_string())
        }
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::FileUri(_) => "file_uri",
            ImageSource::LocalPath(_) => "local_path",
            ImageSource::Remote(_) => "remote",
        }
    }
}

/// Loads base images from disk or over HTTP with a fixed timeout.
#[derive(Clone)]
pub struct ImageFetcher {
    http_client: reqwest::blocking::Client,
}

impl std::fmt::Debug for ImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFetcher").finish_non_exhaustive()
    }
}

impl ImageFetcher {
    /// Create a fetcher whose remote requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `WatermarkError::ConfigError` if the HTTP client cannot be created
    /// (e.g., TLS configuration issues, system resource exhaustion).
    pub fn new(timeout: Duration) -> Result<Self, WatermarkError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                WatermarkError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client })
    }

    /// Read raw bytes for a resolved source.
    fn read_bytes(&self, source: &ImageSource) -> Result<Vec<u8>, WatermarkError> {
        match source {
            ImageSource::FileUri(path) | ImageSource::LocalPath(path) => read_local(path),
            ImageSource::Remote(url) => self.fetch_remote(url),
        }
    }

    /// Fetch image bytes from a URL. One attempt, no retries.
    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, WatermarkError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .map_err(|e| WatermarkError::AcquisitionError(format!("HTTP fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WatermarkError::AcquisitionError(format!(
                "HTTP request failed with status: {}",
                response.status()
            )));
        }

        let bytes = response.bytes().map_err(|e| {
            WatermarkError::AcquisitionError(format!("Failed to read HTTP body: {e}"))
        })?;

        Ok(bytes.to_vec())
    }
}

impl ImageAcquirer for ImageFetcher {
    fn acquire(&self, reference: &str) -> Result<RgbImage, WatermarkError> {
        let source = ImageSource::resolve(reference);
        tracing::debug!(source_kind = source.kind(), reference, "Acquiring base image");

        let data = self.read_bytes(&source)?;
        let decoded = decode_image(&data, reference)?;

        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "Decoded base image"
        );

        Ok(flatten_to_rgb(decoded))
    }
}

fn read_local(path: &Path) -> Result<Vec<u8>, WatermarkError> {
    std::fs::read(path).map_err(|e| {
        WatermarkError::AcquisitionError(format!("Failed to open {}: {e}", path.display()))
    })
}

/// Decode bytes, detecting the format from magic bytes or the reference's extension.
pub fn decode_image(data: &[u8], reference: &str) -> Result<DynamicImage, WatermarkError> {
    let format = detect_image_format(data, reference)?;
    image::load_from_memory_with_format(data, format)
        .map_err(|e| WatermarkError::AcquisitionError(format!("Failed to decode image: {e}")))
}

/// Detect image format from bytes or filename extension.
fn detect_image_format(data: &[u8], path: &str) -> Result<ImageFormat, WatermarkError> {
    // Try to detect from magic bytes first
    if let Ok(format) = image::guess_format(data) {
        return Ok(format);
    }

    // Fall back to extension, ignoring any query string
    let without_query = path.split(['?', '#']).next().unwrap_or(path);
    let ext = without_query
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "gif" => Ok(ImageFormat::Gif),
        "webp" => Ok(ImageFormat::WebP),
        "bmp" => Ok(ImageFormat::Bmp),
        "tif" | "tiff" => Ok(ImageFormat::Tiff),
        _ => Err(WatermarkError::AcquisitionError(format!(
            "Unsupported image format: {ext}"
        ))),
    }
}

/// Normalize any decoded image to opaque RGB8.
///
/// Alpha-carrying images are composited onto white; palette images arrive
/// here already expanded to RGB(A) by the decoder.
pub fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return match image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        };
    }

    flatten_onto_white(&image.to_rgba8())
}
