//! Watermark module for stamping a business logo onto product images.
//!
//! Given a reference to a base image (remote URL, local path or `file://`
//! URI) and a logo loaded once at startup, the engine scales the logo to a
//! fixed fraction of the base image, anchors it at one of five positions,
//! blends it with optional reduced opacity and re-encodes the result as JPEG.
//!
//! # Pipeline
//!
//! - **Acquisition** (`image_fetcher`): resolve and decode the base, flattened to opaque RGB
//! - **Logo** (`logo`): RGBA overlay shared read-only by every request
//! - **Geometry** (`position`): overlay size and anchor offset
//! - **Compositing** (`compositor`): Lanczos3 resize, opacity, source-over blend
//! - **Encoding** (`encoder`): flatten onto white, JPEG at fixed quality
//!
//! # Configuration Example
//!
//! ```yaml
//! logo_path: "assets/logo.png"
//! watermark:
//!   fetch_timeout_secs: 30
//!   size_ratio: 0.3
//!   margin: 20
//!   center_bottom_margin: 30
//!   quality: 95
//!   default_position: bottom-right
//! ```

pub mod compositor;
pub mod config;
pub mod encoder;
pub mod error;
pub mod image_fetcher;
pub mod logo;
pub mod position;
pub mod processor;

// Re-export main types for convenience
pub use compositor::{apply_opacity, blend_overlay, composite, prepare_overlay};
pub use config::{WatermarkConfig, WatermarkPosition};
pub use encoder::{encode, flatten_onto_white};
pub use error::WatermarkError;
pub use image_fetcher::{flatten_to_rgb, ImageAcquirer, ImageFetcher, ImageSource};
pub use logo::LogoAsset;
pub use position::{
    calculate_overlay_size, calculate_position, ImageDimensions, Margins, PlacementPosition,
};
pub use processor::WatermarkProcessor;
