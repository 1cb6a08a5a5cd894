// Constants module - centralized default values for configuration
//
// Defaults for the watermark engine and its configuration file. Config
// structs reference these through `#[serde(default = ...)]` helpers.

// =============================================================================
// Logo defaults
// =============================================================================

/// Default logo asset path, relative to the working directory
pub const DEFAULT_LOGO_PATH: &str = "logo.png";

// =============================================================================
// Acquisition defaults
// =============================================================================

/// Default timeout for fetching a remote base image, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Scheme prefix that marks a reference as a local file URI
pub const FILE_URI_PREFIX: &str = "file://";

// =============================================================================
// Geometry defaults
// =============================================================================

/// Overlay long edge as a fraction of the base image's shorter side
pub const DEFAULT_SIZE_RATIO: f64 = 0.3;

/// Distance in pixels between the overlay and the nearest image edges
pub const DEFAULT_MARGIN: u32 = 20;

/// Bottom margin in pixels for the center anchor
pub const DEFAULT_CENTER_BOTTOM_MARGIN: u32 = 30;

/// Default overlay opacity (alpha left untouched)
pub const DEFAULT_OPACITY: f32 = 1.0;

// =============================================================================
// Encoder defaults
// =============================================================================

/// JPEG quality used for every encoded result
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when neither config nor RUST_LOG sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";
