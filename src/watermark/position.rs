//! Geometry for watermark placement.
//!
//! Two calculations feed the compositor:
//!
//! - **Overlay size**: the logo is scaled so its long edge is a fixed fraction
//!   of the base image's shorter side, preserving the logo's aspect ratio.
//! - **Placement offset**: the top-left corner of the overlay for one of the
//!   five anchors. Offsets are never clamped, so a base smaller than the
//!   overlay plus margins yields negative coordinates.
//!
//! # Example
//!
//! ```
//! use brandmark::watermark::position::{
//!     calculate_overlay_size, calculate_position, ImageDimensions, Margins,
//! };
//! use brandmark::watermark::WatermarkPosition;
//!
//! let base = ImageDimensions { width: 1000, height: 800 };
//! let logo = ImageDimensions { width: 200, height: 100 };
//!
//! let overlay = calculate_overlay_size(&base, &logo, 0.3);
//! assert_eq!((overlay.width, overlay.height), (240, 120));
//!
//! let pos = calculate_position(WatermarkPosition::BottomRight, &base, &overlay, Margins::default());
//! assert_eq!((pos.x, pos.y), (740, 660));
//! ```

use super::WatermarkPosition;
use crate::constants::{DEFAULT_CENTER_BOTTOM_MARGIN, DEFAULT_MARGIN};

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl<P: image::Pixel> From<&image::ImageBuffer<P, Vec<P::Subpixel>>> for ImageDimensions {
    fn from(img: &image::ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        Self::new(img.width(), img.height())
    }
}

/// Top-left corner of the overlay on the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Edge distances used by the placement formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    /// Distance from the nearest edges for corner anchors
    pub edge: u32,
    /// Distance from the bottom edge for the center anchor
    pub center_bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            edge: DEFAULT_MARGIN,
            center_bottom: DEFAULT_CENTER_BOTTOM_MARGIN,
        }
    }
}

/// Calculate the overlay size for a base image.
///
/// The long edge is `floor(min(base.width, base.height) * ratio)`; the short
/// edge follows the logo's aspect ratio, truncated. A logo wider than tall
/// pins the width, anything else (including square) pins the height.
///
/// Returns a zero dimension when the base or logo is too small to produce a
/// visible overlay; the caller decides whether that is an error.
pub fn calculate_overlay_size(
    base: &ImageDimensions,
    logo: &ImageDimensions,
    ratio: f64,
) -> ImageDimensions {
    if logo.is_empty() {
        return ImageDimensions::new(0, 0);
    }

    let min_dimension = base.width.min(base.height) as f64;
    let target = (min_dimension * ratio).floor() as u32;
    let aspect_ratio = logo.width as f64 / logo.height as f64;

    if aspect_ratio > 1.0 {
        ImageDimensions::new(target, (target as f64 / aspect_ratio).floor() as u32)
    } else {
        ImageDimensions::new((target as f64 * aspect_ratio).floor() as u32, target)
    }
}

/// Calculate where the overlay's top-left corner goes.
///
/// Coordinates may be negative if the overlay plus margins does not fit.
pub fn calculate_position(
    position: WatermarkPosition,
    image: &ImageDimensions,
    overlay: &ImageDimensions,
    margins: Margins,
) -> PlacementPosition {
    let img_w = image.width as i32;
    let img_h = image.height as i32;
    let wm_w = overlay.width as i32;
    let wm_h = overlay.height as i32;
    let m = margins.edge as i32;

    match position {
        WatermarkPosition::BottomRight => PlacementPosition::new(img_w - wm_w - m, img_h - wm_h - m),
        WatermarkPosition::BottomLeft => PlacementPosition::new(m, img_h - wm_h - m),
        WatermarkPosition::TopRight => PlacementPosition::new(img_w - wm_w - m, m),
        WatermarkPosition::TopLeft => PlacementPosition::new(m, m),
        // Floor division so odd negative gaps round the same way as positive ones
        WatermarkPosition::Center => PlacementPosition::new(
            (img_w - wm_w).div_euclid(2),
            img_h - wm_h - margins.center_bottom as i32,
        ),
    }
}
