//! Watermark configuration types.
//!
//! This module defines the engine tunables and the closed set of anchor
//! positions an overlay can be placed at:
//! - Overlay size ratio relative to the base image's shorter side
//! - Edge margins (with a separate bottom margin for the center anchor)
//! - Remote fetch timeout and output JPEG quality
//! - Defaults for position and opacity used by the CLI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CENTER_BOTTOM_MARGIN, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_JPEG_QUALITY, DEFAULT_MARGIN,
    DEFAULT_OPACITY, DEFAULT_SIZE_RATIO,
};

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_size_ratio() -> f64 {
    DEFAULT_SIZE_RATIO
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

fn default_center_bottom_margin() -> u32 {
    DEFAULT_CENTER_BOTTOM_MARGIN
}

fn default_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

/// Anchor position of the overlay on the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
    /// Horizontally centered, resting just above the bottom edge
    Center,
}

impl WatermarkPosition {
    /// Every supported position, in menu order.
    pub const ALL: [WatermarkPosition; 5] = [
        Self::BottomRight,
        Self::BottomLeft,
        Self::TopRight,
        Self::TopLeft,
        Self::Center,
    ];

    /// The kebab-case name accepted by [`FromStr`] and the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::Center => "center",
        }
    }

    /// Parse a position name, falling back to bottom-right for anything
    /// unrecognized.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(
                position = value,
                fallback = Self::default().as_str(),
                "Unrecognized watermark position, using fallback"
            );
            Self::default()
        })
    }
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatermarkPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "Unknown watermark position '{}', expected one of: {}",
                    s,
                    Self::ALL.map(|p| p.as_str()).join(", ")
                )
            })
    }
}

/// Tunables for the watermark engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// Timeout for remote image fetches in seconds (default: 30)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Overlay long edge relative to the base's shorter side (default: 0.3)
    #[serde(default = "default_size_ratio")]
    pub size_ratio: f64,

    /// Edge margin in pixels (default: 20)
    #[serde(default = "default_margin")]
    pub margin: u32,

    /// Bottom margin for the center anchor in pixels (default: 30)
    #[serde(default = "default_center_bottom_margin")]
    pub center_bottom_margin: u32,

    /// Output JPEG quality 1-100 (default: 95)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Position used when the caller does not pick one
    #[serde(default)]
    pub default_position: WatermarkPosition,

    /// Opacity used when the caller does not pick one (default: 1.0)
    #[serde(default = "default_opacity")]
    pub default_opacity: f32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            size_ratio: default_size_ratio(),
            margin: default_margin(),
            center_bottom_margin: default_center_bottom_margin(),
            quality: default_quality(),
            default_position: WatermarkPosition::default(),
            default_opacity: default_opacity(),
        }
    }
}

impl WatermarkConfig {
    /// Remote fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate the watermark configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("Watermark fetch_timeout_secs must be greater than 0".to_string());
        }

        // Check for NaN/Infinity and valid range
        if !self.size_ratio.is_finite() || self.size_ratio <= 0.0 || self.size_ratio > 1.0 {
            return Err(format!(
                "Watermark size_ratio must be a finite value in (0.0, 1.0], got {}",
                self.size_ratio
            ));
        }

        if !(1..=100).contains(&self.quality) {
            return Err(format!(
                "Watermark quality must be between 1 and 100, got {}",
                self.quality
            ));
        }

        if !self.default_opacity.is_finite() || !(0.0..=1.0).contains(&self.default_opacity) {
            return Err(format!(
                "Watermark default_opacity must be a finite value between 0.0 and 1.0, got {}",
                self.default_opacity
            ));
        }

        Ok(())
    }
}
