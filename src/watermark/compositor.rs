//! Watermark compositor for blending the logo onto a base image.
//!
//! The pipeline for one call:
//!
//! 1. Size the overlay from the base's shorter side (see [`calculate_overlay_size`]).
//! 2. Resize a copy of the logo with Lanczos3 on alpha-premultiplied pixels.
//! 3. Scale the overlay's alpha by the requested opacity.
//! 4. Source-over blend it onto an RGBA copy of the base at the anchor offset,
//!    clipping anything that falls outside the base.
//!
//! # Example
//!
//! ```ignore
//! use brandmark::watermark::{composite, LogoAsset, WatermarkConfig, WatermarkPosition};
//!
//! let result = composite(&base, &logo, WatermarkPosition::BottomRight, 0.8, &config)?;
//! ```

use super::position::{
    calculate_overlay_size, calculate_position, ImageDimensions, Margins, PlacementPosition,
};
use super::{LogoAsset, WatermarkConfig, WatermarkError, WatermarkPosition};
use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::buffer::ConvertBuffer;
use image::{Rgba, RgbImage, RgbaImage};
use std::num::NonZeroU32;

/// Composite the logo onto `base` and return the blended RGBA image.
///
/// # Errors
///
/// Returns `WatermarkError::CompositingError` if the opacity is not finite or
/// the computed overlay has a zero dimension.
pub fn composite(
    base: &RgbImage,
    logo: &LogoAsset,
    position: WatermarkPosition,
    opacity: f32,
    config: &WatermarkConfig,
) -> Result<RgbaImage, WatermarkError> {
    if !opacity.is_finite() {
        return Err(WatermarkError::CompositingError(format!(
            "Opacity must be finite, got {}",
            opacity
        )));
    }
    let opacity = opacity.clamp(0.0, 1.0);

    let base_dims = ImageDimensions::from(base);
    let overlay = prepare_overlay(logo, &base_dims, opacity, config.size_ratio)?;
    let overlay_dims = ImageDimensions::from(&overlay);

    let margins = Margins {
        edge: config.margin,
        center_bottom: config.center_bottom_margin,
    };
    let at = calculate_position(position, &base_dims, &overlay_dims, margins);

    tracing::debug!(
        base_width = base_dims.width,
        base_height = base_dims.height,
        overlay_width = overlay_dims.width,
        overlay_height = overlay_dims.height,
        x = at.x,
        y = at.y,
        %position,
        opacity,
        "Compositing watermark"
    );

    let mut target = to_rgba(base);
    blend_overlay(&mut target, &overlay, at);
    Ok(target)
}

/// Resize the logo for `base` and apply `opacity` to its alpha channel.
pub fn prepare_overlay(
    logo: &LogoAsset,
    base: &ImageDimensions,
    opacity: f32,
    size_ratio: f64,
) -> Result<RgbaImage, WatermarkError> {
    let logo_dims = ImageDimensions::new(logo.width(), logo.height());
    let size = calculate_overlay_size(base, &logo_dims, size_ratio);
    if size.is_empty() {
        return Err(WatermarkError::CompositingError(format!(
            "Overlay would be {}x{} (logo {}x{}, base {}x{})",
            size.width, size.height, logo_dims.width, logo_dims.height, base.width, base.height
        )));
    }

    let mut overlay = resize_logo(logo.image(), size.width, size.height)?;
    if opacity < 1.0 {
        apply_opacity(&mut overlay, opacity);
    }
    Ok(overlay)
}

/// Resize an RGBA image with Lanczos3, premultiplying alpha around the resize
/// so transparent pixels do not bleed their color into the edges.
fn resize_logo(
    logo: &RgbaImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, WatermarkError> {
    let resize_err = |msg: String| WatermarkError::CompositingError(msg);

    let src_width = NonZeroU32::new(logo.width())
        .ok_or_else(|| resize_err("Logo width is 0".to_string()))?;
    let src_height = NonZeroU32::new(logo.height())
        .ok_or_else(|| resize_err("Logo height is 0".to_string()))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| resize_err("Target width is 0".to_string()))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| resize_err("Target height is 0".to_string()))?;

    let mut src_image =
        Image::from_vec_u8(src_width, src_height, logo.as_raw().clone(), PixelType::U8x4)
            .map_err(|e| resize_err(format!("Failed to create source image: {:?}", e)))?;

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| resize_err(format!("Failed to premultiply alpha: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    {
        let mut dst_view = dst_image.view_mut();

        let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
        resizer
            .resize(&src_image.view(), &mut dst_view)
            .map_err(|e| resize_err(format!("Resize operation failed: {:?}", e)))?;

        alpha_mul_div
            .divide_alpha_inplace(&mut dst_view)
            .map_err(|e| resize_err(format!("Failed to unpremultiply alpha: {:?}", e)))?;
    }

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| resize_err("Failed to create output image buffer".to_string()))
}

/// Multiply every alpha sample by `opacity`, truncating.
pub fn apply_opacity(image: &mut RgbaImage, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    for pixel in image.pixels_mut() {
        pixel[3] = (pixel[3] as f32 * opacity) as u8;
    }
}

/// Promote an opaque RGB image to RGBA with full alpha.
pub fn to_rgba(base: &RgbImage) -> RgbaImage {
    base.convert()
}

/// Blend `overlay` onto `target` with its top-left corner at `at`.
///
/// Only the part of the overlay that intersects the target is drawn.
pub fn blend_overlay(target: &mut RgbaImage, overlay: &RgbaImage, at: PlacementPosition) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let wm_width = overlay.width() as i32;
    let wm_height = overlay.height() as i32;

    // Calculate the visible region (clamp to target bounds)
    let x_start = at.x.max(0);
    let y_start = at.y.max(0);
    let x_end = (at.x + wm_width).min(target_width);
    let y_end = (at.y + wm_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let wx = (tx - at.x) as u32;
            let wy = (ty - at.y) as u32;

            let wm_pixel = overlay.get_pixel(wx, wy);
            let target_pixel = target.get_pixel(tx as u32, ty as u32);

            let blended = blend_pixels(*target_pixel, *wm_pixel);
            target.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Porter-Duff "over": result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    if foreground[3] == 0 {
        return background;
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
