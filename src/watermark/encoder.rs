//! Final encoding of a composited image.
//!
//! The composite is flattened onto white using its own alpha, so the output
//! never carries transparency, then written as baseline JPEG.

use super::WatermarkError;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};
use std::io::Cursor;

/// Flatten `image` onto white and encode it as JPEG at `quality`.
///
/// Returns the complete encoding or an error, never partial output.
pub fn encode(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, WatermarkError> {
    let flat = flatten_onto_white(image);
    encode_jpeg(&flat, quality)
}

/// Composite an RGBA image onto an opaque white canvas.
pub fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y);
        let alpha = px[3] as u32;
        let over_white = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([over_white(px[0]), over_white(px[1]), over_white(px[2])])
    })
}

/// Encode an RGB image as JPEG.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, WatermarkError> {
    let mut output = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100));

    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .map_err(|e| WatermarkError::EncodeError(format!("jpeg: {}", e)))?;

    Ok(output.into_inner())
}
