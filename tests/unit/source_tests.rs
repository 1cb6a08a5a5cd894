// Image reference resolution and decoding tests

use brandmark::watermark::image_fetcher::decode_image;
use brandmark::watermark::{flatten_to_rgb, ImageSource, WatermarkError};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn png_bytes(image: RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

#[test]
fn test_file_uri_takes_precedence() {
    assert_eq!(
        ImageSource::resolve("file:///tmp/does-not-exist.png"),
        ImageSource::FileUri(PathBuf::from("/tmp/does-not-exist.png"))
    );
}

#[test]
fn test_existing_path_is_local() {
    let file = NamedTempFile::new().unwrap();
    let reference = file.path().to_str().unwrap();
    let source = ImageSource::resolve(reference);
    assert_eq!(source, ImageSource::LocalPath(file.path().to_path_buf()));
    assert_eq!(source.kind(), "local_path");
}

#[test]
fn test_everything_else_is_remote() {
    for reference in ["https://cdn.example.com/p.jpg", "not/a/real/path.png", ""] {
        assert_eq!(
            ImageSource::resolve(reference),
            ImageSource::Remote(reference.to_string())
        );
    }
}

#[test]
fn test_decode_ignores_misleading_extension() {
    let bytes = png_bytes(RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255])));
    let image = decode_image(&bytes, "https://cdn.example.com/photo.jpg?v=2").unwrap();
    assert_eq!((image.width(), image.height()), (4, 3));
}

#[test]
fn test_decode_garbage_is_acquisition_error() {
    let err = decode_image(b"definitely not an image", "blob.bin").unwrap_err();
    assert!(matches!(err, WatermarkError::AcquisitionError(_)));
}

#[test]
fn test_flatten_to_rgb_composes_over_white() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
    let rgb = flatten_to_rgb(image);
    assert!(rgb.pixels().all(|p| p.0 == [255, 255, 255]));

    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255])));
    assert_eq!(flatten_to_rgb(image).get_pixel(0, 0).0, [10, 20, 30]);
}
