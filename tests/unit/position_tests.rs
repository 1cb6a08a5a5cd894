// Placement geometry tests

use brandmark::watermark::{
    calculate_overlay_size, calculate_position, ImageDimensions, Margins, PlacementPosition,
    WatermarkPosition,
};
use rstest::rstest;

fn dims(width: u32, height: u32) -> ImageDimensions {
    ImageDimensions::new(width, height)
}

#[rstest]
#[case::bottom_right(WatermarkPosition::BottomRight, 740, 660)]
#[case::bottom_left(WatermarkPosition::BottomLeft, 20, 660)]
#[case::top_right(WatermarkPosition::TopRight, 740, 20)]
#[case::top_left(WatermarkPosition::TopLeft, 20, 20)]
#[case::center(WatermarkPosition::Center, 380, 650)]
fn test_positions_for_landscape_base(
    #[case] position: WatermarkPosition,
    #[case] x: i32,
    #[case] y: i32,
) {
    let base = dims(1000, 800);
    let overlay = calculate_overlay_size(&base, &dims(200, 100), 0.3);
    assert_eq!(overlay, dims(240, 120));

    let at = calculate_position(position, &base, &overlay, Margins::default());
    assert_eq!(at, PlacementPosition::new(x, y));
}

#[test]
fn test_tall_logo_pins_height() {
    let overlay = calculate_overlay_size(&dims(600, 900), &dims(100, 200), 0.3);
    assert_eq!(overlay, dims(90, 180));
}

#[test]
fn test_square_logo_on_square_base() {
    let overlay = calculate_overlay_size(&dims(500, 500), &dims(64, 64), 0.3);
    assert_eq!(overlay, dims(150, 150));
}

#[test]
fn test_overlay_never_exceeds_ratio_of_short_side() {
    for (w, h) in [(1920, 1080), (1080, 1920), (333, 777), (4000, 3000)] {
        let base = dims(w, h);
        let limit = (w.min(h) as f64 * 0.3).floor() as u32;
        for logo in [dims(300, 100), dims(100, 300), dims(128, 128), dims(7, 5)] {
            let overlay = calculate_overlay_size(&base, &logo, 0.3);
            assert!(overlay.width <= limit, "{:?} on {:?}", logo, base);
            assert!(overlay.height <= limit, "{:?} on {:?}", logo, base);
        }
    }
}

#[test]
fn test_tiny_base_yields_empty_overlay() {
    let overlay = calculate_overlay_size(&dims(3, 3), &dims(200, 100), 0.3);
    assert!(overlay.is_empty());
}

#[test]
fn test_oversized_overlay_gets_negative_offsets() {
    let base = dims(30, 30);
    let overlay = dims(25, 25);
    let at = calculate_position(WatermarkPosition::BottomRight, &base, &overlay, Margins::default());
    assert_eq!(at, PlacementPosition::new(-15, -15));
}

#[test]
fn test_custom_margins() {
    let margins = Margins {
        edge: 0,
        center_bottom: 0,
    };
    let base = dims(100, 100);
    let overlay = dims(30, 10);
    assert_eq!(
        calculate_position(WatermarkPosition::BottomRight, &base, &overlay, margins),
        PlacementPosition::new(70, 90)
    );
    assert_eq!(
        calculate_position(WatermarkPosition::Center, &base, &overlay, margins),
        PlacementPosition::new(35, 90)
    );
}
