//! Seed fill regression test
//!
//! Binarizes a synthetic image holding two same-colored blobs and checks
//! that a fill from inside one blob keeps only that blob.
//!
//! Run with:
//! ```
//! cargo test -p ias-region --test seedfill_reg
//! ```

use ias_core::{Color, Image, Mask};
use ias_region::{FillValues, RegionError, binarize, floodfill};
use ias_test::RegParams;

const BACKGROUND: Color = Color::bgr(250, 250, 250);
const BLOB: Color = Color::bgr(20, 40, 180);

/// 60x40 image: an L-shaped blob on the left, a square blob on the right,
/// both in slightly different shades of the same red.
fn two_blobs() -> Image {
    let mut image = Image::filled(60, 40, BACKGROUND)
        .unwrap()
        .try_into_mut()
        .unwrap();
    image.fill_rect(5, 5, 12, 35, BLOB);
    image.fill_rect(12, 28, 30, 35, Color::bgr(24, 38, 176));
    image.fill_rect(40, 10, 55, 25, Color::bgr(18, 42, 182));
    image.into()
}

#[test]
fn seedfill_reg() {
    let mut rp = RegParams::new("seedfill");
    let image = two_blobs();
    let values = FillValues::default();

    let l_area = 7 * 30 + 18 * 7;
    let square_area = 15 * 15;

    // Exact color only matches the vertical bar of the L.
    let mask = binarize(&image, BLOB, 0).unwrap();
    rp.compare_values((7 * 30) as f64, mask.count_value(255) as f64, 0.0);

    // With tolerance, both blobs match.
    let mut mask = binarize(&image, BLOB, 5).unwrap();
    rp.compare_values((l_area + square_area) as f64, mask.count_value(255) as f64, 0.0);

    // Fill from inside the L: the square is cleared.
    let filled = floodfill(&mut mask, 8, 20, &values).unwrap();
    rp.compare_values(l_area as f64, filled as f64, 0.0);
    rp.compare_values(l_area as f64, mask.count_value(127) as f64, 0.0);
    rp.compare_values(0.0, mask.count_value(255) as f64, 0.0);
    rp.compare_values(0.0, mask.get(47, 17).unwrap() as f64, 0.0);

    // A second identical fill changes nothing.
    let once = mask.clone();
    let filled = floodfill(&mut mask, 8, 20, &values).unwrap();
    rp.compare_values(0.0, filled as f64, 0.0);
    rp.compare_masks(&once, &mask);

    // Fill from the square instead.
    let mut mask = binarize(&image, BLOB, 5).unwrap();
    floodfill(&mut mask, 47, 17, &values).unwrap();
    mask.change_color(values.target, 255);
    let mut expected = Mask::new(60, 40).unwrap();
    for y in 10..25 {
        for x in 40..55 {
            expected.set(x, y, 255).unwrap();
        }
    }
    rp.compare_masks(&expected, &mask);

    // A start on the background reaches nothing.
    let mut mask = binarize(&image, BLOB, 5).unwrap();
    let filled = floodfill(&mut mask, 35, 5, &values).unwrap();
    rp.compare_values(0.0, filled as f64, 0.0);
    rp.compare_values(0.0, mask.count_value(255) as f64, 0.0);

    // Out-of-range start is rejected without touching the mask.
    let mut mask = binarize(&image, BLOB, 5).unwrap();
    let result = floodfill(&mut mask, 60, 0, &values);
    rp.compare_values(
        1.0,
        if matches!(result, Err(RegionError::InvalidSeed { x: 60, y: 0 })) {
            1.0
        } else {
            0.0
        },
        0.0,
    );
    rp.compare_values((l_area + square_area) as f64, mask.count_value(255) as f64, 0.0);

    assert!(rp.cleanup(), "seedfill regression test failed");
}
