//! Region analysis regression test
//!
//! Runs the full load, region, perimeter and smooth perimeter sequence on
//! a synthetic image written to and read back from disk.
//!
//! Run with:
//! ```
//! cargo test -p ias --test analysis_reg
//! ```

use ias::filter::detect_edges;
use ias::io::ImageFormat;
use ias::{Color, Image, Mask, Point, RegionAnalyzer};
use ias_test::{RegParams, regout_dir};

const BACKGROUND: Color = Color::bgr(240, 240, 240);
const PLATE: Color = Color::bgr(30, 60, 200);

/// 64x48 image: a 30x20 plate with a one-pixel spur on its right side and
/// a detached speck of the same color.
fn plate_image() -> Image {
    let mut image = Image::filled(64, 48, BACKGROUND)
        .unwrap()
        .try_into_mut()
        .unwrap();
    image.fill_rect(10, 10, 40, 30, PLATE);
    image.set_pixel(40, 20, PLATE).unwrap();
    image.set_pixel(50, 5, PLATE).unwrap();
    image.into()
}

fn plate_mask() -> Mask {
    let mut mask = Mask::new(64, 48).unwrap();
    for y in 10..30 {
        for x in 10..40 {
            mask.set(x, y, 255).unwrap();
        }
    }
    mask
}

#[test]
fn analysis_reg() {
    let mut rp = RegParams::new("analysis");

    let input = format!("{}/analysis_input.png", regout_dir());
    ias::io::write_image(&plate_image(), &input).unwrap();

    let mut analyzer = RegionAnalyzer::new();
    analyzer.load(&input).unwrap();

    // Sampling excludes the last column and row.
    let sampled = analyzer.sample_color(Point::new(15, 15));
    rp.compare_values(1.0, (sampled == PLATE) as u8 as f64, 0.0);
    let sampled = analyzer.sample_color(Point::new(63, 0));
    rp.compare_values(1.0, (sampled == Color::ZERO) as u8 as f64, 0.0);

    // Region: plate plus spur, speck excluded.
    analyzer.find_region(Point::new(15, 15), PLATE, 8);
    rp.compare_values(601.0, analyzer.result().count_value(255) as f64, 0.0);
    rp.compare_values(0.0, analyzer.result().get(50, 5).unwrap() as f64, 0.0);
    rp.write_mask_and_check(analyzer.result(), ImageFormat::Png)
        .unwrap();

    let stored = format!("{}/analysis_region.bmp", regout_dir());
    rp.compare_values(1.0, analyzer.store_result(&stored).unwrap() as u8 as f64, 0.0);

    // Sharp perimeter keeps the spur.
    analyzer.find_perimeter();
    rp.compare_values(97.0, analyzer.result().count_value(255) as f64, 0.0);
    rp.compare_values(255.0, analyzer.result().get(40, 20).unwrap() as f64, 0.0);
    rp.write_mask_and_check(analyzer.result(), ImageFormat::Png)
        .unwrap();

    // Smooth perimeter drops the spur and matches the plate outline.
    analyzer.find_region(Point::new(15, 15), PLATE, 8);
    analyzer.find_smooth_perimeter();
    let mut outline = plate_mask();
    detect_edges(&mut outline);
    rp.compare_values(96.0, outline.count_value(255) as f64, 0.0);
    rp.compare_masks(&outline, analyzer.result());
    rp.write_mask_and_check(analyzer.result(), ImageFormat::Png)
        .unwrap();

    // A seed on the background gives an all-zero result, not an empty one.
    analyzer.find_region(Point::new(0, 0), PLATE, 8);
    rp.compare_values(0.0, analyzer.result().is_empty() as u8 as f64, 0.0);
    rp.compare_values(0.0, analyzer.result().count_value(255) as f64, 0.0);

    // A failed load leaves nothing to work on.
    assert!(analyzer.load(format!("{}/missing.png", regout_dir())).is_err());
    analyzer.find_region(Point::new(15, 15), PLATE, 8);
    rp.compare_values(1.0, analyzer.result().is_empty() as u8 as f64, 0.0);
    analyzer.find_perimeter();
    rp.compare_values(1.0, analyzer.result().is_empty() as u8 as f64, 0.0);
    let skipped = format!("{}/analysis_skipped.png", regout_dir());
    rp.compare_values(0.0, analyzer.store_result(&skipped).unwrap() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "analysis regression test failed");
}
