//! Mask filtering regression test
//!
//! Exercises correlation, thresholding, dilation/erosion and edge
//! detection on synthetic masks.
//!
//! Run with:
//! ```
//! cargo test -p ias-filter --test filter_reg
//! ```

use ias_core::Mask;
use ias_filter::{
    Kernel, MorphOptions, apply_kernel, correlate, detect_edges, dilate, erode, threshold,
};
use ias_io::ImageFormat;
use ias_test::RegParams;

/// 40x30 mask with a filled 20x14 rectangle and one isolated speck.
fn rect_with_speck() -> Mask {
    let mut mask = Mask::new(40, 30).unwrap();
    for y in 8..22 {
        for x in 10..30 {
            mask.set(x, y, 255).unwrap();
        }
    }
    mask.set(35, 3, 255).unwrap();
    mask
}

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    // Correlation with an empty kernel or on an empty mask is a no-op.
    let mask = rect_with_speck();
    let out = correlate(&mask, &Kernel::empty());
    rp.compare_masks(&mask, &out);
    let out = correlate(&Mask::empty(), &Kernel::ones(3).unwrap());
    rp.compare_values(1.0, if out.is_empty() { 1.0 } else { 0.0 }, 0.0);

    // Uniform 0.2 weights over a single bright pixel: 255 * 0.2 = 51.
    let mut spot = Mask::new(5, 5).unwrap();
    spot.set(2, 2, 255).unwrap();
    apply_kernel(&mut spot, &Kernel::filled(3, 3, 0.2).unwrap());
    rp.compare_values(51.0, spot.get(2, 2).unwrap() as f64, 0.0);
    rp.compare_values(9.0, spot.count_value(51) as f64, 0.0);

    // Threshold boundary
    let mut mask = Mask::from_vec(3, 1, vec![120, 130, 160]).unwrap();
    threshold(&mut mask, 130);
    rp.compare_masks(&Mask::from_vec(3, 1, vec![0, 255, 255]).unwrap(), &mask);

    // Erosion removes the speck and one pixel from each side of the rectangle.
    let mut mask = rect_with_speck();
    erode(&mut mask, &MorphOptions::default()).unwrap();
    rp.compare_values((18 * 12) as f64, mask.count_value(255) as f64, 0.0);
    rp.compare_values(0.0, mask.get(35, 3).unwrap() as f64, 0.0);

    // Dilation brings the rectangle back to its original extent.
    dilate(&mut mask, &MorphOptions::default()).unwrap();
    rp.compare_values((20 * 14) as f64, mask.count_value(255) as f64, 0.0);
    rp.write_mask_and_check(&mask, ImageFormat::Png).unwrap();

    // Edge detection keeps a one-pixel outline of the rectangle.
    detect_edges(&mut mask);
    let outline = 2 * 20 + 2 * (14 - 2);
    rp.compare_values(outline as f64, mask.count_value(255) as f64, 0.0);
    rp.compare_values(0.0, mask.get(20, 15).unwrap() as f64, 0.0);
    rp.compare_values(255.0, mask.get(10, 8).unwrap() as f64, 0.0);
    rp.write_mask_and_check(&mask, ImageFormat::Png).unwrap();

    assert!(rp.cleanup(), "filter regression test failed");
}
