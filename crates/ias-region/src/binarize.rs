//! Color tolerance binarization

use crate::RegionResult;
use ias_core::{Color, Image, Mask};

/// Mark every pixel of `image` that matches `target` within `tolerance`.
///
/// A pixel becomes 255 when each of its three channels differs from the
/// matching channel of `target` by at most `tolerance`, and 0 otherwise.
/// The output has the same dimensions as `image`.
pub fn binarize(image: &Image, target: Color, tolerance: u8) -> RegionResult<Mask> {
    let data = image
        .data()
        .iter()
        .map(|&pixel| {
            if pixel.within_tolerance(target, tolerance) {
                255
            } else {
                0
            }
        })
        .collect();

    let mask = Mask::from_vec(image.width(), image.height(), data)?;
    tracing::trace!(
        tolerance,
        matched = mask.count_value(255),
        "binarize"
    );
    Ok(mask)
}
