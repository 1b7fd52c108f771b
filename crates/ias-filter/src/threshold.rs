//! Fixed-cutoff thresholding

use ias_core::Mask;

/// Binarize `mask` in place: values `>= cutoff` become 255, the rest 0.
///
/// A value equal to the cutoff maps to foreground. An empty mask is left
/// untouched.
pub fn threshold(mask: &mut Mask, cutoff: u8) {
    for value in mask.data_mut() {
        *value = if *value >= cutoff { 255 } else { 0 };
    }
}
