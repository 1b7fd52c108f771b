//! Dilation and erosion by repeated correlation
//!
//! These are not structuring-element morphology. Both operations are
//! built from [`correlate`](crate::correlate()) and
//! [`threshold`](crate::threshold()):
//!
//! - **Dilation**: correlate with an all-ones `size x size` kernel. Sums
//!   saturate at 255, so any pixel with a bright neighbor in the window
//!   grows toward foreground. No thresholding.
//! - **Erosion**: correlate with an all-ones kernel scaled by
//!   `1 / ERODE_NORMALIZER`, then threshold at [`ERODE_CUTOFF`]. Only
//!   pixels whose window is (almost) fully saturated survive.
//!
//! The erosion normalizer is 9 for every kernel size. With `size != 3`
//! the windowed average is no longer an average; callers relying on a
//! non-default size get that behavior as-is.

use crate::{FilterResult, Kernel, apply_kernel, threshold};
use ias_core::Mask;

/// Fixed divisor applied to the erosion kernel, independent of its size.
pub const ERODE_NORMALIZER: f64 = 9.0;

/// Cutoff applied after each erosion pass.
pub const ERODE_CUTOFF: u8 = 254;

/// Options for dilation and erosion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphOptions {
    /// Kernel side length (odd)
    pub size: u32,
    /// Number of passes
    pub repeats: usize,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            size: 3,
            repeats: 1,
        }
    }
}

impl MorphOptions {
    /// Set the kernel side length
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the number of passes
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }
}

/// Grow foreground regions in place.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`](crate::FilterError::InvalidKernel)
/// if `options.size` is zero or even; the mask is not modified in that case.
pub fn dilate(mask: &mut Mask, options: &MorphOptions) -> FilterResult<()> {
    let kernel = Kernel::ones(options.size)?;
    for _ in 0..options.repeats {
        apply_kernel(mask, &kernel);
    }
    tracing::trace!(
        size = options.size,
        repeats = options.repeats,
        foreground = mask.count_value(255),
        "dilate"
    );
    Ok(())
}

/// Shrink foreground regions in place.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`](crate::FilterError::InvalidKernel)
/// if `options.size` is zero or even; the mask is not modified in that case.
pub fn erode(mask: &mut Mask, options: &MorphOptions) -> FilterResult<()> {
    let kernel = Kernel::ones(options.size)?.scaled(1.0 / ERODE_NORMALIZER);
    for _ in 0..options.repeats {
        apply_kernel(mask, &kernel);
        threshold(mask, ERODE_CUTOFF);
    }
    tracing::trace!(
        size = options.size,
        repeats = options.repeats,
        foreground = mask.count_value(255),
        "erode"
    );
    Ok(())
}
