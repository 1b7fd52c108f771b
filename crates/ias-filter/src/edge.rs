//! Edge detection
//!
//! The sharp perimeter extractor: a 3x3 Laplacian correlation followed by
//! a fixed threshold. Flat regions correlate to about zero and fall below
//! the cutoff; region boundaries give large responses and survive.

use crate::{Kernel, apply_kernel, threshold};
use ias_core::Mask;

/// Cutoff applied to the Laplacian response.
pub const EDGE_CUTOFF: u8 = 128;

/// Replace `mask` with its thresholded Laplacian response.
pub fn detect_edges(mask: &mut Mask) {
    apply_kernel(mask, &Kernel::laplacian());
    threshold(mask, EDGE_CUTOFF);
    tracing::trace!(edge_pixels = mask.count_value(255), "edges detected");
}
