//! Correlation operations
//!
//! Weighted neighborhood sums of a mask against a [`Kernel`], without
//! kernel flipping.
//!
//! # Border handling
//!
//! Kernel taps that fall outside the mask are skipped: they are neither
//! zero-padded nor reflected, so border pixels receive a partial,
//! unnormalized sum.
//!
//! # Output range
//!
//! Sums below 0 become 0, sums above 255 become 255, anything else is
//! truncated toward zero.

use crate::Kernel;
use ias_core::Mask;

/// Correlate `mask` with `kernel`, producing a new mask.
///
/// Reads only from `mask`, so no output value depends on an already
/// updated neighbor. If either the mask or the kernel is empty the result
/// is an unchanged copy of `mask`.
pub fn correlate(mask: &Mask, kernel: &Kernel) -> Mask {
    if mask.is_empty() || kernel.is_empty() {
        return mask.clone();
    }

    let mut out = mask.create_template();

    for y in 0..mask.height() {
        let out_row = out.row_mut(y);
        for (x, out_val) in out_row.iter_mut().enumerate() {
            let sum = correlate_at(mask, kernel, x as u32, y);
            *out_val = clamp_sum(sum);
        }
    }

    out
}

/// Replace `mask` with its correlation against `kernel`.
pub fn apply_kernel(mask: &mut Mask, kernel: &Kernel) {
    if mask.is_empty() || kernel.is_empty() {
        return;
    }
    *mask = correlate(mask, kernel);
}

/// Raw (unclamped) weighted sum for the kernel centered at (x, y).
pub fn correlate_at(mask: &Mask, kernel: &Kernel, x: u32, y: u32) -> f64 {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let kcx = kernel.center_x() as i64;
    let kcy = kernel.center_y() as i64;
    let weights = kernel.data();
    let kw = kernel.width() as usize;

    let mut sum = 0.0f64;
    for ky in 0..kernel.height() as i64 {
        let my = y as i64 + (ky - kcy);
        if my < 0 || my >= h {
            continue;
        }
        let row = mask.row(my as u32);
        let krow = &weights[ky as usize * kw..(ky as usize + 1) * kw];
        for (kx, &weight) in krow.iter().enumerate() {
            let mx = x as i64 + (kx as i64 - kcx);
            if mx < 0 || mx >= w {
                continue;
            }
            sum += row[mx as usize] as f64 * weight;
        }
    }
    sum
}

#[inline]
fn clamp_sum(sum: f64) -> u8 {
    if sum < 0.0 {
        0
    } else if sum > 255.0 {
        255
    } else {
        sum as u8
    }
}
