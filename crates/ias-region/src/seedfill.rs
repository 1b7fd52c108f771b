//! Scanline seed fill
//!
//! Grows a region from a start pixel through 4-connected pixels holding
//! the *seed* value, relabelling them with the *target* value. The fill
//! uses an explicit stack of seed points and horizontal scans, so memory
//! grows with the image rather than with call depth.
//!
//! Pixels touched by a scan that hold neither the seed nor the target
//! value are forced to the *background* value, and once the stack drains
//! every seed-valued pixel left in the mask (i.e. every pixel outside the
//! reached component) is cleared to background as well.

use crate::{RegionError, RegionResult};
use ias_core::Mask;

/// Intensity values used by [`floodfill`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillValues {
    /// Value to grow through
    pub seed: u8,
    /// Value assigned to the reached component
    pub target: u8,
    /// Value assigned to everything else the fill touches
    pub background: u8,
}

impl Default for FillValues {
    fn default() -> Self {
        Self {
            seed: 255,
            target: 127,
            background: 0,
        }
    }
}

impl FillValues {
    /// Set the value to grow through
    pub fn with_seed(mut self, seed: u8) -> Self {
        self.seed = seed;
        self
    }

    /// Set the value assigned to the reached component
    pub fn with_target(mut self, target: u8) -> Self {
        self.target = target;
        self
    }

    /// Set the background value
    pub fn with_background(mut self, background: u8) -> Self {
        self.background = background;
        self
    }
}

/// Outcome of visiting one pixel during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// Pixel was seed-valued and now holds the target
    Filled,
    /// Pixel already held the target
    Done,
    /// Pixel held something else and was set to background
    Blocked,
}

#[inline]
fn visit(mask: &mut Mask, x: u32, y: u32, values: &FillValues) -> Visit {
    let current = mask.get_unchecked(x, y);
    if current == values.target {
        Visit::Done
    } else if current == values.seed {
        mask.set_unchecked(x, y, values.target);
        Visit::Filled
    } else {
        mask.set_unchecked(x, y, values.background);
        Visit::Blocked
    }
}

/// Flood fill `mask` in place starting from `(x, y)`.
///
/// Each popped point is scanned westward starting one column left of it,
/// then eastward starting at the point itself. A scan stops at the first
/// pixel that is not seed-valued; every filled pixel pushes its upper and
/// lower neighbors. The westward scan starts left of the point without
/// looking at the point itself, so a seed run directly left of a popped
/// point is reached even when that point is not seed-valued (including
/// the start pixel).
///
/// If `values.seed == values.target` nothing is modified.
///
/// # Returns
///
/// The number of pixels set to `values.target`.
///
/// # Errors
///
/// Returns [`RegionError::EmptyMask`] for an empty mask and
/// [`RegionError::InvalidSeed`] if `(x, y)` lies outside the mask. The
/// mask is not modified in either case.
pub fn floodfill(mask: &mut Mask, x: u32, y: u32, values: &FillValues) -> RegionResult<usize> {
    if mask.is_empty() {
        return Err(RegionError::EmptyMask);
    }
    let (width, height) = mask.dimensions();
    if x >= width || y >= height {
        return Err(RegionError::InvalidSeed { x, y });
    }

    if values.seed == values.target {
        return Ok(0);
    }

    let mut filled = 0usize;
    let mut stack = vec![(x, y)];

    while let Some((x0, y0)) = stack.pop() {
        let push_neighbors = |stack: &mut Vec<(u32, u32)>, x: u32| {
            if y0 > 0 {
                stack.push((x, y0 - 1));
            }
            if y0 + 1 < height {
                stack.push((x, y0 + 1));
            }
        };

        // West
        for x in (0..x0).rev() {
            if visit(mask, x, y0, values) != Visit::Filled {
                break;
            }
            filled += 1;
            push_neighbors(&mut stack, x);
        }

        // East
        for x in x0..width {
            if visit(mask, x, y0, values) != Visit::Filled {
                break;
            }
            filled += 1;
            push_neighbors(&mut stack, x);
        }
    }

    mask.change_color(values.seed, values.background);

    tracing::debug!(x, y, filled, "flood fill");
    Ok(filled)
}
