//! ias-filter - Mask filtering operations
//!
//! This crate provides the filtering primitives region analysis is built
//! from:
//!
//! - Correlation of a [`Mask`](ias_core::Mask) with an arbitrary [`Kernel`]
//! - Fixed-cutoff thresholding
//! - Dilation and erosion approximated by repeated correlation
//! - Laplacian edge detection

pub mod correlate;
pub mod edge;
mod error;
pub mod kernel;
pub mod morph;
pub mod threshold;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use correlate::{apply_kernel, correlate, correlate_at};
pub use edge::{EDGE_CUTOFF, detect_edges};
pub use morph::{ERODE_CUTOFF, ERODE_NORMALIZER, MorphOptions, dilate, erode};
pub use threshold::threshold;
