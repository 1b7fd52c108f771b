//! ias-region - Region extraction for IAS
//!
//! This crate turns a color image into a single-region mask:
//!
//! - **Binarization** - Mark pixels whose channels all lie within a
//!   tolerance of a target color
//! - **Seed fill** - Non-recursive scanline flood fill that keeps only the
//!   4-connected component reachable from a start pixel
//!
//! # Examples
//!
//! ```
//! use ias_core::{Color, Image};
//! use ias_region::{FillValues, binarize, floodfill};
//!
//! let image = Image::filled(8, 8, Color::bgr(10, 200, 30)).unwrap();
//! let mut mask = binarize(&image, Color::bgr(12, 198, 30), 4).unwrap();
//! assert_eq!(mask.count_value(255), 64);
//!
//! let filled = floodfill(&mut mask, 3, 3, &FillValues::default()).unwrap();
//! assert_eq!(filled, 64);
//! assert_eq!(mask.count_value(127), 64);
//! ```

pub mod binarize;
mod error;
pub mod seedfill;

// Re-export core types
pub use ias_core;

pub use error::{RegionError, RegionResult};

pub use binarize::binarize;
pub use seedfill::{FillValues, floodfill};
