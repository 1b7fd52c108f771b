//! IAS - Image area selection
//!
//! Locates a color-homogeneous region in a raster image starting from a
//! seed pixel and derives its sharp or smoothed perimeter.
//!
//! - [`RegionAnalyzer`] - holds the source image and the last result mask
//! - [`display`] - preview sinks and the side-by-side join view
//! - Re-exported building blocks: [`filter`], [`io`], [`region`]
//!
//! # Example
//!
//! ```
//! use ias::{Color, Image, Point, RegionAnalyzer};
//!
//! let mut image = Image::filled(20, 20, Color::bgr(255, 255, 255))
//!     .unwrap()
//!     .try_into_mut()
//!     .unwrap();
//! image.fill_rect(5, 5, 15, 15, Color::bgr(0, 0, 200));
//!
//! let mut analyzer = RegionAnalyzer::new();
//! analyzer.set_image(image.into());
//! analyzer.find_region(Point::new(10, 10), Color::bgr(0, 0, 200), 10);
//! assert_eq!(analyzer.result().count_value(255), 100);
//!
//! analyzer.find_perimeter();
//! assert_eq!(analyzer.result().count_value(255), 36);
//! ```

pub mod analyzer;
pub mod display;
mod error;

// Re-export core types (primary data structures used everywhere)
pub use ias_core::{Color, Image, ImageMut, Mask, Point};

// Re-export domain crates as modules
pub use ias_filter as filter;
pub use ias_io as io;
pub use ias_region as region;

pub use analyzer::{RegionAnalyzer, SmoothPerimeterOptions};
pub use display::{DisplaySink, FileDisplay, join};
pub use error::{AnalysisError, AnalysisResult};
