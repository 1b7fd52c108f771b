//! Error types for region analysis

use thiserror::Error;

/// Reasons an analysis step produced no result
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ias_core::Error),

    /// Image or mask I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] ias_io::IoError),

    /// Filtering failed
    #[error("filter error: {0}")]
    Filter(#[from] ias_filter::FilterError),

    /// Region extraction failed
    #[error("region error: {0}")]
    Region(#[from] ias_region::RegionError),

    /// No source image has been loaded
    #[error("no source image")]
    NoImage,

    /// The input mask holds no result
    #[error("input mask is empty")]
    EmptyMask,

    /// Input mask and source image differ in size
    #[error("mask is {actual:?} but the source image is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Seed point lies outside the source image
    #[error("seed ({x}, {y}) is outside the image")]
    SeedOutOfRange { x: i32, y: i32 },

    /// Display output failed
    #[error("display error: {0}")]
    Display(String),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
