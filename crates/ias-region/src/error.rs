//! Error types for ias-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ias_core::Error),

    /// Invalid seed position
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: u32, y: u32 },

    /// Empty mask
    #[error("empty mask: no pixels to process")]
    EmptyMask,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
