//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a mask or image
    #[error("failed to write '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Nothing to write
    #[error("empty mask at index {index}")]
    EmptyMask { index: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
