//! Error types for flatsearch.

use thiserror::Error;

/// Errors returned by index construction, insertion and queries.
#[derive(Debug, Error)]
pub enum FlatSearchError {
    /// A vector's length does not match the index dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A caller-supplied argument is out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The index configuration is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FlatSearchError {
    /// Create an invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FlatSearchError::InvalidArgument(msg.into())
    }

    /// Create an invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        FlatSearchError::InvalidConfig(msg.into())
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        FlatSearchError::DimensionMismatch { expected, actual }
    }

    /// Returns true if this is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, FlatSearchError::DimensionMismatch { .. })
    }

    /// Returns true if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FlatSearchError::InvalidArgument(_))
    }
}

/// Result type alias for flatsearch operations.
pub type Result<T> = std::result::Result<T, FlatSearchError>;
