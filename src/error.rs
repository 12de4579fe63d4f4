//! Error types for bibliorec operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for bibliorec operations.
///
/// # Examples
///
/// ```
/// use bibliorec::error::BiblioError;
///
/// let err = BiblioError::InsufficientData {
///     requested: 5,
///     available: 3,
/// };
/// assert!(err.to_string().contains("insufficient data"));
/// ```
#[derive(Debug, Error)]
pub enum BiblioError {
    /// Identity is not a row of the vector store.
    #[error("identity not found: {identity:?}")]
    NotFound {
        /// The identity that was looked up
        identity: String,
    },

    /// A k-nearest-neighbor query asked for more neighbors than the index holds.
    #[error("insufficient data: requested {requested} neighbors, index holds {available}")]
    InsufficientData {
        /// Requested neighbor count (k)
        requested: usize,
        /// Number of rows in the index
        available: usize,
    },

    /// Vector length disagrees with the store/index dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensionality
        expected: usize,
        /// Actual dimensionality
        actual: usize,
    },

    /// The same identity appeared twice while building a vector store.
    #[error("duplicate identity in vector store: {identity:?}")]
    DuplicateIdentity {
        /// The repeated identity
        identity: String,
    },

    /// Vector store and similarity index disagree on rows.
    #[error("index/store mismatch: {message}")]
    IndexMismatch {
        /// What disagreed
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid config: {param} = {value}, expected {constraint}")]
    InvalidConfig {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// I/O error while reading artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed artifact or config payload.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl BiblioError {
    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(
        param: &str,
        value: impl std::fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidConfig {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

impl From<serde_json::Error> for BiblioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BiblioError>;
