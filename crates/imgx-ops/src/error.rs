//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Lookup or validation failure from the image model.
    #[error(transparent)]
    Core(#[from] imgx_core::Error),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numeric parameter outside its allowed range.
    #[error("{name} {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter name
        name: &'static str,
        /// Supplied value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Operation not supported in this mode.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
