//! Error types for farseer-plot operations.

use thiserror::Error;

/// Result type alias for farseer-plot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing statistics or building figures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Input has the wrong number of dimensions.
    #[error("{name} should have {expected} dimension(s), {actual} given")]
    Dimension {
        /// Name of the offending argument.
        name: String,
        /// Expected number of dimensions.
        expected: usize,
        /// Actual number of dimensions.
        actual: usize,
    },

    /// A 2-D companion array does not match the values matrix.
    #[error("Shape of {name} ({actual:?}) differs from reference shape ({expected:?})")]
    ShapeMismatch {
        /// Name of the offending argument.
        name: String,
        /// Expected shape (rows, cols).
        expected: (usize, usize),
        /// Actual shape (rows, cols).
        actual: (usize, usize),
    },

    /// A 1-D argument does not match the axis it describes.
    #[error("Length of '{name}' parameter ({actual}) differs from reference length ({expected})")]
    LengthMismatch {
        /// Name of the offending argument.
        name: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Not enough measured values to derive a statistic.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A numeric parameter is outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A configuration override was rejected.
    #[error("Argument '{key}' in {template} Plot: {reason}")]
    Config {
        /// Template the configuration belongs to.
        template: String,
        /// Offending key.
        key: String,
        /// Why the override was rejected.
        reason: String,
    },

    /// Colour string is not in `#RRGGBB` format.
    #[error("The input colour is not in HEX format: {0}")]
    InvalidColor(String),

    /// Error importing a data table.
    #[error("Table import error at line {line}: {reason}")]
    Import {
        /// Line number where the error occurred.
        line: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// Rendering backend failure.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
