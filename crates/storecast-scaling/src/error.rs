//! Error types for matrix conversion and scaling.

use thiserror::Error;

/// Result type for scaling operations.
pub type Result<T> = std::result::Result<T, ScalingError>;

/// Errors that can occur while building or scaling a feature matrix
#[derive(Debug, Error)]
pub enum ScalingError {
    /// Column cannot be represented as a number
    #[error("Column '{column}' is not numeric ({dtype})")]
    NonNumeric {
        /// Column name
        column: String,
        /// Column data type
        dtype: String,
    },

    /// Column still holds a missing value
    #[error("Column '{column}' has a missing value at row {row}")]
    MissingValue {
        /// Column name
        column: String,
        /// First row with a missing value
        row: usize,
    },

    /// Feature columns differ from the ones the scaler was fitted on
    #[error("Column mismatch: expected {expected:?}, got {actual:?}")]
    ColumnMismatch {
        /// Fitted column names
        expected: Vec<String>,
        /// Column names presented
        actual: Vec<String>,
    },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Fitting needs at least one row
    #[error("Cannot fit on an empty matrix")]
    EmptyInput,

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
