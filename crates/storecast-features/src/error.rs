//! Error types for feature derivation.

use thiserror::Error;

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur while deriving features, imputing or splitting.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A column the step depends on is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Fail with [`FeatureError::MissingColumn`] for the first absent column.
pub(crate) fn ensure_columns(columns: &[String], required: &[&str]) -> Result<()> {
    match required
        .iter()
        .find(|name| !columns.iter().any(|c| c == *name))
    {
        Some(missing) => Err(FeatureError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}
