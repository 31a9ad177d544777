//! Error types for table loading and ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading, merging or writing tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Input file could not be parsed as a delimited table
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parser error
        source: polars::prelude::PolarsError,
    },

    /// A table is missing a column the pipeline needs
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// Logical table name
        table: String,
        /// Name of the absent column
        column: String,
    },

    /// A left join changed the row count of its left table
    #[error("Join for '{table}' produced {actual} rows, expected {expected}")]
    Cardinality {
        /// Logical table name
        table: String,
        /// Row count of the left table
        expected: usize,
        /// Row count after the join
        actual: usize,
    },

    /// Filesystem error on a specific path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Table could not be serialized to disk
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying writer error
        source: polars::prelude::PolarsError,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
