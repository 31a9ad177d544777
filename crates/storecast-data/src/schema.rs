//! Column and file names shared by every pipeline stage.

use polars::prelude::DataType;

/// Column names of the raw and merged tables.
pub mod columns {
    /// Store identifier
    pub const STORE: &str = "Store";

    /// Department identifier
    pub const DEPT: &str = "Dept";

    /// Week-ending calendar day, `YYYY-MM-DD`
    pub const DATE: &str = "Date";

    /// Holiday-week flag
    pub const IS_HOLIDAY: &str = "IsHoliday";

    /// Regression target, present in training data only
    pub const WEEKLY_SALES: &str = "Weekly_Sales";

    /// Store type letter code
    pub const TYPE: &str = "Type";

    /// Store size
    pub const SIZE: &str = "Size";

    /// Consumer price index
    pub const CPI: &str = "CPI";

    /// Unemployment rate
    pub const UNEMPLOYMENT: &str = "Unemployment";

    /// Substring marking promotional markdown columns (`MarkDown1`..`MarkDown5`)
    pub const MARKDOWN_MARKER: &str = "MarkDown";
}

/// Fixed file names inside the raw-data and artifact directories.
pub mod files {
    /// Economic and promotion data per store and week
    pub const FEATURES: &str = "features.csv";

    /// Historical weekly sales
    pub const TRAIN: &str = "train.csv";

    /// Store metadata
    pub const STORES: &str = "stores.csv";

    /// Weeks to forecast
    pub const TEST: &str = "test.csv";

    /// Merged, sorted training table
    pub const TRAIN_MERGED: &str = "train_merged.csv";

    /// Merged, sorted test table
    pub const TEST_MERGED: &str = "test_merged.csv";
}

use columns::{DATE, DEPT, IS_HOLIDAY, STORE};

/// Keys joining the record sets to the feature store.
pub const JOIN_KEYS: [&str; 3] = [STORE, DATE, IS_HOLIDAY];

/// Sort order of the merged record sets.
pub const SORT_KEYS: [&str; 3] = [STORE, DEPT, DATE];

/// Whether a column of this type can be fed to numeric steps as-is.
///
/// Only the widths produced by CSV inference and feature derivation are listed.
pub const fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
