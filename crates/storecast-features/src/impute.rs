//! Missing-value policies.
//!
//! Training and test frames are filled differently and the two policies are
//! kept separate:
//!
//! - training: every missing value becomes 0 (`false` for flags);
//! - test: `CPI` and `Unemployment` gaps take the mean of the present test
//!   values of that column, then everything else becomes 0.

use crate::error::{Result, ensure_columns};
use polars::prelude::*;
use storecast_data::schema::columns::{CPI, UNEMPLOYMENT};
use storecast_data::schema::is_numeric_dtype;
use tracing::debug;

/// Test columns filled with their own mean before zero-filling.
pub const MEAN_FILLED_COLUMNS: [&str; 2] = [CPI, UNEMPLOYMENT];

/// Zero-fill expressions for every numeric and boolean column.
///
/// Text and date columns are left as they are.
fn zero_fill(df: &DataFrame) -> Vec<Expr> {
    df.get_columns()
        .iter()
        .filter_map(|column| {
            let name = column.name().as_str();
            let dtype = column.dtype();
            if is_numeric_dtype(dtype) {
                Some(col(name).fill_null(lit(0)))
            } else if dtype == &DataType::Boolean {
                Some(col(name).fill_null(lit(false)))
            } else {
                None
            }
        })
        .collect()
}

fn fill_zero(df: DataFrame) -> Result<DataFrame> {
    let exprs = zero_fill(&df);
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Training policy: fill every missing value with 0.
pub fn fill_train_missing(df: DataFrame) -> Result<DataFrame> {
    debug!(nulls = total_nulls(&df), "zero-filling training frame");
    fill_zero(df)
}

/// Test policy: mean-fill `CPI` and `Unemployment`, then zero-fill the rest.
///
/// The means are taken over the present values of the test frame itself,
/// before any other column is touched.
///
/// # Errors
///
/// Returns [`FeatureError::MissingColumn`](crate::FeatureError::MissingColumn)
/// if either mean-filled column is absent.
pub fn fill_test_missing(df: DataFrame) -> Result<DataFrame> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    ensure_columns(&columns, &MEAN_FILLED_COLUMNS)?;

    debug!(nulls = total_nulls(&df), "mean-filling test frame");
    let mean_fill: Vec<Expr> = MEAN_FILLED_COLUMNS
        .iter()
        .map(|name| {
            let value = col(*name).cast(DataType::Float64);
            value.clone().fill_null(value.mean())
        })
        .collect();
    let df = df.lazy().with_columns(mean_fill).collect()?;

    fill_zero(df)
}

fn total_nulls(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}
