//! Feature/target split.

use crate::error::{FeatureError, Result};
use polars::prelude::*;
use storecast_data::schema::columns::{DATE, WEEKLY_SALES};

fn drop_column(df: DataFrame, name: &str) -> Result<DataFrame> {
    if df.column(name).is_err() {
        return Err(FeatureError::MissingColumn(name.to_string()));
    }
    Ok(df.drop(name)?)
}

/// Split an engineered training frame into features and the sales target.
///
/// Features are every column except `Weekly_Sales` and `Date`. Missing target
/// values (there are none after the training fill) read as 0.
pub fn split_train(df: DataFrame) -> Result<(DataFrame, Vec<f64>)> {
    let target: Vec<f64> = df
        .column(WEEKLY_SALES)
        .map_err(|_| FeatureError::MissingColumn(WEEKLY_SALES.to_string()))?
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(0.0))
        .collect();

    let features = drop_column(drop_column(df, WEEKLY_SALES)?, DATE)?;
    Ok((features, target))
}

/// Test features: every column except `Date`.
pub fn split_test(df: DataFrame) -> Result<DataFrame> {
    drop_column(df, DATE)
}
