//! Integer encodings of the holiday flag and store type.

use super::FeatureStep;
use polars::prelude::*;
use storecast_data::schema::columns::{IS_HOLIDAY, TYPE};

/// Store type letter codes and their integer encoding.
///
/// Any other value, including a missing one, encodes as 0.
pub const STORE_TYPE_CODES: [(&str, i64); 3] = [("A", 1), ("B", 2), ("C", 3)];

/// Encode a store type letter the same way [`StoreTypeCode`] does.
pub fn store_type_code(value: Option<&str>) -> i64 {
    value
        .and_then(|v| STORE_TYPE_CODES.iter().find(|(code, _)| *code == v))
        .map_or(0, |(_, encoded)| *encoded)
}

fn has_column(columns: &[String], name: &str) -> bool {
    columns.iter().any(|c| c == name)
}

/// Replaces the `IsHoliday` flag with 0/1.
#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayIndicator;

impl FeatureStep for HolidayIndicator {
    fn name(&self) -> &'static str {
        "holiday_indicator"
    }

    fn applies_to(&self, columns: &[String]) -> bool {
        has_column(columns, IS_HOLIDAY)
    }

    fn derive(&self, data: LazyFrame, _columns: &[String]) -> LazyFrame {
        data.with_column(col(IS_HOLIDAY).cast(DataType::Int64))
    }
}

/// Replaces the `Type` letter with its integer code.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreTypeCode;

impl FeatureStep for StoreTypeCode {
    fn name(&self) -> &'static str {
        "store_type_code"
    }

    fn applies_to(&self, columns: &[String]) -> bool {
        has_column(columns, TYPE)
    }

    fn derive(&self, data: LazyFrame, _columns: &[String]) -> LazyFrame {
        let letter = col(TYPE).cast(DataType::String);
        let [(a, a_code), (b, b_code), (c, c_code)] = STORE_TYPE_CODES;
        let encoded = when(letter.clone().eq(lit(a)))
            .then(lit(a_code))
            .when(letter.clone().eq(lit(b)))
            .then(lit(b_code))
            .when(letter.eq(lit(c)))
            .then(lit(c_code))
            .otherwise(lit(0i64))
            .cast(DataType::Int64);
        data.with_column(encoded.alias(TYPE))
    }
}
