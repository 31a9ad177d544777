//! Date parsing, holiday day counts and holiday-week flags.

use super::FeatureStep;
use crate::calendar::{HolidayAnchor, HolidayWeek, day_number};
use polars::prelude::*;
use storecast_data::schema::columns::DATE;

/// Converts the `Date` column from `YYYY-MM-DD` text to a calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseDate;

impl FeatureStep for ParseDate {
    fn name(&self) -> &'static str {
        "parse_date"
    }

    fn required_columns(&self) -> &[&'static str] {
        &[DATE]
    }

    fn derive(&self, data: LazyFrame, _columns: &[String]) -> LazyFrame {
        data.with_column(col(DATE).strict_cast(DataType::Date))
    }
}

/// Adds `Days_to_Thanksgiving` and `Days_to_Christmas`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaysToHoliday;

impl FeatureStep for DaysToHoliday {
    fn name(&self) -> &'static str {
        "days_to_holiday"
    }

    fn required_columns(&self) -> &[&'static str] {
        &[DATE]
    }

    fn derive(&self, data: LazyFrame, _columns: &[String]) -> LazyFrame {
        let exprs: Vec<Expr> = HolidayAnchor::ALL
            .iter()
            .map(|anchor| anchor.days_until(day_number(DATE)).alias(anchor.column()))
            .collect();
        data.with_columns(exprs)
    }
}

/// Adds one boolean column per [`HolidayWeek`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayWeekFlags;

impl FeatureStep for HolidayWeekFlags {
    fn name(&self) -> &'static str {
        "holiday_week_flags"
    }

    fn required_columns(&self) -> &[&'static str] {
        &[DATE]
    }

    fn derive(&self, data: LazyFrame, _columns: &[String]) -> LazyFrame {
        let exprs: Vec<Expr> = HolidayWeek::ALL
            .iter()
            .map(|week| week.flag(day_number(DATE)).alias(week.column()))
            .collect();
        data.with_columns(exprs)
    }
}
