//! Feature steps and the derivation pipeline.
//!
//! A [`FeatureStep`] adds or replaces columns on a lazy frame. Steps only look
//! at columns of the same row, so derived values never depend on row order.
//! [`engineer`] applies [`default_steps`] in order and collects the result.

pub mod calendar;
pub mod encoding;
pub mod promotion;

pub use calendar::{DaysToHoliday, HolidayWeekFlags, ParseDate};
pub use encoding::{HolidayIndicator, StoreTypeCode};
pub use promotion::MarkdownSum;

use crate::error::{Result, ensure_columns};
use polars::prelude::*;
use tracing::debug;

/// A derivation applied identically to training and test frames.
pub trait FeatureStep: std::fmt::Debug {
    /// Step name, used in logs.
    fn name(&self) -> &'static str;

    /// Columns that must be present for the step to run.
    fn required_columns(&self) -> &[&'static str] {
        &[]
    }

    /// Whether the step applies to a frame with these columns.
    ///
    /// Steps over optional columns return `false` when the column is absent
    /// instead of failing.
    fn applies_to(&self, columns: &[String]) -> bool {
        let _ = columns;
        true
    }

    /// Add the step's expressions to `data`.
    ///
    /// `columns` lists the frame's columns before this step.
    fn derive(&self, data: LazyFrame, columns: &[String]) -> LazyFrame;
}

/// Steps in output column order.
pub fn default_steps() -> Vec<Box<dyn FeatureStep>> {
    vec![
        Box::new(ParseDate),
        Box::new(DaysToHoliday),
        Box::new(HolidayWeekFlags),
        Box::new(MarkdownSum),
        Box::new(HolidayIndicator),
        Box::new(StoreTypeCode),
    ]
}

/// Derive every feature on a merged record set.
///
/// # Errors
///
/// Returns [`FeatureError::MissingColumn`](crate::FeatureError::MissingColumn)
/// if a step's required column is absent, or a polars error if a column cannot
/// be converted (for example an unparseable date).
pub fn engineer(df: DataFrame) -> Result<DataFrame> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut data = df.lazy();
    for step in default_steps() {
        if !step.applies_to(&columns) {
            debug!(step = step.name(), "step skipped");
            continue;
        }
        ensure_columns(&columns, step.required_columns())?;
        data = step.derive(data, &columns);
    }

    Ok(data.collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatureError;

    fn merged() -> DataFrame {
        df! {
            "Store" => &[1i64, 2],
            "Dept" => &[1i64, 1],
            "Date" => &["2010-02-05", "2012-11-22"],
            "IsHoliday" => &[true, false],
            "MarkDown1" => &[None, Some(10.0)],
            "MarkDown2" => &[Some(1.5), Some(2.0)],
            "Type" => &["A", "C"],
        }
        .unwrap()
    }

    #[test]
    fn test_default_step_order() {
        let names: Vec<&str> = default_steps().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "parse_date",
                "days_to_holiday",
                "holiday_week_flags",
                "markdown_sum",
                "holiday_indicator",
                "store_type_code"
            ]
        );
    }

    #[test]
    fn test_engineer_column_order() {
        let out = engineer(merged()).unwrap();
        let names: Vec<&str> = out.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            [
                "Store",
                "Dept",
                "Date",
                "IsHoliday",
                "MarkDown1",
                "MarkDown2",
                "Type",
                "Days_to_Thanksgiving",
                "Days_to_Christmas",
                "SuperBowlWeek",
                "LaborDay",
                "Thanksgiving",
                "Christmas",
                "MarkdownsSum",
            ]
        );
    }

    #[test]
    fn test_engineer_values() {
        let out = engineer(merged()).unwrap();

        assert_eq!(out.column("Date").unwrap().dtype(), &DataType::Date);

        let days: Vec<i64> = out
            .column("Days_to_Thanksgiving")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(days, vec![1021, 0]);

        let super_bowl: Vec<bool> = out
            .column("SuperBowlWeek")
            .unwrap()
            .bool()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(super_bowl, vec![true, false]);

        let thanksgiving: Vec<bool> = out
            .column("Thanksgiving")
            .unwrap()
            .bool()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(thanksgiving, vec![false, true]);

        let markdowns: Vec<f64> = out
            .column("MarkdownsSum")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(markdowns, vec![1.5, 12.0]);

        let holiday: Vec<i64> = out
            .column("IsHoliday")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(holiday, vec![1, 0]);

        let store_type: Vec<i64> = out
            .column("Type")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(store_type, vec![1, 3]);
    }

    #[test]
    fn test_engineer_without_optional_columns() {
        let df = df! {
            "Store" => &[1i64],
            "Date" => &["2011-11-24"],
        }
        .unwrap();

        let out = engineer(df).unwrap();
        let names: Vec<&str> = out.get_column_names().iter().map(|c| c.as_str()).collect();
        assert!(!names.contains(&"MarkdownsSum"));
        assert!(!names.contains(&"IsHoliday"));
        assert!(!names.contains(&"Type"));
        assert!(names.contains(&"Christmas"));
    }

    #[test]
    fn test_engineer_requires_date() {
        let df = df! { "Store" => &[1i64] }.unwrap();
        let err = engineer(df).unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn(ref c) if c == "Date"));
    }

    #[test]
    fn test_engineer_rejects_bad_date() {
        let df = df! { "Date" => &["not-a-date"] }.unwrap();
        assert!(matches!(engineer(df), Err(FeatureError::Polars(_))));
    }
}
