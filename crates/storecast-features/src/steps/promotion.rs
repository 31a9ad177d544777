//! Promotional markdown aggregate.

use super::FeatureStep;
use polars::prelude::*;
use storecast_data::schema::columns::MARKDOWN_MARKER;

/// Output column of [`MarkdownSum`].
pub const MARKDOWNS_SUM: &str = "MarkdownsSum";

/// Adds `MarkdownsSum`, the row sum of every markdown column.
///
/// Missing markdowns count as zero. The step is skipped when no column name
/// contains `MarkDown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSum;

impl MarkdownSum {
    fn markdown_columns(columns: &[String]) -> impl Iterator<Item = &String> {
        columns.iter().filter(|c| c.contains(MARKDOWN_MARKER))
    }
}

impl FeatureStep for MarkdownSum {
    fn name(&self) -> &'static str {
        "markdown_sum"
    }

    fn applies_to(&self, columns: &[String]) -> bool {
        Self::markdown_columns(columns).next().is_some()
    }

    fn derive(&self, data: LazyFrame, columns: &[String]) -> LazyFrame {
        let total = Self::markdown_columns(columns).fold(lit(0.0), |acc, name| {
            acc + col(name.as_str())
                .cast(DataType::Float64)
                .fill_null(lit(0.0))
        });
        data.with_column(total.alias(MARKDOWNS_SUM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_sum_skips_missing() {
        let df = df! {
            "MarkDown1" => &[Some(1.0), None, None],
            "MarkDown2" => &[Some(2.5), Some(4.0), None],
            "CPI" => &[100.0, 100.0, 100.0],
        }
        .unwrap();
        let columns: Vec<String> = vec!["MarkDown1".into(), "MarkDown2".into(), "CPI".into()];

        assert!(MarkdownSum.applies_to(&columns));
        let out = MarkdownSum.derive(df.lazy(), &columns).collect().unwrap();
        let sums: Vec<f64> = out
            .column(MARKDOWNS_SUM)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(sums, vec![3.5, 4.0, 0.0]);
    }

    #[test]
    fn test_markdown_sum_not_applicable() {
        let columns: Vec<String> = vec!["Store".into(), "CPI".into(), "MarkdownsSum".into()];
        assert!(!MarkdownSum.applies_to(&columns));
    }
}
