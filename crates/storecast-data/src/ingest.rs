//! Ingestion: raw tables to merged, sorted record sets.
//!
//! `features` is left-joined with `stores` on `Store` to form the feature
//! store, which is then left-joined into `train` and `test` on
//! `(Store, Date, IsHoliday)`. Both results are sorted by
//! `(Store, Dept, Date)` with ties kept in input order, and written as CSV.
//! A left join must not change the row count of its left table; if the right
//! table holds duplicate keys the join fails instead of duplicating rows.

use crate::error::{DataError, Result};
use crate::schema::columns::{DATE, DEPT, IS_HOLIDAY, STORE};
use crate::schema::{JOIN_KEYS, SORT_KEYS, files};
use crate::table::{read_table, require_columns, write_table};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Temporary column carrying input order through join and sort.
const ROW_ORDER: &str = "__row_order";

/// The four raw input tables.
#[derive(Debug, Clone)]
pub struct RawTables {
    /// Economic and promotion data keyed by (Store, Date, IsHoliday)
    pub features: DataFrame,
    /// Historical weekly sales
    pub train: DataFrame,
    /// Store metadata keyed by Store
    pub stores: DataFrame,
    /// Weeks to forecast
    pub test: DataFrame,
}

impl RawTables {
    /// Load the four tables from their fixed file names inside `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        info!("Looking for data in: {}", dir.display());

        let features = read_table(&dir.join(files::FEATURES))?;
        let train = read_table(&dir.join(files::TRAIN))?;
        let stores = read_table(&dir.join(files::STORES))?;
        let test = read_table(&dir.join(files::TEST))?;

        require_columns(&features, "features", &JOIN_KEYS)?;
        require_columns(&train, "train", &[STORE, DEPT, DATE, IS_HOLIDAY])?;
        require_columns(&stores, "stores", &[STORE])?;
        require_columns(&test, "test", &[STORE, DEPT, DATE, IS_HOLIDAY])?;

        debug!(
            features = features.height(),
            train = train.height(),
            stores = stores.height(),
            test = test.height(),
            "raw tables loaded"
        );

        Ok(Self {
            features,
            train,
            stores,
            test,
        })
    }
}

/// Paths of the two merged tables written by [`ingest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPaths {
    /// Merged training table
    pub train: PathBuf,
    /// Merged test table
    pub test: PathBuf,
}

/// Left-join `features` with `stores` on `Store`.
pub fn build_feature_store(features: &DataFrame, stores: &DataFrame) -> Result<DataFrame> {
    let feature_store = features
        .clone()
        .lazy()
        .join(
            stores.clone().lazy(),
            [col(STORE)],
            [col(STORE)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    check_cardinality("feature_store", features.height(), feature_store.height())?;
    Ok(feature_store)
}

/// Left-join a record set with the feature store and sort it.
///
/// `table` names the record set in error messages.
pub fn merge_records(
    records: &DataFrame,
    feature_store: &DataFrame,
    table: &str,
) -> Result<DataFrame> {
    let keys: Vec<Expr> = JOIN_KEYS.iter().map(|key| col(*key)).collect();
    let sort_by: Vec<&str> = SORT_KEYS.iter().copied().chain([ROW_ORDER]).collect();

    let merged = records
        .with_row_index(ROW_ORDER.into(), None)?
        .lazy()
        .join(
            feature_store.clone().lazy(),
            keys.clone(),
            keys,
            JoinArgs::new(JoinType::Left),
        )
        .sort(
            sort_by,
            SortMultipleOptions::default().with_nulls_last(true),
        )
        .collect()?
        .drop(ROW_ORDER)?;

    check_cardinality(table, records.height(), merged.height())?;
    Ok(merged)
}

/// Run the ingestion stage.
///
/// Reads the raw tables from `raw_dir`, writes `train_merged.csv` and
/// `test_merged.csv` into `artifact_dir` (created if absent) and returns
/// their paths. Train is written before test.
pub fn ingest(raw_dir: &Path, artifact_dir: &Path) -> Result<MergedPaths> {
    let raw = RawTables::load(raw_dir)?;
    info!("Raw datasets loaded successfully");

    let feature_store = build_feature_store(&raw.features, &raw.stores)?;
    let mut train = merge_records(&raw.train, &feature_store, "train")?;
    let mut test = merge_records(&raw.test, &feature_store, "test")?;
    debug!(
        train_rows = train.height(),
        test_rows = test.height(),
        "record sets merged"
    );

    fs::create_dir_all(artifact_dir).map_err(|source| DataError::Io {
        path: artifact_dir.to_path_buf(),
        source,
    })?;

    let paths = MergedPaths {
        train: artifact_dir.join(files::TRAIN_MERGED),
        test: artifact_dir.join(files::TEST_MERGED),
    };
    write_table(&mut train, &paths.train)?;
    write_table(&mut test, &paths.test)?;

    Ok(paths)
}

fn check_cardinality(table: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(DataError::Cardinality {
            table: table.to_string(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_store() -> DataFrame {
        df! {
            "Store" => &[1i64, 1, 2],
            "Date" => &["2010-02-05", "2010-02-12", "2010-02-05"],
            "IsHoliday" => &[false, true, false],
            "CPI" => &[211.1, 211.2, 210.3],
            "Type" => &["A", "A", "B"],
        }
        .unwrap()
    }

    #[test]
    fn test_build_feature_store() {
        let features = df! {
            "Store" => &[2i64, 1, 3],
            "Date" => &["2010-02-05", "2010-02-05", "2010-02-05"],
            "IsHoliday" => &[false, false, false],
        }
        .unwrap();
        let stores = df! {
            "Store" => &[1i64, 2],
            "Type" => &["A", "B"],
            "Size" => &[151315i64, 202307],
        }
        .unwrap();

        let store = build_feature_store(&features, &stores)
            .unwrap()
            .sort(["Store"], SortMultipleOptions::default())
            .unwrap();
        assert_eq!(store.height(), 3);
        assert_eq!(store.width(), 5);

        let sizes: Vec<Option<i64>> = store
            .column("Size")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(sizes, vec![Some(151315), Some(202307), None]);
    }

    #[test]
    fn test_merge_records_sorts_and_preserves_rows() {
        let records = df! {
            "Store" => &[2i64, 1, 1, 1],
            "Dept" => &[1i64, 2, 1, 1],
            "Date" => &["2010-02-05", "2010-02-05", "2010-02-12", "2010-02-05"],
            "IsHoliday" => &[false, false, true, false],
        }
        .unwrap();

        let merged = merge_records(&records, &feature_store(), "train").unwrap();
        assert_eq!(merged.height(), 4);
        assert!(!merged.get_column_names().iter().any(|c| c.as_str() == ROW_ORDER));

        let stores: Vec<i64> = merged
            .column("Store")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let depts: Vec<i64> = merged
            .column("Dept")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let dates: Vec<&str> = merged
            .column("Date")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(stores, vec![1, 1, 1, 2]);
        assert_eq!(depts, vec![1, 1, 2, 1]);
        assert_eq!(dates, vec!["2010-02-05", "2010-02-12", "2010-02-05", "2010-02-05"]);

        let cpi: Vec<Option<f64>> = merged
            .column("CPI")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(cpi, vec![Some(211.1), Some(211.2), Some(211.1), Some(210.3)]);
    }

    #[test]
    fn test_merge_records_keeps_ties_in_input_order() {
        let records = df! {
            "Store" => &[1i64, 1, 1],
            "Dept" => &[1i64, 1, 1],
            "Date" => &["2010-02-05", "2010-02-05", "2010-02-05"],
            "IsHoliday" => &[false, false, false],
            "Weekly_Sales" => &[3.0, 1.0, 2.0],
        }
        .unwrap();

        let merged = merge_records(&records, &feature_store(), "train").unwrap();
        let sales: Vec<f64> = merged
            .column("Weekly_Sales")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(sales, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_merge_records_unmatched_holiday_flag() {
        let records = df! {
            "Store" => &[1i64],
            "Dept" => &[1i64],
            "Date" => &["2010-02-12"],
            "IsHoliday" => &[false],
        }
        .unwrap();

        let merged = merge_records(&records, &feature_store(), "test").unwrap();
        assert_eq!(merged.height(), 1);
        assert_eq!(merged.column("CPI").unwrap().null_count(), 1);
    }

    #[test]
    fn test_merge_records_rejects_duplicate_keys() {
        let mut duplicated = feature_store();
        duplicated.vstack_mut(&feature_store()).unwrap();
        let records = df! {
            "Store" => &[1i64],
            "Dept" => &[1i64],
            "Date" => &["2010-02-05"],
            "IsHoliday" => &[false],
        }
        .unwrap();

        let err = merge_records(&records, &duplicated, "train").unwrap_err();
        match err {
            DataError::Cardinality {
                table,
                expected,
                actual,
            } => {
                assert_eq!(table, "train");
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
