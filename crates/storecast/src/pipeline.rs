//! Stage orchestration.

use crate::config::{IngestionConfig, PipelineConfig, TransformationConfig};
use crate::error::PipelineError;
use ndarray::Array2;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use storecast_data::schema::columns::WEEKLY_SALES;
use storecast_data::{MergedPaths, coerce_null_columns, ingest, read_table};
use storecast_features::{
    engineer, fill_test_missing, fill_train_missing, split_test, split_train,
};
use storecast_output::{ExportFormat, export_array, save_object};
use storecast_scaling::{FeatureMatrix, StandardScaler, append_column};
use tracing::{debug, info};

/// File stem of the exported training array.
pub const TRAIN_ARRAY: &str = "train_array";
/// File stem of the exported test array.
pub const TEST_ARRAY: &str = "test_array";

/// Result of the transformation stage
#[derive(Debug, Clone)]
pub struct TransformationOutput {
    /// Scaled training features with the raw target as the last column
    pub train: Array2<f64>,
    /// Scaled test features
    pub test: Array2<f64>,
    /// Where the fitted scaler was written
    pub scaler_path: PathBuf,
    /// Feature names, in column order (target excluded)
    pub feature_names: Vec<String>,
    /// The fitted scaler
    pub scaler: StandardScaler,
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Merged tables written by ingestion
    pub merged: MergedPaths,
    /// Arrays and scaler from transformation
    pub transformed: TransformationOutput,
}

/// Locations of exported arrays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayPaths {
    /// Training array, target included
    pub train: PathBuf,
    /// Test array
    pub test: PathBuf,
}

/// Merge the raw tables and write them to the artifact directory.
///
/// # Errors
///
/// Any failure is reported as an ingestion [`PipelineError`].
pub fn run_ingestion(config: &IngestionConfig) -> Result<MergedPaths, PipelineError> {
    info!(
        raw_data_dir = %config.raw_data_dir.display(),
        artifact_dir = %config.artifact_dir.display(),
        "ingestion started"
    );
    let merged =
        ingest(&config.raw_data_dir, &config.artifact_dir).map_err(PipelineError::ingestion)?;
    info!(
        train = %merged.train.display(),
        test = %merged.test.display(),
        "ingestion finished"
    );
    Ok(merged)
}

fn load_merged(path: &Path) -> Result<DataFrame, PipelineError> {
    let df = read_table(path).map_err(PipelineError::transformation)?;
    let df = coerce_null_columns(df).map_err(PipelineError::transformation)?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "merged table loaded");
    Ok(df)
}

/// Derive features, impute, split, scale and persist the scaler.
///
/// The scaler is fitted on the training features only and applied unchanged
/// to the test features; both must have the same columns in the same order.
///
/// # Errors
///
/// Any failure is reported as a transformation [`PipelineError`].
pub fn run_transformation(
    train_path: &Path,
    test_path: &Path,
    config: &TransformationConfig,
) -> Result<TransformationOutput, PipelineError> {
    info!(train = %train_path.display(), test = %test_path.display(), "transformation started");

    let train = engineer(load_merged(train_path)?).map_err(PipelineError::transformation)?;
    let test = engineer(load_merged(test_path)?).map_err(PipelineError::transformation)?;
    debug!(columns = train.width(), "features derived");

    let train = fill_train_missing(train).map_err(PipelineError::transformation)?;
    let test = fill_test_missing(test).map_err(PipelineError::transformation)?;

    let (train_features, target) = split_train(train).map_err(PipelineError::transformation)?;
    let test_features = split_test(test).map_err(PipelineError::transformation)?;

    let train_matrix =
        FeatureMatrix::from_frame(&train_features).map_err(PipelineError::transformation)?;
    let test_matrix =
        FeatureMatrix::from_frame(&test_features).map_err(PipelineError::transformation)?;

    let scaler = StandardScaler::fit(&train_matrix).map_err(PipelineError::transformation)?;
    let train_scaled = scaler.transform(&train_matrix).map_err(PipelineError::transformation)?;
    let test_scaled = scaler.transform(&test_matrix).map_err(PipelineError::transformation)?;
    let train = append_column(&train_scaled, &target).map_err(PipelineError::transformation)?;

    save_object(&config.scaler_path, &scaler).map_err(PipelineError::transformation)?;

    info!(
        train_rows = train.nrows(),
        test_rows = test_scaled.nrows(),
        features = train_matrix.ncols(),
        scaler = %config.scaler_path.display(),
        "transformation finished"
    );
    Ok(TransformationOutput {
        train,
        test: test_scaled,
        scaler_path: config.scaler_path.clone(),
        feature_names: train_matrix.names,
        scaler,
    })
}

/// Run ingestion, then transformation on the merged tables it wrote.
///
/// # Errors
///
/// Returns the first stage failure; transformation does not run if ingestion
/// fails.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let merged = run_ingestion(&config.ingestion)?;
    let transformed = run_transformation(&merged.train, &merged.test, &config.transformation)?;
    Ok(PipelineOutput { merged, transformed })
}

/// Write the transformed arrays into `dir`.
///
/// Files are named `train_array` and `test_array` with the format's
/// extension. The training header is the feature names followed by
/// `Weekly_Sales`.
///
/// # Errors
///
/// Any failure is reported as a transformation [`PipelineError`].
pub fn export_arrays(
    output: &TransformationOutput,
    dir: &Path,
    format: ExportFormat,
) -> Result<ArrayPaths, PipelineError> {
    let paths = ArrayPaths {
        train: dir.join(TRAIN_ARRAY).with_extension(format.extension()),
        test: dir.join(TEST_ARRAY).with_extension(format.extension()),
    };

    let mut train_header = output.feature_names.clone();
    train_header.push(WEEKLY_SALES.to_string());
    export_array(&paths.train, &train_header, &output.train, format)
        .map_err(PipelineError::transformation)?;
    export_array(&paths.test, &output.feature_names, &output.test, format)
        .map_err(PipelineError::transformation)?;

    info!(train = %paths.train.display(), test = %paths.test.display(), "arrays exported");
    Ok(paths)
}
