//! Stage configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storecast_output::{ExportError, load_object};

/// Ingestion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Directory holding `features.csv`, `train.csv`, `stores.csv` and `test.csv`
    pub raw_data_dir: PathBuf,
    /// Directory receiving the merged tables
    pub artifact_dir: PathBuf,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            raw_data_dir: PathBuf::from("data"),
            artifact_dir: PathBuf::from("artifacts"),
        }
    }
}

/// Transformation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationConfig {
    /// Where the fitted scaler is persisted
    pub scaler_path: PathBuf,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("artifacts").join("preprocessor.json"),
        }
    }
}

/// Settings for a full run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Ingestion stage
    pub ingestion: IngestionConfig,
    /// Transformation stage
    pub transformation: TransformationConfig,
}

impl PipelineConfig {
    /// Read a JSON config file. Absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        load_object(path)
    }
}
