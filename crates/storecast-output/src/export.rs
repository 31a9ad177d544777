//! Export of processed arrays.

use ndarray::Array2;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export or persistence.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on a specific file.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl ExportError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(format!(
                "unknown export format '{other}' (use csv, json or pretty-json)"
            ))),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ExportError::io(parent))?;
        }
        let mut file = File::create(path).map_err(ExportError::io(path))?;
        file.write_all(content.as_bytes())
            .map_err(ExportError::io(path))?;
        debug!(path = %path.display(), format = format.extension(), "exported");
        Ok(())
    }
}

/// A numeric matrix with one header name per column.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExport {
    /// Column names
    pub header: Vec<String>,
    /// Row-major values
    pub values: Array2<f64>,
}

#[derive(Serialize)]
struct ArrayJson<'a> {
    header: &'a [String],
    rows: Vec<Vec<f64>>,
}

impl ArrayExport {
    /// Pair a matrix with its header.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidFormat`] if the header length differs
    /// from the matrix width.
    pub fn new(header: Vec<String>, values: Array2<f64>) -> Result<Self, ExportError> {
        if header.len() != values.ncols() {
            return Err(ExportError::InvalidFormat(format!(
                "{} header names for {} columns",
                header.len(),
                values.ncols()
            )));
        }
        Ok(Self { header, values })
    }

    fn rows(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

impl Exporter for ArrayExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(&self.header)?;
                for row in self.values.rows() {
                    wtr.write_record(row.iter().map(|v| v.to_string()))?;
                }
                let bytes = wtr
                    .into_inner()
                    .map_err(|e| csv::Error::from(e.into_error()))?;
                String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
            }
            ExportFormat::Json => Ok(serde_json::to_string(&ArrayJson {
                header: &self.header,
                rows: self.rows(),
            })?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&ArrayJson {
                header: &self.header,
                rows: self.rows(),
            })?),
        }
    }
}

/// Write a processed matrix with a header row in the given format.
///
/// # Errors
///
/// Returns an error if the header does not fit the matrix or the file cannot
/// be written.
pub fn export_array(
    path: &Path,
    header: &[String],
    values: &Array2<f64>,
    format: ExportFormat,
) -> Result<(), ExportError> {
    ArrayExport::new(header.to_vec(), values.clone())?.export_to_file(path, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;
    use tempfile::TempDir;

    fn export() -> ArrayExport {
        ArrayExport::new(
            vec!["Store".to_string(), "Weekly_Sales".to_string()],
            array![[-1.0, 24924.5], [1.0, 46039.49]],
        )
        .unwrap()
    }

    #[test]
    fn test_array_export_csv() {
        let csv = export().export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv, "Store,Weekly_Sales\n-1,24924.5\n1,46039.49\n");
    }

    #[test]
    fn test_array_export_json() {
        let json = export().export_to_string(ExportFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"{"header":["Store","Weekly_Sales"],"rows":[[-1.0,24924.5],[1.0,46039.49]]}"#
        );

        let pretty = export().export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(pretty.contains("  "));
    }

    #[test]
    fn test_array_export_rejects_bad_header() {
        let err = ArrayExport::new(vec!["a".to_string()], array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, ExportError::InvalidFormat(_)));
    }

    #[test]
    fn test_export_array_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("train_array.csv");
        let export = export();

        export_array(&path, &export.header, &export.values, ExportFormat::Csv).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Store,Weekly_Sales\n"));
        assert_eq!(content.lines().count(), 3);
    }

    #[rstest]
    #[case(ExportFormat::Csv, "csv")]
    #[case(ExportFormat::Json, "json")]
    #[case(ExportFormat::PrettyJson, "json")]
    fn test_export_format_extension(#[case] format: ExportFormat, #[case] extension: &str) {
        assert_eq!(format.extension(), extension);
    }

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("JSON", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    fn test_export_format_from_str(#[case] name: &str, #[case] format: ExportFormat) {
        assert_eq!(name.parse::<ExportFormat>().unwrap(), format);
    }

    #[test]
    fn test_export_format_from_str_rejects_unknown() {
        let err = "parquet".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::InvalidFormat(ref m) if m.contains("parquet")));
    }

    #[test]
    fn test_export_array_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test_array.json");
        let export = export();

        export_array(&path, &export.header, &export.values, ExportFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["header"][1], "Weekly_Sales");
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
    }
}
