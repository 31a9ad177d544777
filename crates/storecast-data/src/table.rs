//! Delimited-table reading and writing.
//!
//! Tables are read eagerly with full-file schema inference so that sparse
//! columns (markdowns are empty for most of 2010) get a stable type. The
//! tokens `NA`, `NaN` and `null` are read as missing values.

use crate::error::{DataError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Tokens read as missing values.
const NULL_TOKENS: [&str; 3] = ["NA", "NaN", "null"];

/// Read a CSV file with a header row into a DataFrame.
///
/// # Errors
///
/// Returns [`DataError::MissingFile`] if `path` is not a file and
/// [`DataError::Parse`] if the content is not a readable table.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(DataError::MissingFile(path.to_path_buf()));
    }

    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    let parse_opts = CsvParseOptions::default().with_null_values(Some(null_values));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_opts)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a DataFrame as CSV with a header row and no index column.
///
/// The file is created (or truncated) at `path`; the parent directory must exist.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|source| DataError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Check that every column in `required` exists in `df`.
pub fn require_columns(df: &DataFrame, table: &str, required: &[&str]) -> Result<()> {
    let names = df.get_column_names();
    for column in required {
        if !names.iter().any(|name| name.as_str() == *column) {
            return Err(DataError::MissingColumn {
                table: table.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Re-type columns that contain no values at all as `Float64`.
///
/// CSV inference types an all-empty column as `String`; every such column in
/// this dataset is numeric (markdowns before promotions started, CPI gaps).
pub fn coerce_null_columns(df: DataFrame) -> Result<DataFrame> {
    let height = df.height();
    let casts: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String && column.null_count() == height)
        .map(|column| col(column.name().as_str()).cast(DataType::Float64))
        .collect();

    if casts.is_empty() {
        return Ok(df);
    }

    Ok(df.lazy().with_columns(casts).collect()?)
}
