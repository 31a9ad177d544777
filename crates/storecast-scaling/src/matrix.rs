//! Dense feature matrices.

use crate::error::{Result, ScalingError};
use ndarray::Array2;
use polars::prelude::*;
use storecast_data::schema::is_numeric_dtype;

/// A dense `rows x columns` matrix of feature values with its column names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    /// Column names, in matrix column order
    pub names: Vec<String>,
    /// Feature values
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from a frame whose columns are all numeric or boolean.
    ///
    /// Booleans become 0/1. Column order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ScalingError::NonNumeric`] for a text or date column and
    /// [`ScalingError::MissingValue`] for a column that still has nulls.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let mut names = Vec::with_capacity(df.width());
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let name = column.name().to_string();
            let dtype = column.dtype();
            if !(is_numeric_dtype(dtype) || dtype == &DataType::Boolean) {
                return Err(ScalingError::NonNumeric {
                    column: name,
                    dtype: dtype.to_string(),
                });
            }

            let cast = column.cast(&DataType::Float64)?;
            let values = cast
                .f64()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| {
                    value.ok_or_else(|| ScalingError::MissingValue {
                        column: name.clone(),
                        row,
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            names.push(name);
            columns.push(values);
        }

        let values = Array2::from_shape_fn((df.height(), columns.len()), |(row, col)| {
            columns[col][row]
        });
        Ok(Self { names, values })
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of feature columns
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }
}

/// Append `column` as a new last column of `matrix`.
///
/// # Errors
///
/// Returns [`ScalingError::DimensionMismatch`] if `column` does not have one
/// value per matrix row.
pub fn append_column(matrix: &Array2<f64>, column: &[f64]) -> Result<Array2<f64>> {
    let (rows, cols) = matrix.dim();
    if column.len() != rows {
        return Err(ScalingError::DimensionMismatch {
            expected: rows,
            actual: column.len(),
        });
    }

    Ok(Array2::from_shape_fn((rows, cols + 1), |(row, col)| {
        if col < cols { matrix[[row, col]] } else { column[row] }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_frame() {
        let df = df! {
            "Store" => &[1i64, 2],
            "CPI" => &[211.5, 212.0],
            "Christmas" => &[true, false],
        }
        .unwrap();

        let matrix = FeatureMatrix::from_frame(&df).unwrap();
        assert_eq!(matrix.names, ["Store", "CPI", "Christmas"]);
        assert_eq!(matrix.values, array![[1.0, 211.5, 1.0], [2.0, 212.0, 0.0]]);
        assert_eq!((matrix.nrows(), matrix.ncols()), (2, 3));
    }

    #[test]
    fn test_from_frame_rejects_text() {
        let df = df! { "Store" => &[1i64], "Type" => &["A"] }.unwrap();
        let err = FeatureMatrix::from_frame(&df).unwrap_err();
        assert!(matches!(err, ScalingError::NonNumeric { ref column, .. } if column == "Type"));
    }

    #[test]
    fn test_from_frame_rejects_nulls() {
        let df = df! { "CPI" => &[Some(1.0), None] }.unwrap();
        let err = FeatureMatrix::from_frame(&df).unwrap_err();
        assert!(matches!(err, ScalingError::MissingValue { row: 1, .. }));
    }

    #[test]
    fn test_append_column() {
        let matrix = array![[1.0, 2.0], [3.0, 4.0]];
        let out = append_column(&matrix, &[10.0, 20.0]).unwrap();
        assert_eq!(out, array![[1.0, 2.0, 10.0], [3.0, 4.0, 20.0]]);

        assert!(matches!(
            append_column(&matrix, &[1.0]),
            Err(ScalingError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_append_column_to_featureless_matrix() {
        let matrix = Array2::<f64>::zeros((3, 0));
        let out = append_column(&matrix, &[1.5, -2.0, 0.25]).unwrap();
        assert_eq!(out, array![[1.5], [-2.0], [0.25]]);
    }
}
