//! Per-column standardization.
//!
//! Each column `j` is transformed as `(x - mean_j) / std_j`, where the mean and
//! the population standard deviation (no degrees-of-freedom correction) are
//! learned once from the training matrix. A column with zero spread keeps a
//! scale of 1.

use crate::error::{Result, ScalingError};
use crate::matrix::FeatureMatrix;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fitted parameters of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScale {
    /// Column name
    pub column: String,
    /// Training mean
    pub mean: f64,
    /// Training standard deviation, 1 when the column is constant
    pub std: f64,
}

/// Standard scaler fitted on a training matrix.
///
/// The scaler is a plain value: fitting returns it, and it is passed to
/// whatever needs to transform data with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column parameters, in feature column order
    pub columns: Vec<ColumnScale>,
    /// Number of rows the scaler was fitted on
    pub n_samples: usize,
}

impl StandardScaler {
    /// Learn per-column means and standard deviations.
    ///
    /// # Errors
    ///
    /// Returns [`ScalingError::EmptyInput`] for a matrix without rows.
    pub fn fit(matrix: &FeatureMatrix) -> Result<Self> {
        if matrix.nrows() == 0 {
            return Err(ScalingError::EmptyInput);
        }

        let means = matrix
            .values
            .mean_axis(Axis(0))
            .ok_or(ScalingError::EmptyInput)?;
        let stds = matrix.values.std_axis(Axis(0), 0.0);

        let columns = matrix
            .names
            .iter()
            .zip(means.iter().zip(stds.iter()))
            .map(|(name, (&mean, &std))| ColumnScale {
                column: name.clone(),
                mean,
                std: if std == 0.0 { 1.0 } else { std },
            })
            .collect::<Vec<_>>();

        debug!(columns = columns.len(), rows = matrix.nrows(), "scaler fitted");
        Ok(Self {
            columns,
            n_samples: matrix.nrows(),
        })
    }

    /// Fitted column names, in order
    pub fn feature_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.column.clone()).collect()
    }

    /// Fitted means
    pub fn means(&self) -> Array1<f64> {
        self.columns.iter().map(|c| c.mean).collect()
    }

    /// Fitted scales
    pub fn stds(&self) -> Array1<f64> {
        self.columns.iter().map(|c| c.std).collect()
    }

    /// Scale a matrix with the fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ScalingError::ColumnMismatch`] unless the matrix has exactly
    /// the fitted columns in the fitted order.
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<Array2<f64>> {
        let expected = self.feature_names();
        if matrix.names != expected {
            return Err(ScalingError::ColumnMismatch {
                expected,
                actual: matrix.names.clone(),
            });
        }
        self.transform_values(&matrix.values)
    }

    /// Scale a bare matrix, matching columns by position.
    ///
    /// # Errors
    ///
    /// Returns [`ScalingError::DimensionMismatch`] if the column count differs.
    pub fn transform_values(&self, values: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(values)?;
        Ok((values - &self.means()) / &self.stds())
    }

    /// Map scaled values back to the original units.
    ///
    /// # Errors
    ///
    /// Returns [`ScalingError::DimensionMismatch`] if the column count differs.
    pub fn inverse_transform(&self, scaled: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(scaled)?;
        Ok(scaled * &self.stds() + &self.means())
    }

    fn check_width(&self, values: &Array2<f64>) -> Result<()> {
        if values.ncols() != self.columns.len() {
            return Err(ScalingError::DimensionMismatch {
                expected: self.columns.len(),
                actual: values.ncols(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    fn matrix(values: Array2<f64>) -> FeatureMatrix {
        let names = (0..values.ncols()).map(|i| format!("f{i}")).collect();
        FeatureMatrix { names, values }
    }

    #[test]
    fn test_fit_population_std() {
        let train = matrix(array![[1.0, 10.0], [2.0, 10.0], [3.0, 10.0], [4.0, 10.0]]);
        let scaler = StandardScaler::fit(&train).unwrap();

        assert_relative_eq!(scaler.columns[0].mean, 2.5);
        assert_relative_eq!(scaler.columns[0].std, 1.25_f64.sqrt());
        // Constant column keeps unit scale
        assert_relative_eq!(scaler.columns[1].mean, 10.0);
        assert_relative_eq!(scaler.columns[1].std, 1.0);
        assert_eq!(scaler.n_samples, 4);
    }

    #[test]
    fn test_transform_training_matrix_is_standardized() {
        let train = matrix(array![
            [1.0, 200.0, 5.0],
            [3.0, 180.0, 5.0],
            [8.0, 260.0, 5.0],
            [4.0, 240.0, 5.0]
        ]);
        let scaler = StandardScaler::fit(&train).unwrap();
        let scaled = scaler.transform(&train).unwrap();

        for j in 0..2 {
            let column = scaled.column(j);
            assert_relative_eq!(column.mean().unwrap(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(column.std(0.0), 1.0, epsilon = 1e-12);
        }
        // Constant column is centred only
        assert!(scaled.column(2).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_uses_training_parameters() {
        let train = matrix(array![[0.0], [2.0]]);
        let test = matrix(array![[5.0], [7.0]]);
        let scaler = StandardScaler::fit(&train).unwrap();

        let scaled = scaler.transform(&test).unwrap();
        assert_eq!(scaled, array![[4.0], [6.0]]);
    }

    #[rstest]
    #[case(vec!["f1".to_string(), "f0".to_string()])]
    #[case(vec!["f0".to_string()])]
    fn test_transform_rejects_other_columns(#[case] names: Vec<String>) {
        let scaler = StandardScaler::fit(&matrix(array![[1.0, 2.0], [3.0, 5.0]])).unwrap();
        let values = Array2::zeros((1, names.len()));
        let err = scaler.transform(&FeatureMatrix { names, values }).unwrap_err();
        assert!(matches!(err, ScalingError::ColumnMismatch { .. }));
    }

    #[test]
    fn test_inverse_transform() {
        let train = matrix(array![[1.0, 7.0], [4.0, 7.0], [10.0, 7.0]]);
        let scaler = StandardScaler::fit(&train).unwrap();
        let restored = scaler.inverse_transform(&scaler.transform(&train).unwrap()).unwrap();

        for (a, b) in restored.iter().zip(train.values.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
        assert!(matches!(
            scaler.inverse_transform(&array![[1.0]]),
            Err(ScalingError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_fit_empty() {
        let empty = FeatureMatrix {
            names: vec!["f0".to_string()],
            values: Array2::zeros((0, 1)),
        };
        assert!(matches!(StandardScaler::fit(&empty), Err(ScalingError::EmptyInput)));
    }

    #[test]
    fn test_serde_keeps_parameters() {
        let scaler = StandardScaler::fit(&matrix(array![[1.0, 2.0], [3.0, 6.0]])).unwrap();
        let json = serde_json::to_string(&scaler).unwrap();
        let back: StandardScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scaler);
    }
}
