#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/storecast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod matrix;
pub mod scaler;

pub use error::{Result, ScalingError};
pub use matrix::{FeatureMatrix, append_column};
pub use scaler::{ColumnScale, StandardScaler};
