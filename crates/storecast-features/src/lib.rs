#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/storecast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod error;
pub mod impute;
pub mod registry;
pub mod split;
pub mod steps;

pub use calendar::{HolidayAnchor, HolidayWeek, HolidayWindow};
pub use error::{FeatureError, Result};
pub use impute::{fill_test_missing, fill_train_missing};
pub use registry::{
    FeatureGroup, FeatureInfo, available_features, count_by_group, features_by_group,
    get_feature_info,
};
pub use split::{split_test, split_train};
pub use steps::{FeatureStep, default_steps, engineer};
