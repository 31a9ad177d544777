#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/storecast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export main types from sub-crates
pub use storecast_data as data;
pub use storecast_features as features;
pub use storecast_output as output;
pub use storecast_scaling as scaling;

pub use config::{IngestionConfig, PipelineConfig, TransformationConfig};
pub use error::{ErrorKind, PipelineError, Stage, StageFailure};
pub use pipeline::{
    ArrayPaths, PipelineOutput, TransformationOutput, export_arrays, run_ingestion, run_pipeline,
    run_transformation,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
