#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/storecast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod ingest;
pub mod schema;
pub mod table;

pub use error::{DataError, Result};
pub use ingest::{MergedPaths, RawTables, build_feature_store, ingest, merge_records};
pub use table::{coerce_null_columns, read_table, require_columns, write_table};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
