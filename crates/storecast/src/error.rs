//! Pipeline error type.
//!
//! Each crate reports failures with its own error enum. At the stage boundary
//! the cause is wrapped into a [`PipelineError`] that records the [`Stage`]
//! and a coarse [`ErrorKind`] while keeping the original error as its source.

use derive_more::Display;
use polars::prelude::PolarsError;
use storecast_data::DataError;
use storecast_features::FeatureError;
use storecast_output::ExportError;
use storecast_scaling::ScalingError;
use thiserror::Error;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stage {
    /// Raw tables to merged tables
    #[display("ingestion")]
    Ingestion,
    /// Merged tables to scaled arrays
    #[display("transformation")]
    Transformation,
}

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Missing file, unparseable table or missing column
    #[display("input")]
    Input,
    /// Type coercion, join cardinality or shape problem
    #[display("computation")]
    Computation,
    /// Directory creation or file write failure
    #[display("io")]
    Io,
    /// Persisting or reloading an object failed
    #[display("serialization")]
    Serialization,
}

/// The underlying cause of a pipeline failure
#[derive(Debug, Error)]
pub enum StageFailure {
    /// Table loading, joining or writing
    #[error(transparent)]
    Data(#[from] DataError),

    /// Feature derivation, imputation or split
    #[error(transparent)]
    Features(#[from] FeatureError),

    /// Matrix conversion or scaling
    #[error(transparent)]
    Scaling(#[from] ScalingError),

    /// Persistence or export
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl StageFailure {
    /// Classify the cause.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Data(err) => match err {
                DataError::MissingFile(_)
                | DataError::Parse { .. }
                | DataError::MissingColumn { .. } => ErrorKind::Input,
                DataError::Cardinality { .. } => ErrorKind::Computation,
                DataError::Io { .. } | DataError::Write { .. } => ErrorKind::Io,
                DataError::Polars(err) => classify_polars(err),
            },
            Self::Features(err) => match err {
                FeatureError::MissingColumn(_) => ErrorKind::Input,
                FeatureError::Polars(err) => classify_polars(err),
            },
            Self::Scaling(err) => match err {
                ScalingError::Polars(err) => classify_polars(err),
                _ => ErrorKind::Computation,
            },
            Self::Export(err) => match err {
                ExportError::Json(_) => ErrorKind::Serialization,
                ExportError::Io { .. } | ExportError::Csv(_) => ErrorKind::Io,
                ExportError::InvalidFormat(_) => ErrorKind::Computation,
            },
        }
    }
}

const fn classify_polars(err: &PolarsError) -> ErrorKind {
    match err {
        PolarsError::ColumnNotFound(_)
        | PolarsError::SchemaFieldNotFound(_)
        | PolarsError::NoData(_) => ErrorKind::Input,
        PolarsError::IO { .. } => ErrorKind::Io,
        _ => ErrorKind::Computation,
    }
}

/// A failed pipeline stage
#[derive(Debug, Error)]
#[error("{stage} stage failed ({kind} error)")]
pub struct PipelineError {
    /// Stage that failed
    pub stage: Stage,
    /// Classification of the cause
    pub kind: ErrorKind,
    /// Underlying error
    #[source]
    pub source: StageFailure,
}

impl PipelineError {
    /// Wrap a cause, classifying it.
    pub fn new(stage: Stage, source: impl Into<StageFailure>) -> Self {
        let source = source.into();
        Self {
            stage,
            kind: source.kind(),
            source,
        }
    }

    /// Wrap a cause as an ingestion failure.
    pub fn ingestion(source: impl Into<StageFailure>) -> Self {
        Self::new(Stage::Ingestion, source)
    }

    /// Wrap a cause as a transformation failure.
    pub fn transformation(source: impl Into<StageFailure>) -> Self {
        Self::new(Stage::Transformation, source)
    }
}
