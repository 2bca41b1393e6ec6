use std::fmt;

use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error returned when a dataset cannot be read.
///
/// Shared by every input format. A load error halts the pipeline before any
/// analysis stage runs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (file not found, permission denied, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parse error, including ragged rows.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The input holds no columns at all.
    #[error("input is empty: no columns found")]
    Empty,

    /// The input is syntactically valid but not a table.
    #[error("malformed input: {message}")]
    Malformed { message: String },

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Pipeline stage names used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Correlation,
    Pca,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Correlation => write!(f, "correlation analysis"),
            Stage::Pca => write!(f, "2-component PCA"),
        }
    }
}

/// Error raised by an analysis stage. Only the failing stage is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("insufficient numeric features for {stage}: need at least {required}, found {actual}")]
    InsufficientFeatures {
        stage: Stage,
        required: usize,
        actual: usize,
    },

    #[error("insufficient samples for {stage}: need at least {required} rows, found {actual}")]
    InsufficientSamples {
        stage: Stage,
        required: usize,
        actual: usize,
    },

    /// PCA cannot be fitted on missing or infinite values.
    #[error("column '{column}' contains {count} missing or non-finite values")]
    NonFiniteValues { column: String, count: usize },

    #[error("{stage} decomposition failed: {detail}")]
    Decomposition { stage: Stage, detail: String },
}

/// A numeric column with (near) zero variance.
///
/// The standardizer scales such a column by 1.0 instead of dividing by zero,
/// so its standardized values are all zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegenerateColumnWarning {
    pub column: String,
}

impl fmt::Display for DegenerateColumnWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column '{}' has zero variance; standardized values set to 0",
            self.column
        )
    }
}
