use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one pipeline stage. The orchestrator stops at the first one.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("error loading dataset: {0}")]
    Load(#[from] LoadError),

    #[error("schema error: missing mandatory columns {0:?}")]
    MissingColumns(Vec<String>),

    #[error("error transforming dataset: {0}")]
    Transform(#[from] TransformError),

    #[error("error renaming headers: {0}")]
    Rename(#[source] ArrowError),
}

/// Retrieval or parse failure in the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("building table: {0}")]
    Arrow(#[from] ArrowError),

    #[error("no header row found")]
    Empty,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: year {value:?} is not an integer year in range")]
    InvalidYear { row: usize, value: String },

    #[error("no count for '{column}' in period {year_range}; cannot convert to integer")]
    MissingCount { year_range: String, column: String },

    #[error("count for '{column}' in period {year_range} is {sum}; cannot convert to integer")]
    InvalidCount {
        year_range: String,
        column: String,
        sum: f64,
    },

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

/// Failure writing one output format. Logged by the persister, never propagated.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Parquet(#[from] ParquetError),
}
