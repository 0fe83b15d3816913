use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors produced while binning, reading values or writing results.
#[derive(Debug, thiserror::Error)]
pub enum BinsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("line {line}: `{token}` is not a number")]
    ParseValue { line: usize, token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("zip archive {} is empty", .0.display())]
    EmptyArchive(PathBuf),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Parquet(#[from] ParquetError),
}

pub type Result<T, E = BinsError> = std::result::Result<T, E>;
