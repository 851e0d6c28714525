//! Error types for fetching archive files and loading indicator tables.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("File not found (404): {url}")]
    NotFound { url: String },

    #[error("HTTP error downloading {url}: {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Error downloading {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`FetchError`], used for log wording and batch counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    NotFound,
    HttpError { status: u16 },
    TransportError,
    Unknown,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::NotFound { .. } => FetchErrorKind::NotFound,
            FetchError::HttpStatus { status, .. } => FetchErrorKind::HttpError {
                status: status.as_u16(),
            },
            FetchError::Transport { .. } => FetchErrorKind::TransportError,
            FetchError::Io { .. } => FetchErrorKind::Unknown,
        }
    }

    /// Maps a reqwest failure onto the matching variant.
    pub(crate) fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        match e.status() {
            Some(StatusCode::NOT_FOUND) => FetchError::NotFound {
                url: url.to_string(),
            },
            Some(status) => FetchError::HttpStatus {
                url: url.to_string(),
                status,
            },
            None => FetchError::Transport {
                url: url.to_string(),
                source: e,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("Failed to open indicator file '{0}'")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Failed to read CSV data")]
    Csv(#[from] csv::Error),

    #[error("CSV has no 'date' column")]
    MissingDateColumn,

    #[error("Line {line}: cannot parse date '{value}'")]
    InvalidDate { line: u64, value: String },

    #[error("Line {line}: cannot parse value '{value}' in column '{column}'")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Failed to write '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode parquet data")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Failed to write parquet file")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Failed to render chart: {0}")]
    Plot(String),
}
