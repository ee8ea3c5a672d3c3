use std::path::PathBuf;

use thiserror::Error;

use crate::TradeDate;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("instrument id cannot be empty")]
    EmptyInstrumentId,

    #[error("timestamp must be day-month-year (dd-mm-yyyy): '{value}'")]
    InvalidTradeDate { value: String },

    #[error("price must be a finite number: '{value}'")]
    NonFinitePrice { value: String },
}

/// Errors raised by the sampling and detection stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectionError {
    #[error("source has {available} observations, need at least {required}")]
    InsufficientData { available: usize, required: usize },

    #[error("cannot detect outliers in an empty window")]
    EmptyWindow,

    #[error("window mean is zero, percent deviation undefined for observation at {timestamp}")]
    DivisionByZero { timestamp: TradeDate },
}

/// Failures reading a price source.
#[derive(Debug, Error)]
pub enum SourceReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed row in {} at line {line}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

/// Failures persisting outlier records.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode csv for {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reason a single source was skipped during a scan run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Read(#[from] SourceReadError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl ScanError {
    /// Stable machine-readable category for reports.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "source_read",
            Self::Detection(DetectionError::InsufficientData { .. }) => "insufficient_data",
            Self::Detection(DetectionError::EmptyWindow) => "empty_window",
            Self::Detection(DetectionError::DivisionByZero { .. }) => "division_by_zero",
            Self::Write(_) => "write_failed",
        }
    }
}
