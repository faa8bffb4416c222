//! Trajectory Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a trajectory from raw input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    /// Fewer points than any motion signal needs
    #[error("Trajectory too short: need at least {min} points, got {actual}")]
    TooShort { min: usize, actual: usize },

    /// Row width does not match the configured layout
    #[error("Row {index} has {actual} values, expected {expected}")]
    InvalidDimension {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// NaN or infinite coordinate
    #[error("Row {index} contains a non-finite value")]
    NonFinite { index: usize },

    /// Timestamps must strictly increase
    #[error("Timestamp at row {index} does not increase")]
    NonMonotonicTime { index: usize },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors raised by a data source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record data at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
