//! Feature Extraction Error Types

use thiserror::Error;
use trajectory::TrajectoryError;

/// Errors during feature vector construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Malformed input trajectory or record
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    /// A signal that must be summarised has no samples
    #[error("Insufficient data: {signal} has no samples")]
    InsufficientData { signal: &'static str },

    /// Threshold must be a finite number
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(f64),

    /// A feature overflowed to a non-finite value on finite input
    #[error("Non-finite feature: {feature} overflowed")]
    NonFinite { feature: String },

    /// Failure while processing one record of a batch
    #[error("Record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<FeatureError>,
    },
}

impl FeatureError {
    /// Innermost error, looking through batch record wrappers
    pub fn root(&self) -> &FeatureError {
        match self {
            FeatureError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}
