//! Feature extraction configuration

use crate::error::FeatureError;
use crate::statistics::ZeroMeanPolicy;
use serde::{Deserialize, Serialize};
use trajectory::RowLayout;

/// What a batch does when one record fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing record
    #[default]
    Abort,
    /// Leave the record out and log it
    Skip,
}

/// Feature extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Velocity cutoff for stop rate and velocity change rate (velocity units)
    pub threshold: f64,

    /// Column layout of raw trajectory rows
    pub layout: RowLayout,

    /// Coefficient of variation when a signal mean is zero
    pub zero_mean_policy: ZeroMeanPolicy,

    /// Batch behaviour on a failing record
    pub failure_policy: FailurePolicy,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            layout: RowLayout::Xy,
            zero_mean_policy: ZeroMeanPolicy::Nan,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl FeatureConfig {
    /// Config with the given threshold and defaults elsewhere
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Create lenient config (skip bad records, no NaN in vectors)
    pub fn lenient() -> Self {
        Self {
            zero_mean_policy: ZeroMeanPolicy::Zero,
            failure_policy: FailurePolicy::Skip,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), FeatureError> {
        if !self.threshold.is_finite() {
            return Err(FeatureError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
