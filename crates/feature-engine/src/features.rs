//! Feature Vector Assembly

use crate::config::FeatureConfig;
use crate::error::FeatureError;
use crate::layout::{slot_index, FeatureSlot, FEATURE_DIMENSION, FEATURE_LAYOUT};
use crate::motion::{self, ScalarFeature, Signal};
use crate::statistics::{StatisticalFeatures, Statistic, ZeroMeanPolicy, ZERO_MEAN_EPSILON};
use serde::{Deserialize, Serialize};
use tracing::debug;
use trajectory::Trajectory;

/// Feature vector for one trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Input position when built as part of a batch
    pub record_index: Option<usize>,
    /// Raw feature values in [`FEATURE_LAYOUT`] order
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value of a layout slot
    pub fn get(&self, slot: FeatureSlot) -> Option<f64> {
        slot_index(slot).and_then(|idx| self.values.get(idx).copied())
    }

    /// Value by feature name, e.g. `velocity_mean`
    pub fn value(&self, name: &str) -> Option<f64> {
        FEATURE_LAYOUT
            .iter()
            .position(|slot| slot.matches(name))
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// `(name, value)` pairs in layout order
    pub fn named(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        FEATURE_LAYOUT
            .iter()
            .zip(&self.values)
            .map(|(slot, value)| (slot.name(), *value))
    }
}

/// Feature extractor turning trajectories into fixed-layout vectors
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extract the feature vector of one trajectory
    pub fn extract(&self, traj: &Trajectory) -> Result<FeatureVector, FeatureError> {
        self.config.validate()?;
        let threshold = self.config.threshold;

        let velocity = motion::velocity(traj);

        let mut summaries = Vec::with_capacity(Signal::ALL.len());
        for signal in Signal::ALL {
            let values = match signal {
                Signal::Velocity => velocity.clone(),
                other => other.compute(traj),
            };
            let stats = StatisticalFeatures::compute(&values, self.config.zero_mean_policy)
                .ok_or(FeatureError::InsufficientData {
                    signal: signal.name(),
                })?;
            summaries.push(stats);
        }

        let distance = motion::distance(traj);
        let velocity_change_rate = motion::velocity_change_fraction(&velocity, threshold)?;
        let stop_rate = motion::stop_fraction(&velocity, threshold)?;

        let values: Vec<f64> = FEATURE_LAYOUT
            .iter()
            .map(|slot| match *slot {
                FeatureSlot::Scalar(ScalarFeature::Distance) => distance,
                FeatureSlot::Scalar(ScalarFeature::VelocityChangeRate) => velocity_change_rate,
                FeatureSlot::Scalar(ScalarFeature::StopRate) => stop_rate,
                FeatureSlot::Stat(signal, stat) => summaries[signal.index()].get(stat),
            })
            .collect();
        debug_assert_eq!(values.len(), FEATURE_DIMENSION);

        // Only a zero-mean coefficient of variation may be NaN
        let overflowed = FEATURE_LAYOUT.iter().zip(&values).find(|(slot, value)| {
            !value.is_finite()
                && !matches!(
                    **slot,
                    FeatureSlot::Stat(signal, Statistic::CoefVar)
                        if self.config.zero_mean_policy == ZeroMeanPolicy::Nan
                            && summaries[signal.index()].mean.abs() <= ZERO_MEAN_EPSILON
                )
        });
        if let Some((slot, _)) = overflowed {
            return Err(FeatureError::NonFinite {
                feature: slot.name(),
            });
        }

        debug!(
            "Extracted features: {} points, distance={:.3}, stop_rate={:.3}",
            traj.len(),
            distance,
            stop_rate
        );

        Ok(FeatureVector {
            record_index: None,
            values,
        })
    }

    /// Validate raw rows with the configured layout, then extract
    pub fn extract_from_rows<R: AsRef<[f64]>>(
        &self,
        rows: &[R],
    ) -> Result<FeatureVector, FeatureError> {
        let traj = Trajectory::from_rows(rows, self.config.layout)?;
        self.extract(&traj)
    }
}

/// Feature vector of one trajectory
pub fn build_vector(
    traj: &Trajectory,
    config: &FeatureConfig,
) -> Result<FeatureVector, FeatureError> {
    FeatureExtractor::new(config.clone()).extract(traj)
}

/// Feature vector of raw trajectory rows laid out as `config.layout`
pub fn build_vector_from_rows<R: AsRef<[f64]>>(
    rows: &[R],
    config: &FeatureConfig,
) -> Result<FeatureVector, FeatureError> {
    FeatureExtractor::new(config.clone()).extract_from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajectory::{RowLayout, TrajectoryError};

    fn planar(rows: &[[f64; 2]]) -> Trajectory {
        Trajectory::from_rows(rows, RowLayout::Xy).unwrap()
    }

    #[test]
    fn test_feature_extraction() {
        let traj = planar(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        let features = build_vector(&traj, &FeatureConfig::default()).unwrap();

        assert_eq!(features.len(), FEATURE_DIMENSION);
        assert_eq!(features.value("distance"), Some(3.0));
        assert_eq!(features.value("velocity_mean"), Some(1.0));
        assert_eq!(features.value("velocity_std_dev"), Some(0.0));
        assert_eq!(features.value("velocity_coef_var"), Some(0.0));
        assert_eq!(features.value("stop_rate"), Some(0.0));
        assert_eq!(features.value("velocity_change_rate"), Some(0.0));
        assert_eq!(features.record_index, None);
    }

    #[test]
    fn test_three_points_lack_jerk() {
        let traj = planar(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        assert_eq!(
            build_vector(&traj, &FeatureConfig::default()),
            Err(FeatureError::InsufficientData {
                signal: "acceleration_change_rate"
            })
        );
    }

    #[test]
    fn test_single_point_rows() {
        let err = build_vector_from_rows(&[[0.0, 0.0]], &FeatureConfig::default()).unwrap_err();
        assert_eq!(
            err,
            FeatureError::Trajectory(TrajectoryError::TooShort { min: 2, actual: 1 })
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let traj = planar(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        let config = FeatureConfig::with_threshold(f64::NAN);
        assert!(matches!(
            build_vector(&traj, &config),
            Err(FeatureError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_overflowing_steps_rejected() {
        let traj = planar(&[[1e308, 0.0], [-1e308, 0.0], [1e308, 0.0], [-1e308, 0.0]]);
        assert_eq!(
            build_vector(&traj, &FeatureConfig::default()),
            Err(FeatureError::NonFinite {
                feature: "distance".to_string()
            })
        );
    }

    #[test]
    fn test_overflowing_velocity_rejected() {
        // finite distance, but steps of 1e10 over 1e-300 time units
        let rows = [
            [0.0, 0.0, 0.0],
            [1e10, 0.0, 1e-300],
            [2e10, 0.0, 2e-300],
            [3e10, 0.0, 3e-300],
        ];
        let traj = Trajectory::from_rows(&rows, RowLayout::Xyt).unwrap();
        assert_eq!(
            build_vector(&traj, &FeatureConfig::default()),
            Err(FeatureError::NonFinite {
                feature: "velocity_mean".to_string()
            })
        );
    }

    #[test]
    fn test_zero_mean_heading_policy() {
        // due east: every heading is 0
        let traj = planar(&[[0.0, 0.0], [1.0, 0.0], [3.0, 0.0], [6.0, 0.0]]);

        let nan = build_vector(&traj, &FeatureConfig::default()).unwrap();
        assert!(nan.value("angle_coef_var").unwrap().is_nan());

        let config = FeatureConfig {
            zero_mean_policy: ZeroMeanPolicy::Zero,
            ..Default::default()
        };
        let zero = build_vector(&traj, &config).unwrap();
        assert_eq!(zero.value("angle_coef_var"), Some(0.0));
        assert_eq!(zero.len(), nan.len());
    }

    #[test]
    fn test_slot_lookup_matches_signal() {
        let traj = planar(&[[0.0, 0.0], [0.0, 1.0], [0.0, 3.0], [0.0, 6.0], [0.0, 10.0]]);
        let features = build_vector(&traj, &FeatureConfig::default()).unwrap();
        // velocities [1, 2, 3, 4]
        assert_eq!(
            features.get(FeatureSlot::Stat(Signal::Velocity, Statistic::Max)),
            Some(4.0)
        );
        assert_eq!(
            features.get(FeatureSlot::Stat(Signal::Velocity, Statistic::Median)),
            Some(2.5)
        );
        // accelerations [1, 1, 1]
        assert_eq!(
            features.get(FeatureSlot::Stat(Signal::Acceleration, Statistic::Variance)),
            Some(0.0)
        );
        // stop rate counts v < 1: none; changes of 1 are not > 1
        assert_eq!(features.value("stop_rate"), Some(0.0));
        assert_eq!(features.value("velocity_change_rate"), Some(0.0));
    }

    #[test]
    fn test_named_pairs_follow_layout() {
        let traj = planar(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0], [3.0, 1.0]]);
        let features = build_vector(&traj, &FeatureConfig::default()).unwrap();
        let named: Vec<(String, f64)> = features.named().collect();
        assert_eq!(named.len(), FEATURE_DIMENSION);
        assert_eq!(named[0].0, "distance");
        assert_eq!(named[10].0, "stop_rate");
        assert_eq!(named[10].1, features.values[10]);
        for (name, value) in &named {
            assert_eq!(features.value(name).map(f64::to_bits), Some(value.to_bits()));
        }
        assert_eq!(features.value("velocity"), None);
    }
}
