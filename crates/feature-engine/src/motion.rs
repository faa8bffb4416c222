//! Motion Signals
//!
//! Per-step signals and whole-trajectory scalars derived from a validated
//! trajectory. A derived sample is the change of its parent signal divided
//! by the duration of the step in which that change completes.

use crate::error::FeatureError;
use std::f64::consts::{PI, TAU};
use trajectory::Trajectory;

/// Per-step signal reduced into the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Velocity = 0,
    Acceleration = 1,
    AccelerationChangeRate = 2,
    Angle = 3,
    TurningAngle = 4,
    HeadingChangeRate = 5,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::Velocity,
        Signal::Acceleration,
        Signal::AccelerationChangeRate,
        Signal::Angle,
        Signal::TurningAngle,
        Signal::HeadingChangeRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::Velocity => "velocity",
            Signal::Acceleration => "acceleration",
            Signal::AccelerationChangeRate => "acceleration_change_rate",
            Signal::Angle => "angle",
            Signal::TurningAngle => "turning_angle",
            Signal::HeadingChangeRate => "heading_change_rate",
        }
    }

    /// Position in [`Signal::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Evaluate this signal on a trajectory
    pub fn compute(self, traj: &Trajectory) -> Vec<f64> {
        match self {
            Signal::Velocity => velocity(traj),
            Signal::Acceleration => acceleration(traj),
            Signal::AccelerationChangeRate => acceleration_change_rate(traj),
            Signal::Angle => angle(traj),
            Signal::TurningAngle => turning_angle(traj),
            Signal::HeadingChangeRate => heading_change_rate(traj),
        }
    }
}

/// Whole-trajectory scalar feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFeature {
    Distance,
    VelocityChangeRate,
    StopRate,
}

impl ScalarFeature {
    pub fn name(self) -> &'static str {
        match self {
            ScalarFeature::Distance => "distance",
            ScalarFeature::VelocityChangeRate => "velocity_change_rate",
            ScalarFeature::StopRate => "stop_rate",
        }
    }
}

/// Total path length. Overflow propagates as `inf`; the extractor rejects it.
pub fn distance(traj: &Trajectory) -> f64 {
    traj.points()
        .windows(2)
        .map(|w| w[0].distance_to(&w[1]))
        .sum()
}

/// Speed over each step, `n - 1` samples
pub fn velocity(traj: &Trajectory) -> Vec<f64> {
    traj.points()
        .windows(2)
        .map(|w| w[0].distance_to(&w[1]) / (w[1].t - w[0].t))
        .collect()
}

/// Change in velocity per unit time, `n - 2` samples
pub fn acceleration(traj: &Trajectory) -> Vec<f64> {
    let dts = traj.time_deltas();
    rate_of_change(&velocity(traj), &dts[1..])
}

/// Change in acceleration per unit time (jerk), `n - 3` samples
pub fn acceleration_change_rate(traj: &Trajectory) -> Vec<f64> {
    let dts = traj.time_deltas();
    let acc = acceleration(traj);
    rate_of_change(&acc, dts.get(2..).unwrap_or(&[]))
}

/// Heading of each step in radians, `(-PI, PI]`, `n - 1` samples
///
/// A zero-length step has heading 0.
pub fn angle(traj: &Trajectory) -> Vec<f64> {
    traj.points()
        .windows(2)
        .map(|w| {
            let heading = (w[1].y - w[0].y).atan2(w[1].x - w[0].x);
            // atan2 yields -PI for (-0.0, negative x)
            if heading == -PI {
                PI
            } else {
                heading
            }
        })
        .collect()
}

/// Signed change of heading between consecutive steps, `n - 2` samples
pub fn turning_angle(traj: &Trajectory) -> Vec<f64> {
    angle(traj)
        .windows(2)
        .map(|w| wrap_angle(w[1] - w[0]))
        .collect()
}

/// Turning angle per unit time, `n - 2` samples
pub fn heading_change_rate(traj: &Trajectory) -> Vec<f64> {
    let dts = traj.time_deltas();
    turning_angle(traj)
        .iter()
        .zip(&dts[1..])
        .map(|(turn, dt)| turn / dt)
        .collect()
}

/// Fraction of velocity changes whose magnitude exceeds `threshold`
pub fn vel_change_rate(traj: &Trajectory, threshold: f64) -> Result<f64, FeatureError> {
    velocity_change_fraction(&velocity(traj), threshold)
}

/// Fraction of steps slower than `threshold`
pub fn stop_rate(traj: &Trajectory, threshold: f64) -> Result<f64, FeatureError> {
    stop_fraction(&velocity(traj), threshold)
}

pub(crate) fn velocity_change_fraction(
    velocity: &[f64],
    threshold: f64,
) -> Result<f64, FeatureError> {
    let changes: Vec<f64> = velocity.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    fraction(&changes, ScalarFeature::VelocityChangeRate, |c| c > threshold)
}

pub(crate) fn stop_fraction(velocity: &[f64], threshold: f64) -> Result<f64, FeatureError> {
    fraction(velocity, ScalarFeature::StopRate, |v| v < threshold)
}

fn fraction(
    values: &[f64],
    feature: ScalarFeature,
    pred: impl Fn(f64) -> bool,
) -> Result<f64, FeatureError> {
    if values.is_empty() {
        return Err(FeatureError::InsufficientData {
            signal: feature.name(),
        });
    }
    let hits = values.iter().filter(|&&v| pred(v)).count();
    Ok(hits as f64 / values.len() as f64)
}

fn rate_of_change(values: &[f64], dts: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .zip(dts)
        .map(|(w, dt)| (w[1] - w[0]) / dt)
        .collect()
}

/// Wrap an angle into `(-PI, PI]`
fn wrap_angle(a: f64) -> f64 {
    let wrapped = (a + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
