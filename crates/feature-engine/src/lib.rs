//! Trajectory Feature Engine
//!
//! Turns movement trajectories into fixed-layout feature vectors for
//! classification and clustering. Six motion signals (velocity,
//! acceleration, acceleration change rate, heading, turning angle and
//! heading change rate) are each summarised by eight statistics and
//! combined with three whole-trajectory scalars: distance, velocity change
//! rate and stop rate. See [`FEATURE_LAYOUT`] for the field order.

mod batch;
mod config;
mod error;
mod features;
mod layout;
pub mod motion;
pub mod statistics;

pub use batch::build_batch;
pub use config::{FailurePolicy, FeatureConfig};
pub use error::FeatureError;
pub use features::{build_vector, build_vector_from_rows, FeatureExtractor, FeatureVector};
pub use layout::{feature_names, slot_index, FeatureSlot, FEATURE_DIMENSION, FEATURE_LAYOUT};
pub use motion::{ScalarFeature, Signal};
pub use statistics::{StatisticalFeatures, Statistic, ZeroMeanPolicy};
