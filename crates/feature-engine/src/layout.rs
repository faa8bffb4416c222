//! Feature Vector Layout
//!
//! The field order of every feature vector, declared as data. Signal blocks
//! expand into one slot per [`Statistic`] in [`Statistic::ALL`] order.

use crate::motion::{ScalarFeature, Signal};
use crate::statistics::Statistic;

/// Number of features in the vector (3 scalars + 6 signals x 8 statistics)
pub const FEATURE_DIMENSION: usize = 51;

/// One field of the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureSlot {
    Scalar(ScalarFeature),
    Stat(Signal, Statistic),
}

impl FeatureSlot {
    /// Stable snake_case name, e.g. `distance` or `turning_angle_iqr`
    pub fn name(&self) -> String {
        match self {
            FeatureSlot::Scalar(feature) => feature.name().to_string(),
            FeatureSlot::Stat(signal, stat) => format!("{}_{}", signal.name(), stat.name()),
        }
    }

    /// Whether `name` is this slot's [`name`](Self::name), without allocating
    pub fn matches(&self, name: &str) -> bool {
        match self {
            FeatureSlot::Scalar(feature) => feature.name() == name,
            FeatureSlot::Stat(signal, stat) => name
                .strip_prefix(signal.name())
                .and_then(|rest| rest.strip_prefix('_'))
                .is_some_and(|rest| rest == stat.name()),
        }
    }
}

#[derive(Clone, Copy)]
enum Block {
    Scalar(ScalarFeature),
    Signal(Signal),
}

const BLOCKS: [Block; 9] = [
    Block::Scalar(ScalarFeature::Distance),
    Block::Signal(Signal::Velocity),
    Block::Scalar(ScalarFeature::VelocityChangeRate),
    Block::Scalar(ScalarFeature::StopRate),
    Block::Signal(Signal::Acceleration),
    Block::Signal(Signal::AccelerationChangeRate),
    Block::Signal(Signal::Angle),
    Block::Signal(Signal::TurningAngle),
    Block::Signal(Signal::HeadingChangeRate),
];

const fn expand(blocks: &[Block]) -> [FeatureSlot; FEATURE_DIMENSION] {
    let mut slots = [FeatureSlot::Scalar(ScalarFeature::Distance); FEATURE_DIMENSION];
    let mut idx = 0;
    let mut b = 0;
    while b < blocks.len() {
        match blocks[b] {
            Block::Scalar(feature) => {
                slots[idx] = FeatureSlot::Scalar(feature);
                idx += 1;
            }
            Block::Signal(signal) => {
                let mut s = 0;
                while s < Statistic::ALL.len() {
                    slots[idx] = FeatureSlot::Stat(signal, Statistic::ALL[s]);
                    idx += 1;
                    s += 1;
                }
            }
        }
        b += 1;
    }
    assert!(idx == FEATURE_DIMENSION, "layout blocks do not fill the vector");
    slots
}

/// Field order shared by every feature vector
pub const FEATURE_LAYOUT: [FeatureSlot; FEATURE_DIMENSION] = expand(&BLOCKS);

/// Names of all fields in layout order
pub fn feature_names() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(FeatureSlot::name).collect()
}

/// Position of a slot in the vector
pub fn slot_index(slot: FeatureSlot) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|s| *s == slot)
}
