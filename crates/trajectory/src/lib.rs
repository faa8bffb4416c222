//! Trajectory Data Model
//!
//! Validated movement trajectories, the raw records they are read from,
//! and the data sources that supply those records.

mod error;
mod path;
mod record;
mod source;

pub use error::{SourceError, TrajectoryError};
pub use path::{RowLayout, Trajectory, TrajectoryPoint, MIN_POINTS};
pub use record::{TrajectoryRecord, TRAJ_DATA_KEY};
pub use source::{DataSource, JsonFileSource};
