//! Trajectory Records

use crate::error::TrajectoryError;
use crate::path::{RowLayout, Trajectory};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the raw trajectory rows in a record
pub const TRAJ_DATA_KEY: &str = "traj_data";

/// A labelled trajectory as supplied by a data source
///
/// Only `traj_data` is consumed; every other key is carried as metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traj_data: Option<Vec<Vec<f64>>>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl TrajectoryRecord {
    /// Record holding only raw rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self {
            traj_data: Some(rows),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Validate the raw rows into a trajectory
    pub fn trajectory(&self, layout: RowLayout) -> Result<Trajectory, TrajectoryError> {
        let rows = self
            .traj_data
            .as_ref()
            .ok_or(TrajectoryError::MissingField(TRAJ_DATA_KEY))?;
        Trajectory::from_rows(rows, layout)
    }
}
