//! Validated Trajectories

use crate::error::TrajectoryError;
use serde::{Deserialize, Serialize};

/// Minimum number of points in a trajectory (one step)
pub const MIN_POINTS: usize = 2;

/// A single sampled position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    /// Zero for planar input
    pub z: f64,
    /// Timestamp; the row index when the input has no time column
    pub t: f64,
}

impl TrajectoryPoint {
    /// Planar point
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, z: 0.0, t }
    }

    /// Euclidean distance to another point (all three axes)
    pub fn distance_to(&self, other: &TrajectoryPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.t.is_finite()
    }
}

/// Column layout of a raw trajectory row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowLayout {
    /// `[x, y]`, unit time steps
    #[default]
    Xy,
    /// `[x, y, t]`
    Xyt,
    /// `[x, y, z]`, unit time steps
    Xyz,
    /// `[x, y, z, t]`
    Xyzt,
}

impl RowLayout {
    /// Number of values in each row
    pub fn width(self) -> usize {
        match self {
            RowLayout::Xy => 2,
            RowLayout::Xyt | RowLayout::Xyz => 3,
            RowLayout::Xyzt => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowLayout::Xy => "xy",
            RowLayout::Xyt => "xyt",
            RowLayout::Xyz => "xyz",
            RowLayout::Xyzt => "xyzt",
        }
    }

    fn point(self, index: usize, row: &[f64]) -> TrajectoryPoint {
        let implicit_t = index as f64;
        match self {
            RowLayout::Xy => TrajectoryPoint::new(row[0], row[1], implicit_t),
            RowLayout::Xyt => TrajectoryPoint::new(row[0], row[1], row[2]),
            RowLayout::Xyz => TrajectoryPoint {
                x: row[0],
                y: row[1],
                z: row[2],
                t: implicit_t,
            },
            RowLayout::Xyzt => TrajectoryPoint {
                x: row[0],
                y: row[1],
                z: row[2],
                t: row[3],
            },
        }
    }
}

impl std::str::FromStr for RowLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(RowLayout::Xy),
            "xyt" => Ok(RowLayout::Xyt),
            "xyz" => Ok(RowLayout::Xyz),
            "xyzt" => Ok(RowLayout::Xyzt),
            other => Err(format!("unknown row layout: {other}")),
        }
    }
}

/// Ordered, validated sequence of positions
///
/// Holds at least [`MIN_POINTS`] points, every value finite, with strictly
/// increasing timestamps. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Build from points, checking length, finiteness and time order
    pub fn new(points: Vec<TrajectoryPoint>) -> Result<Self, TrajectoryError> {
        if points.len() < MIN_POINTS {
            return Err(TrajectoryError::TooShort {
                min: MIN_POINTS,
                actual: points.len(),
            });
        }

        for (index, point) in points.iter().enumerate() {
            if !point.is_finite() {
                return Err(TrajectoryError::NonFinite { index });
            }
            if index > 0 && point.t <= points[index - 1].t {
                return Err(TrajectoryError::NonMonotonicTime { index });
            }
        }

        Ok(Self { points })
    }

    /// Build from raw numeric rows laid out as `layout`
    pub fn from_rows<R: AsRef<[f64]>>(
        rows: &[R],
        layout: RowLayout,
    ) -> Result<Self, TrajectoryError> {
        let expected = layout.width();
        let mut points = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(TrajectoryError::InvalidDimension {
                    index,
                    expected,
                    actual: row.len(),
                });
            }
            points.push(layout.point(index, row));
        }

        Self::new(points)
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated trajectory
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of steps (consecutive point pairs)
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    /// Time elapsed over each step, all strictly positive
    pub fn time_deltas(&self) -> Vec<f64> {
        self.points.windows(2).map(|w| w[1].t - w[0].t).collect()
    }

    /// Copy of this trajectory with every position shifted by the same offset.
    /// Fails with [`TrajectoryError::NonFinite`] if a shifted coordinate overflows.
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Result<Self, TrajectoryError> {
        let points = self
            .points
            .iter()
            .map(|p| TrajectoryPoint {
                x: p.x + dx,
                y: p.y + dy,
                z: p.z + dz,
                t: p.t,
            })
            .collect();
        Self::new(points)
    }
}
