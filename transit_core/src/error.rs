//! Error types for the transit core.

use thiserror::Error;
use transit_env::EnvError;

/// Errors raised by movement and entity construction.
///
/// Path and axis errors are contract violations: they abort the current
/// computation and propagate out of the simulation tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitError {
    #[error("Path must contain at least two points, got {0}")]
    PathTooShort(usize),

    #[error("Waypoint {index} has {len} coordinates, expected exactly three (x, y and z)")]
    MalformedWaypoint { index: usize, len: usize },

    #[error("Axis {0} not in range for vector")]
    AxisOutOfRange(usize),

    #[error("Record error: {0}")]
    Record(#[from] EnvError),
}
