//! Vector helpers on top of `nalgebra::Vector3`.

use crate::error::TransitError;
use nalgebra::Vector3;

/// Lengths below this are treated as zero.
pub const EPSILON: f64 = 1e-7;

/// Index of the vertical (up) axis.
pub const VERTICAL_AXIS: usize = 1;

/// Unit vector in the direction of `v`.
///
/// A zero-length vector is returned unchanged instead of producing NaNs.
pub fn unit(v: &Vector3<f64>) -> Vector3<f64> {
    let magnitude = v.norm();
    if magnitude < EPSILON {
        *v
    } else {
        v / magnitude
    }
}

/// Checked component access.
pub fn axis(v: &Vector3<f64>, index: usize) -> Result<f64, TransitError> {
    v.get(index).copied().ok_or(TransitError::AxisOutOfRange(index))
}

pub fn from_array(a: [f64; 3]) -> Vector3<f64> {
    Vector3::new(a[0], a[1], a[2])
}

pub fn to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Converts waypoint `index` of a raw path into a vector.
pub fn waypoint(coords: &[f64], index: usize) -> Result<Vector3<f64>, TransitError> {
    match coords {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(TransitError::MalformedWaypoint {
            index,
            len: coords.len(),
        }),
    }
}

/// Rotates `dir` about the vertical axis by `angle` radians.
pub fn rotate_vertical(dir: &Vector3<f64>, angle: f64) -> Vector3<f64> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(dir.x * cos - dir.z * sin, dir.y, dir.x * sin + dir.z * cos)
}
