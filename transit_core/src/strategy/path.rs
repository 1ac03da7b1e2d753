//! Waypoint following.

use super::Strategy;
use crate::body::Body;
use crate::error::TransitError;
use crate::math::{to_array, unit, waypoint};
use nalgebra::Vector3;
use transit_env::{Routing, SearchAlgorithm};

/// A waypoint counts as reached once the body is closer than this.
pub const SNAP_DISTANCE: f64 = 4.0;

/// Follows an ordered list of waypoints at the body's speed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStrategy {
    path: Vec<Vec<f64>>,

    /// Next waypoint to reach; never decreases
    index: usize,
}

impl PathStrategy {
    pub fn new(path: Vec<Vec<f64>>) -> Self {
        Self { path, index: 0 }
    }

    /// Direct two-point line from `from` to `to`.
    pub fn beeline(from: Vector3<f64>, to: Vector3<f64>) -> Self {
        Self::new(vec![to_array(&from).to_vec(), to_array(&to).to_vec()])
    }

    /// Path obtained from the routing service under `algorithm`.
    pub fn searched(
        from: Vector3<f64>,
        to: Vector3<f64>,
        routing: &dyn Routing,
        algorithm: SearchAlgorithm,
    ) -> Self {
        Self::new(routing.get_path(to_array(&from), to_array(&to), algorithm))
    }

    pub fn path(&self) -> &[Vec<f64>] {
        &self.path
    }

    /// Cursor into the path.
    pub fn index(&self) -> usize {
        self.index
    }

    fn current(&self) -> Result<Vector3<f64>, TransitError> {
        waypoint(&self.path[self.index], self.index)
    }
}

impl Strategy for PathStrategy {
    fn step(&mut self, body: &mut Body, dt: f64) -> Result<(), TransitError> {
        // Waypoints already within reach (typically the start point) cost no tick.
        while !self.is_completed() && body.distance_to(&self.current()?) < SNAP_DISTANCE {
            self.index += 1;
        }
        if self.is_completed() {
            return Ok(());
        }

        let target = self.current()?;
        let offset = target - body.position;
        let dir = unit(&offset);

        // Stop on the waypoint, never past it.
        body.position += dir * (body.speed * dt).min(offset.norm());
        body.direction = dir;

        if body.distance_to(&target) < SNAP_DISTANCE {
            self.index += 1;
        }
        Ok(())
    }

    fn is_completed(&self) -> bool {
        self.index >= self.path.len()
    }

    fn total_distance(&self) -> Result<f64, TransitError> {
        if self.path.len() < 2 {
            return Err(TransitError::PathTooShort(self.path.len()));
        }

        let mut total = 0.0;
        for i in 1..self.path.len() {
            let prev = waypoint(&self.path[i - 1], i - 1)?;
            let next = waypoint(&self.path[i], i)?;
            total += (next - prev).norm();
        }
        Ok(total)
    }
}
