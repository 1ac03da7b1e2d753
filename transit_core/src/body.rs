//! Kinematic state moved by strategies.

use crate::math::rotate_vertical;
use nalgebra::Vector3;

/// Position, heading and speed of an entity.
///
/// Strategies only ever see this part of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector3<f64>,

    /// Unit-ish heading; set by path following, rotated by spins
    pub direction: Vector3<f64>,

    /// Distance units per second
    pub speed: f64,
}

impl Body {
    pub fn new(position: Vector3<f64>, direction: Vector3<f64>, speed: f64) -> Self {
        Self {
            position,
            direction,
            speed,
        }
    }

    /// Rotates the heading about the vertical axis by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.direction = rotate_vertical(&self.direction, angle);
    }

    /// Euclidean distance to `point`.
    pub fn distance_to(&self, point: &Vector3<f64>) -> f64 {
        (self.position - point).norm()
    }
}
