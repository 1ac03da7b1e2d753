//! Movement strategies and their decorators.
//!
//! Every strategy follows the same contract: `step` advances a [`Body`] by
//! one tick, `is_completed` reports arrival, and `total_distance` reports the
//! length of the underlying waypoint path. Decorators own their inner
//! strategy and forward `total_distance` to it, so callers never need to know
//! what a boxed strategy really is.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PathStrategy`] | Waypoint following (Beeline or graph-searched) |
//! | [`Celebration`] | Timed jump/spin after the inner strategy completes |
//! | [`legs`] | Leg composition used by carriers |

mod celebration;
pub mod legs;
mod path;

pub use celebration::{Celebration, CelebrationKind};
pub use path::{PathStrategy, SNAP_DISTANCE};

use crate::body::Body;
use crate::error::TransitError;

/// Interchangeable movement algorithm.
pub trait Strategy: std::fmt::Debug {
    /// Advances `body` by one tick of length `dt`.
    fn step(&mut self, body: &mut Body, dt: f64) -> Result<(), TransitError>;

    fn is_completed(&self) -> bool;

    /// Sum of the distances between consecutive waypoints.
    fn total_distance(&self) -> Result<f64, TransitError>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn step(&mut self, body: &mut Body, dt: f64) -> Result<(), TransitError> {
        (**self).step(body, dt)
    }

    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }

    fn total_distance(&self) -> Result<f64, TransitError> {
        (**self).total_distance()
    }
}
