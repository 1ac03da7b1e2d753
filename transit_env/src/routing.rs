//! Pathfinding service abstraction.

use crate::types::SearchAlgorithm;

/// The opaque pathfinding service consumed by graph-searched strategies.
///
/// # Implementations
///
/// - **Production**: a road/air graph searched with the selected algorithm
/// - **Headless**: [`StraightLineRouting`], which ignores the graph
///
/// # Contract
///
/// Returns the ordered waypoints from `start` to `end`. Waypoints are raw
/// coordinate lists; the movement layer rejects any that are not
/// three-dimensional when it uses them.
pub trait Routing {
    fn get_path(&self, start: [f64; 3], end: [f64; 3], algorithm: SearchAlgorithm) -> Vec<Vec<f64>>;
}

/// Routing service without a graph: every query yields `[start, end]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineRouting;

impl Routing for StraightLineRouting {
    fn get_path(
        &self,
        start: [f64; 3],
        end: [f64; 3],
        _algorithm: SearchAlgorithm,
    ) -> Vec<Vec<f64>> {
        vec![start.to_vec(), end.to_vec()]
    }
}

impl<R: Routing + ?Sized> Routing for Box<R> {
    fn get_path(
        &self,
        start: [f64; 3],
        end: [f64; 3],
        algorithm: SearchAlgorithm,
    ) -> Vec<Vec<f64>> {
        (**self).get_path(start, end, algorithm)
    }
}
