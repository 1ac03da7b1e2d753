//! Leg construction shared by the carriers.

use super::{Celebration, PathStrategy, Strategy};
use nalgebra::Vector3;
use transit_env::{Routing, SearchAlgorithm};

/// Leg from the carrier to a waiting package: always a plain Beeline.
pub fn package_leg(from: Vector3<f64>, to: Vector3<f64>) -> Box<dyn Strategy> {
    Box::new(PathStrategy::beeline(from, to))
}

/// Leg from a package to its destination.
///
/// The search-strategy name picks both the search algorithm and the
/// celebration played on arrival:
///
/// | name | leg |
/// |------|-----|
/// | `astar` | Jump(A*) |
/// | `dfs` | Spin(Jump(DFS)) |
/// | `bfs` | Spin(Spin(BFS)) |
/// | `dijkstra` | Jump(Spin(Dijkstra)) |
/// | other | Beeline |
pub fn destination_leg(
    strategy_name: &str,
    from: Vector3<f64>,
    to: Vector3<f64>,
    routing: &dyn Routing,
) -> Box<dyn Strategy> {
    let searched = |algorithm| -> Box<dyn Strategy> {
        Box::new(PathStrategy::searched(from, to, routing, algorithm))
    };

    match strategy_name.parse::<SearchAlgorithm>() {
        Ok(SearchAlgorithm::AStar) => {
            Box::new(Celebration::jump_default(searched(SearchAlgorithm::AStar)))
        }
        Ok(SearchAlgorithm::DepthFirst) => Box::new(Celebration::spin_default(Box::new(
            Celebration::jump_default(searched(SearchAlgorithm::DepthFirst)),
        ))),
        Ok(SearchAlgorithm::BreadthFirst) => Box::new(Celebration::spin_default(Box::new(
            Celebration::spin_default(searched(SearchAlgorithm::BreadthFirst)),
        ))),
        Ok(SearchAlgorithm::Dijkstra) => Box::new(Celebration::jump_default(Box::new(
            Celebration::spin_default(searched(SearchAlgorithm::Dijkstra)),
        ))),
        Err(_) => Box::new(PathStrategy::beeline(from, to)),
    }
}
