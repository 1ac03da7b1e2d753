//! Common types shared across the environment boundary.

use crate::error::EnvError;
use serde::{Deserialize, Serialize};

/// Unique identifier for a simulated entity.
///
/// Ids are handed out by the owning model in increasing order and are
/// never reused within that model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Returns the raw integer id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Graph search selector understood by the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    AStar,
}

impl SearchAlgorithm {
    /// Returns all selectors.
    pub fn all() -> [SearchAlgorithm; 4] {
        [
            SearchAlgorithm::BreadthFirst,
            SearchAlgorithm::DepthFirst,
            SearchAlgorithm::Dijkstra,
            SearchAlgorithm::AStar,
        ]
    }

    /// Returns the short name used in trip requests.
    pub fn name(&self) -> &'static str {
        match self {
            SearchAlgorithm::BreadthFirst => "bfs",
            SearchAlgorithm::DepthFirst => "dfs",
            SearchAlgorithm::Dijkstra => "dijkstra",
            SearchAlgorithm::AStar => "astar",
        }
    }
}

impl std::fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SearchAlgorithm {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(SearchAlgorithm::BreadthFirst),
            "dfs" => Ok(SearchAlgorithm::DepthFirst),
            "dijkstra" => Ok(SearchAlgorithm::Dijkstra),
            "astar" => Ok(SearchAlgorithm::AStar),
            _ => Err(EnvError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Read-only view of an entity handed to the controller.
///
/// The controller never sees the entity itself, only this copy of the
/// state it needs for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,

    /// Type tag from the construction record ("drone", "package", ...)
    pub kind: String,

    pub name: String,

    pub position: [f64; 3],

    pub direction: [f64; 3],

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_round_trip_names() {
        for algorithm in SearchAlgorithm::all() {
            let parsed: SearchAlgorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "teleport".parse::<SearchAlgorithm>().unwrap_err();
        assert_eq!(err, EnvError::UnknownAlgorithm("teleport".to_string()));
    }

    #[test]
    fn test_entity_id_ordering() {
        assert!(EntityId(1) < EntityId(2));
        assert_eq!(EntityId(7).to_string(), "#7");
    }
}
