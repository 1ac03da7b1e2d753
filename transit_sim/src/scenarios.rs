//! Built-in delivery scenarios.

use crate::error::SimError;
use serde_json::{json, Value};

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// One drone, one robot, one light package
    Courier,

    /// One dragon, three heavy packages: a batch of two, then one
    HeavyHaul,

    /// A drone too low on battery must visit a charger first
    Recharge,

    /// Mixed scene: both carriers, wanderers and chargers
    City,
}

/// Entities to create and trips to request, in order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub records: Vec<Value>,
    pub trips: Vec<Value>,
}

impl Scene {
    fn add(&mut self, kind: &str, name: &str, position: [f64; 3], speed: f64) -> &mut Value {
        self.records.push(json!({
            "type": kind,
            "name": name,
            "position": position,
            "direction": [1.0, 0.0, 0.0],
            "speed": speed,
        }));
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    /// Adds a robot, its package and the trip between them.
    fn delivery(
        &mut self,
        robot: &str,
        at: [f64; 3],
        package_at: [f64; 3],
        weight: Value,
        search: &str,
    ) {
        self.add("robot", robot, at, 0.0);
        self.add("package", &format!("{}_package", robot), package_at, 0.0)["weight"] = weight;
        self.trips.push(json!({ "name": robot, "search": search }));
    }
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Courier,
            ScenarioId::HeavyHaul,
            ScenarioId::Recharge,
            ScenarioId::City,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Courier => "courier",
            ScenarioId::HeavyHaul => "heavy_haul",
            ScenarioId::Recharge => "recharge",
            ScenarioId::City => "city",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Courier => "Single drone delivers one light package via A*",
            ScenarioId::HeavyHaul => "Dragon hauls three heavy packages in batches of two",
            ScenarioId::Recharge => "Low-battery drone recharges before its delivery",
            ScenarioId::City => "Drone, dragon, wanderers and chargers sharing the map",
        }
    }

    /// Builds the scenario's entities and trip requests.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();

        match self {
            ScenarioId::Courier => {
                scene.add("drone", "Drone", [0.0, 260.0, 0.0], 30.0);
                scene.delivery(
                    "R1",
                    [300.0, 260.0, 200.0],
                    [100.0, 260.0, 0.0],
                    json!(10),
                    "astar",
                );
            }
            ScenarioId::HeavyHaul => {
                scene.add("dragon", "Dragon", [0.0, 260.0, 0.0], 40.0);
                scene.delivery("R1", [-200.0, 260.0, 300.0], [100.0, 260.0, 0.0], json!(60), "");
                scene.delivery(
                    "R2",
                    [250.0, 260.0, 300.0],
                    [150.0, 260.0, 100.0],
                    json!("75.5"),
                    "dijkstra",
                );
                scene.delivery(
                    "R3",
                    [0.0, 260.0, -300.0],
                    [-100.0, 260.0, 50.0],
                    json!(120),
                    "astar",
                );
            }
            ScenarioId::Recharge => {
                scene.add("drone", "Drone", [0.0, 260.0, 0.0], 30.0)["battery"] = json!(5);
                scene.add("charger", "Charger", [-23.485, 254.664, -93.116], 0.0);
                scene.delivery("R1", [400.0, 260.0, 400.0], [400.0, 260.0, 0.0], json!(20), "");
            }
            ScenarioId::City => {
                scene.add("drone", "Drone", [0.0, 260.0, 0.0], 40.0);
                scene.add("dragon", "Dragon", [100.0, 260.0, 100.0], 40.0);
                scene.add("human", "Human", [-50.0, 254.0, 20.0], 10.0);
                scene.add("helicopter", "Helicopter", [200.0, 450.0, -100.0], 25.0);
                scene.add("duck", "Duck", [-300.0, 270.0, 300.0], 15.0);
                scene.add("charger", "Charger-1", [143.436, 254.664, -107.486], 0.0);
                scene.add("charger", "Charger-2", [-282.063, 254.664, -95.990], 0.0);
                scene.delivery(
                    "Alice",
                    [300.0, 260.0, 200.0],
                    [50.0, 260.0, 50.0],
                    json!(12),
                    "bfs",
                );
                scene.delivery(
                    "Bob",
                    [-250.0, 260.0, -150.0],
                    [-100.0, 260.0, 0.0],
                    json!("30"),
                    "dfs",
                );
                scene.delivery(
                    "Carol",
                    [200.0, 260.0, -250.0],
                    [150.0, 260.0, 150.0],
                    json!(90),
                    "dijkstra",
                );
                scene.delivery(
                    "Dave",
                    [-150.0, 260.0, 250.0],
                    [0.0, 260.0, 200.0],
                    json!(55),
                    "astar",
                );
            }
        }
        scene
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "courier" => Ok(ScenarioId::Courier),
            "heavy_haul" | "heavyhaul" => Ok(ScenarioId::HeavyHaul),
            "recharge" => Ok(ScenarioId::Recharge),
            "city" => Ok(ScenarioId::City),
            _ => Err(SimError::UnknownScenario(s.to_string())),
        }
    }
}
