//! Deliverable packages and the weight view over them.

use nalgebra::Vector3;
use transit_env::EntityId;

/// A deliverable item.
///
/// The package's position lives on its entity body; this struct only
/// carries the delivery bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    destination: Vector3<f64>,
    strategy_name: String,

    /// Robot this package is delivered to
    owner: Option<EntityId>,

    requires_delivery: bool,
}

impl Package {
    pub fn new() -> Self {
        Self {
            destination: Vector3::zeros(),
            strategy_name: String::new(),
            owner: None,
            requires_delivery: true,
        }
    }

    pub fn destination(&self) -> Vector3<f64> {
        self.destination
    }

    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    pub fn set_strategy_name(&mut self, name: impl Into<String>) {
        self.strategy_name = name.into();
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn requires_delivery(&self) -> bool {
        self.requires_delivery
    }

    /// Binds the package to the robot at `owner_position`.
    pub fn init_delivery(&mut self, owner: EntityId, owner_position: Vector3<f64>) {
        self.owner = Some(owner);
        self.requires_delivery = false;
        self.destination = owner_position;
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

/// A package with a weight, which decides the delivery queue it joins.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPackage {
    package: Package,
    weight: f64,
}

impl WeightedPackage {
    pub fn new(package: Package, weight: f64) -> Self {
        Self { package, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn destination(&self) -> Vector3<f64> {
        self.package.destination()
    }

    pub fn strategy_name(&self) -> &str {
        self.package.strategy_name()
    }

    pub fn set_strategy_name(&mut self, name: impl Into<String>) {
        self.package.set_strategy_name(name);
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.package.owner()
    }

    pub fn requires_delivery(&self) -> bool {
        self.package.requires_delivery()
    }

    pub fn init_delivery(&mut self, owner: EntityId, owner_position: Vector3<f64>) {
        self.package.init_delivery(owner, owner_position);
    }
}
