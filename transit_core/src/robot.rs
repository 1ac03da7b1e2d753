//! Robots: the receiving end of a delivery.

use transit_env::EntityId;

/// A deliverer waiting for (and eventually holding) a package.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    /// True while the robot waits for a trip to be scheduled
    requested_delivery: bool,

    /// Package handed off to this robot
    package: Option<EntityId>,
}

impl Robot {
    pub fn new() -> Self {
        Self {
            requested_delivery: true,
            package: None,
        }
    }

    pub fn requested_delivery(&self) -> bool {
        self.requested_delivery
    }

    /// Called once a trip for this robot has been scheduled.
    pub fn clear_request(&mut self) {
        self.requested_delivery = false;
    }

    pub fn package(&self) -> Option<EntityId> {
        self.package
    }

    pub fn receive(&mut self, package: EntityId) {
        self.package = Some(package);
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new()
    }
}
