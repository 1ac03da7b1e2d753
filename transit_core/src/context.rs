//! Per-tick view of the model handed to an entity while it updates.

use crate::body::Body;
use crate::delivery::DeliveryQueues;
use crate::entity::{Behavior, Entity, Registry};
use crate::package::WeightedPackage;
use nalgebra::Vector3;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use transit_env::{EntityId, Routing};

/// Everything an entity may touch while it is being updated.
///
/// The updating entity itself has been taken out of `entities`, so it
/// never aliases anything reachable from here.
pub struct TickContext<'a> {
    entities: &'a mut Registry,
    deliveries: &'a mut DeliveryQueues,
    routing: &'a dyn Routing,
    rng: &'a mut ChaCha8Rng,
}

impl<'a> TickContext<'a> {
    pub fn new(
        entities: &'a mut Registry,
        deliveries: &'a mut DeliveryQueues,
        routing: &'a dyn Routing,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            entities,
            deliveries,
            routing,
            rng,
        }
    }

    pub fn routing(&self) -> &dyn Routing {
        self.routing
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut *self.rng
    }

    pub fn deliveries(&self) -> &DeliveryQueues {
        &*self.deliveries
    }

    pub fn deliveries_mut(&mut self) -> &mut DeliveryQueues {
        &mut *self.deliveries
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Current position and delivery state of package `id`.
    pub fn package(&self, id: EntityId) -> Option<(Vector3<f64>, &WeightedPackage)> {
        let entity = self.entities.get(&id)?;
        entity.as_package().map(|p| (entity.body.position, p))
    }

    /// Moves a carried package along with its carrier.
    pub fn mirror_pose(&mut self, id: EntityId, carrier: &Body) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.body.position = carrier.position;
            entity.body.direction = carrier.direction;
        }
    }

    /// Hands package `id` to the robot that owns it.
    ///
    /// Returns false if the package or its owner is no longer registered.
    pub fn hand_off(&mut self, id: EntityId) -> bool {
        let Some(owner) = self.package(id).and_then(|(_, p)| p.owner()) else {
            warn!("Package {} has no owner to hand off to", id);
            return false;
        };

        match self.entities.get_mut(&owner).map(|e| &mut e.behavior) {
            Some(Behavior::Robot(robot)) => {
                robot.receive(id);
                info!("Package {} handed off to robot {}", id, owner);
                true
            }
            _ => {
                warn!("Owner {} of package {} is gone", owner, id);
                false
            }
        }
    }
}
