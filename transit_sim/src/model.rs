//! SimulationModel - entity registry, tick loop and delivery matcher.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use tracing::{debug, info};
use transit_core::{
    CompositeFactory, DeliveryQueues, Entity, IdGenerator, Registry, TickContext, TransitError,
};
use transit_env::{ConstructionRecord, Controller, EntityId, Routing, TripRequest};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for every random draw the model makes
    pub seed: u64,

    /// Tick rate in Hz
    pub tick_rate_hz: u32,

    /// Maximum simulation duration in seconds
    pub max_duration_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: 30,
            max_duration_secs: 120.0,
        }
    }
}

impl SimConfig {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }

    /// Number of ticks that fit in `max_duration_secs`.
    pub fn max_ticks(&self) -> u64 {
        (self.max_duration_secs * self.tick_rate_hz as f64) as u64
    }
}

/// Owns every entity and drives them tick by tick.
pub struct SimulationModel<C: Controller, R: Routing> {
    config: SimConfig,
    controller: C,
    routing: R,
    factory: CompositeFactory,
    ids: IdGenerator,
    entities: Registry,
    deliveries: DeliveryQueues,

    /// Ids to drop once the current tick's updates are done
    removed: BTreeSet<EntityId>,

    rng: ChaCha8Rng,
    tick_count: u64,
    time: f64,
}

impl<C: Controller, R: Routing> SimulationModel<C, R> {
    /// Creates an empty model with every built-in entity factory.
    pub fn new(config: SimConfig, controller: C, routing: R) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        Self {
            config,
            controller,
            routing,
            factory: CompositeFactory::standard(),
            ids: IdGenerator::new(),
            entities: Registry::new(),
            deliveries: DeliveryQueues::new(),
            removed: BTreeSet::new(),
            rng,
            tick_count: 0,
            time: 0.0,
        }
    }

    /// Builds an entity from `record` and registers it.
    ///
    /// Returns `Ok(None)` if no factory handles the record's type.
    pub fn create_entity(
        &mut self,
        record: impl Into<ConstructionRecord>,
    ) -> Result<Option<EntityId>, TransitError> {
        let Some(entity) = self.factory.create(record.into(), &mut self.ids)? else {
            return Ok(None);
        };

        let id = entity.id();
        self.controller.add_entity(&entity.snapshot());
        self.entities.insert(id, entity);
        Ok(Some(id))
    }

    /// Advances every entity by `dt`, then applies queued removals.
    ///
    /// A movement contract violation aborts the tick and is returned.
    pub fn update(&mut self, dt: f64) -> Result<(), TransitError> {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();

        for id in ids {
            let Some(mut entity) = self.entities.remove(&id) else {
                continue;
            };

            let mut ctx = TickContext::new(
                &mut self.entities,
                &mut self.deliveries,
                &self.routing,
                &mut self.rng,
            );
            let result = entity.update(dt, &mut ctx);

            self.controller.update_entity(&entity.snapshot());
            self.entities.insert(id, entity);
            result?;
        }

        self.tick_count += 1;
        self.time += dt;
        self.apply_removals();
        Ok(())
    }

    /// Advances one tick at the configured rate.
    pub fn tick(&mut self) -> Result<(), TransitError> {
        self.update(self.config.dt())
    }

    /// Binds the robot named in `request` to its `<name>_package` and
    /// queues the delivery.
    ///
    /// Returns false, changing nothing, unless both a robot still waiting
    /// for a delivery and a package still requiring one are registered.
    pub fn schedule_trip(&mut self, request: &TripRequest) -> bool {
        let package_name = request.package_name();

        let robot = self
            .entities
            .values()
            .find(|e| {
                e.name() == request.name && e.as_robot().is_some_and(|r| r.requested_delivery())
            })
            .map(|e| (e.id(), e.position()));
        let package = self
            .entities
            .values()
            .find(|e| {
                e.name() == package_name && e.as_package().is_some_and(|p| p.requires_delivery())
            })
            .map(Entity::id);

        let (Some((robot_id, destination)), Some(package_id)) = (robot, package) else {
            debug!("Trip for '{}' not schedulable yet", request.name);
            return false;
        };

        if let Some(robot) = self.entities.get_mut(&robot_id).and_then(Entity::as_robot_mut) {
            robot.clear_request();
        }
        let Some(payload) = self
            .entities
            .get_mut(&package_id)
            .and_then(Entity::as_package_mut)
        else {
            return false;
        };
        payload.init_delivery(robot_id, destination);
        payload.set_strategy_name(request.search.as_str());
        let weight = payload.weight();

        let queue = self.deliveries.enqueue(package_id, weight);
        info!(
            "Scheduled {} (weight {:.1}, {:?} queue) for robot '{}' via '{}'",
            package_name, weight, queue, request.name, request.search
        );

        self.controller
            .send_event_to_view("DeliveryScheduled", &request.details);
        true
    }

    /// Marks `id` for removal at the end of the next update.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.removed.insert(id);
    }

    fn apply_removals(&mut self) {
        for id in std::mem::take(&mut self.removed) {
            self.deliveries.purge(id);
            if let Some(entity) = self.entities.remove(&id) {
                info!("Removed {} '{}'", id, entity.name());
                self.controller.remove_entity(&entity.snapshot());
            }
        }
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// First entity with display name `name`, in id order.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.values().find(|e| e.name() == name)
    }

    /// All entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn deliveries(&self) -> &DeliveryQueues {
        &self.deliveries
    }

    /// Ids awaiting removal.
    pub fn pending_removals(&self) -> &BTreeSet<EntityId> {
        &self.removed
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated seconds elapsed.
    pub fn time(&self) -> f64 {
        self.time
    }
}
