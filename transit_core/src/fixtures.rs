//! A miniature model for exercising carriers in unit tests.

use crate::context::TickContext;
use crate::delivery::DeliveryQueues;
use crate::entity::{Entity, IdGenerator, Registry};
use crate::error::TransitError;
use crate::factory::CompositeFactory;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use transit_env::{ConstructionRecord, EntityId, StraightLineRouting};

pub fn record(kind: &str, name: &str, position: [f64; 3], speed: f64) -> Value {
    json!({
        "type": kind,
        "name": name,
        "position": position,
        "direction": [1.0, 0.0, 0.0],
        "speed": speed
    })
}

pub struct World {
    pub entities: Registry,
    pub deliveries: DeliveryQueues,
    pub routing: StraightLineRouting,
    pub rng: ChaCha8Rng,
    ids: IdGenerator,
    factories: CompositeFactory,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Registry::new(),
            deliveries: DeliveryQueues::new(),
            routing: StraightLineRouting,
            rng: ChaCha8Rng::seed_from_u64(42),
            ids: IdGenerator::new(),
            factories: CompositeFactory::standard(),
        }
    }

    pub fn spawn(&mut self, value: Value) -> EntityId {
        let entity = self
            .factories
            .create(ConstructionRecord::new(value), &mut self.ids)
            .unwrap()
            .unwrap();
        let id = entity.id();
        self.entities.insert(id, entity);
        id
    }

    pub fn robot(&mut self, name: &str, position: [f64; 3]) -> EntityId {
        self.spawn(record("robot", name, position, 0.0))
    }

    pub fn package(&mut self, name: &str, position: [f64; 3], weight: f64) -> EntityId {
        let mut value = record("package", name, position, 0.0);
        value["weight"] = json!(weight);
        self.spawn(value)
    }

    /// Binds `package` to `robot` and queues it, as trip scheduling does.
    pub fn schedule(&mut self, package: EntityId, robot: EntityId, strategy: &str) {
        let destination = self.entities[&robot].position();
        self.entities
            .get_mut(&robot)
            .and_then(Entity::as_robot_mut)
            .unwrap()
            .clear_request();

        let payload = self
            .entities
            .get_mut(&package)
            .and_then(Entity::as_package_mut)
            .unwrap();
        payload.init_delivery(robot, destination);
        payload.set_strategy_name(strategy);
        let weight = payload.weight();
        self.deliveries.enqueue(package, weight);
    }

    pub fn ctx(&mut self) -> TickContext<'_> {
        TickContext::new(
            &mut self.entities,
            &mut self.deliveries,
            &self.routing,
            &mut self.rng,
        )
    }

    /// Updates a single entity the way the model does.
    pub fn tick(&mut self, id: EntityId, dt: f64) -> Result<(), TransitError> {
        let mut entity = self.entities.remove(&id).unwrap();
        let result = entity.update(dt, &mut self.ctx());
        self.entities.insert(id, entity);
        result
    }

    pub fn received(&self, robot: EntityId) -> Option<EntityId> {
        self.entities[&robot].as_robot().and_then(|r| r.package())
    }
}
