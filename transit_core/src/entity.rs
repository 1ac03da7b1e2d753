//! Registered entities and their per-kind behavior.

use crate::battery::BatteryDrone;
use crate::body::Body;
use crate::context::TickContext;
use crate::dragon::Dragon;
use crate::error::TransitError;
use crate::math::{from_array, to_array};
use crate::package::WeightedPackage;
use crate::robot::Robot;
use crate::wanderer::Wanderer;
use nalgebra::Vector3;
use std::collections::BTreeMap;
use transit_env::{ConstructionRecord, EntityId, EntitySnapshot};

/// All live entities, iterated in id order.
pub type Registry = BTreeMap<EntityId, Entity>;

/// What an entity does on each tick.
#[derive(Debug)]
pub enum Behavior {
    /// Battery-gated single-slot carrier
    Drone(BatteryDrone),
    /// Multi-slot carrier
    Dragon(Dragon),
    Package(WeightedPackage),
    Robot(Robot),
    Wanderer(Wanderer),
    /// Static charging station
    Charger,
}

/// A simulated agent.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,

    /// Type tag from the construction record
    kind: String,

    name: String,
    color: Option<String>,

    /// The construction record, kept verbatim
    details: ConstructionRecord,

    pub body: Body,
    pub behavior: Behavior,
}

impl Entity {
    /// Reads the common fields of `record` and attaches `behavior`.
    pub fn from_record(
        id: EntityId,
        record: ConstructionRecord,
        behavior: Behavior,
    ) -> Result<Self, TransitError> {
        let body = Body::new(
            from_array(record.position()?),
            from_array(record.direction()?),
            record.speed()?,
        );

        Ok(Self {
            id,
            kind: record.type_tag()?.to_string(),
            name: record.name()?.to_string(),
            color: record.color().map(str::to_string),
            details: record,
            body,
            behavior,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn details(&self) -> &ConstructionRecord {
        &self.details
    }

    pub fn position(&self) -> Vector3<f64> {
        self.body.position
    }

    pub fn direction(&self) -> Vector3<f64> {
        self.body.direction
    }

    /// Advances this entity by one tick.
    pub fn update(&mut self, dt: f64, ctx: &mut TickContext<'_>) -> Result<(), TransitError> {
        match &mut self.behavior {
            Behavior::Drone(drone) => drone.update(&mut self.body, dt, ctx),
            Behavior::Dragon(dragon) => dragon.update(&mut self.body, dt, ctx),
            Behavior::Wanderer(wanderer) => wanderer.update(&mut self.body, dt, ctx),
            Behavior::Package(_) | Behavior::Robot(_) | Behavior::Charger => Ok(()),
        }
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind.clone(),
            name: self.name.clone(),
            position: to_array(&self.body.position),
            direction: to_array(&self.body.direction),
            color: self.color.clone(),
        }
    }

    pub fn as_robot(&self) -> Option<&Robot> {
        match &self.behavior {
            Behavior::Robot(robot) => Some(robot),
            _ => None,
        }
    }

    pub fn as_robot_mut(&mut self) -> Option<&mut Robot> {
        match &mut self.behavior {
            Behavior::Robot(robot) => Some(robot),
            _ => None,
        }
    }

    pub fn as_package(&self) -> Option<&WeightedPackage> {
        match &self.behavior {
            Behavior::Package(package) => Some(package),
            _ => None,
        }
    }

    pub fn as_package_mut(&mut self) -> Option<&mut WeightedPackage> {
        match &mut self.behavior {
            Behavior::Package(package) => Some(package),
            _ => None,
        }
    }

    pub fn as_drone(&self) -> Option<&BatteryDrone> {
        match &self.behavior {
            Behavior::Drone(drone) => Some(drone),
            _ => None,
        }
    }

    pub fn as_dragon(&self) -> Option<&Dragon> {
        match &self.behavior {
            Behavior::Dragon(dragon) => Some(dragon),
            _ => None,
        }
    }
}

/// Hands out entity ids in increasing order, starting at zero.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
