//! Entity construction from records.
//!
//! Each [`EntityFactory`] handles one type tag; [`CompositeFactory`] tries
//! them in registration order and uses the first whose tag matches.

use crate::battery::{BatteryConfig, BatteryDrone};
use crate::dragon::Dragon;
use crate::drone::Drone;
use crate::entity::{Behavior, Entity, IdGenerator};
use crate::error::TransitError;
use crate::package::{Package, WeightedPackage};
use crate::robot::Robot;
use crate::wanderer::{WanderStyle, Wanderer};
use tracing::{info, warn};
use transit_env::{ConstructionRecord, EntityId};

/// Builds entities of a single kind.
pub trait EntityFactory: std::fmt::Debug {
    /// The `type` value this factory handles.
    fn type_tag(&self) -> &str;

    fn create(&self, id: EntityId, record: ConstructionRecord) -> Result<Entity, TransitError>;
}

type BuildFn = fn(&ConstructionRecord) -> Result<Behavior, TransitError>;

/// Factory pairing a type tag with a behavior constructor.
#[derive(Clone, Copy)]
pub struct TaggedFactory {
    tag: &'static str,
    build: BuildFn,
}

impl TaggedFactory {
    pub fn new(tag: &'static str, build: BuildFn) -> Self {
        Self { tag, build }
    }

    /// Battery-gated drone.
    pub fn drone() -> Self {
        Self::new("drone", |record| {
            let config = BatteryConfig::from_record(record)?;
            Ok(Behavior::Drone(BatteryDrone::new(Drone::new(), config)))
        })
    }

    /// Weighted package; `weight` defaults to zero.
    pub fn package() -> Self {
        Self::new("package", |record| {
            let weight = record.number("weight")?.unwrap_or(0.0);
            Ok(Behavior::Package(WeightedPackage::new(Package::new(), weight)))
        })
    }

    pub fn robot() -> Self {
        Self::new("robot", |_| Ok(Behavior::Robot(Robot::new())))
    }

    pub fn human() -> Self {
        Self::new("human", |_| Ok(Behavior::Wanderer(Wanderer::new(WanderStyle::Human))))
    }

    pub fn helicopter() -> Self {
        Self::new("helicopter", |_| {
            Ok(Behavior::Wanderer(Wanderer::new(WanderStyle::Helicopter)))
        })
    }

    pub fn dragon() -> Self {
        Self::new("dragon", |_| Ok(Behavior::Dragon(Dragon::new())))
    }

    pub fn duck() -> Self {
        Self::new("duck", |_| Ok(Behavior::Wanderer(Wanderer::new(WanderStyle::Duck))))
    }

    pub fn charger() -> Self {
        Self::new("charger", |_| Ok(Behavior::Charger))
    }

    /// One factory per entity kind, in the order the model registers them.
    pub fn all() -> [TaggedFactory; 8] {
        [
            Self::drone(),
            Self::package(),
            Self::robot(),
            Self::human(),
            Self::helicopter(),
            Self::dragon(),
            Self::duck(),
            Self::charger(),
        ]
    }
}

impl std::fmt::Debug for TaggedFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedFactory").field("tag", &self.tag).finish()
    }
}

impl EntityFactory for TaggedFactory {
    fn type_tag(&self) -> &str {
        self.tag
    }

    fn create(&self, id: EntityId, record: ConstructionRecord) -> Result<Entity, TransitError> {
        let behavior = (self.build)(&record)?;
        let entity = Entity::from_record(id, record, behavior)?;
        info!("{} created: {} ({})", self.tag, entity.name(), id);
        Ok(entity)
    }
}

/// Tries factories in registration order.
#[derive(Debug, Default)]
pub struct CompositeFactory {
    factories: Vec<Box<dyn EntityFactory>>,
}

impl CompositeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite holding every built-in factory.
    pub fn standard() -> Self {
        let mut composite = Self::new();
        for factory in TaggedFactory::all() {
            composite.add_factory(Box::new(factory));
        }
        composite
    }

    pub fn add_factory(&mut self, factory: Box<dyn EntityFactory>) {
        self.factories.push(factory);
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds an entity from `record`, drawing an id only on a match.
    ///
    /// An unknown type yields `Ok(None)`.
    pub fn create(
        &self,
        record: ConstructionRecord,
        ids: &mut IdGenerator,
    ) -> Result<Option<Entity>, TransitError> {
        let tag = record.type_tag()?.to_string();

        match self.factories.iter().find(|f| f.type_tag() == tag) {
            Some(factory) => factory.create(ids.next_id(), record).map(Some),
            None => {
                warn!("No factory for entity type '{}'", tag);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use transit_env::EnvError;

    fn record(kind: &str) -> ConstructionRecord {
        ConstructionRecord::new(json!({
            "type": kind,
            "name": format!("{}-1", kind),
            "position": [0.0, 0.0, 0.0],
            "direction": [1.0, 0.0, 0.0],
            "speed": 10.0
        }))
    }

    #[test]
    fn test_standard_composite_builds_every_kind() {
        let composite = CompositeFactory::standard();
        let mut ids = IdGenerator::new();
        assert_eq!(composite.len(), 8);

        for kind in [
            "drone",
            "package",
            "robot",
            "human",
            "helicopter",
            "dragon",
            "duck",
            "charger",
        ] {
            let entity = composite.create(record(kind), &mut ids).unwrap().unwrap();
            assert_eq!(entity.kind(), kind);
        }
        assert_eq!(ids.issued(), 8);
    }

    #[test]
    fn test_unknown_type_consumes_no_id() {
        let composite = CompositeFactory::standard();
        let mut ids = IdGenerator::new();

        assert!(composite.create(record("submarine"), &mut ids).unwrap().is_none());
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn test_first_matching_factory_wins() {
        let mut composite = CompositeFactory::new();
        composite.add_factory(Box::new(TaggedFactory::new("robot", |_| Ok(Behavior::Charger))));
        composite.add_factory(Box::new(TaggedFactory::robot()));

        let entity = composite
            .create(record("robot"), &mut IdGenerator::new())
            .unwrap()
            .unwrap();
        assert!(matches!(entity.behavior, Behavior::Charger));
    }

    #[test]
    fn test_package_weight_from_string() {
        let composite = CompositeFactory::standard();
        let mut value = record("package").as_value().clone();
        value["weight"] = json!("75.5");

        let entity = composite
            .create(ConstructionRecord::new(value), &mut IdGenerator::new())
            .unwrap()
            .unwrap();
        assert_eq!(entity.as_package().map(|p| p.weight()), Some(75.5));
    }

    #[test]
    fn test_drone_record_overrides_battery() {
        let mut value = record("drone").as_value().clone();
        value["battery"] = json!(20);
        value["consumption_rate"] = json!(1.5);

        let entity = TaggedFactory::drone()
            .create(EntityId(0), ConstructionRecord::new(value))
            .unwrap();
        let drone = entity.as_drone().unwrap();
        assert_eq!(drone.level(), 20.0);
        assert_eq!(drone.config().stationary_rate, 1.5);
        assert_eq!(drone.config().moving_rate, 1.5);
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let mut value = record("package").as_value().clone();
        value["weight"] = json!("heavy");

        let err = CompositeFactory::standard()
            .create(ConstructionRecord::new(value), &mut IdGenerator::new())
            .unwrap_err();
        assert!(matches!(err, TransitError::Record(EnvError::InvalidField { .. })));
    }
}
