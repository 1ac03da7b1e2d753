//! Transit Core - Movement, Carriers and Delivery State Machines
//!
//! This library holds the domain logic of the transit simulation:
//! 1. **Movement**: waypoint strategies and the celebration decorators that wrap them
//! 2. **Carriers**: the battery-gated single-slot drone and the multi-slot dragon
//! 3. **Registry pieces**: entities, delivery queues, the per-tick context and the
//!    factory composite

pub mod battery;
pub mod body;
pub mod context;
pub mod delivery;
pub mod dragon;
pub mod drone;
pub mod entity;
pub mod error;
pub mod factory;
pub mod math;
pub mod package;
pub mod robot;
pub mod strategy;
pub mod wanderer;

#[cfg(test)]
mod fixtures;

// Re-export key types for convenience
pub use battery::{BatteryConfig, BatteryDrone, PowerPhase, CHARGER_STATIONS, FULL_CHARGE};
pub use body::Body;
pub use context::TickContext;
pub use delivery::{DeliveryQueues, QueueKind, WEIGHT_THRESHOLD};
pub use dragon::{Dragon, SlotPhase, DRAGON_CAPACITY};
pub use drone::{DeliveryPlan, Drone};
pub use entity::{Behavior, Entity, IdGenerator, Registry};
pub use error::TransitError;
pub use factory::{CompositeFactory, EntityFactory, TaggedFactory};
pub use package::{Package, WeightedPackage};
pub use robot::Robot;
pub use strategy::{Celebration, CelebrationKind, PathStrategy, Strategy, SNAP_DISTANCE};
pub use wanderer::{WanderStyle, Wanderer};
