//! Multi-slot carrier for heavy packages.

use crate::body::Body;
use crate::context::TickContext;
use crate::error::TransitError;
use crate::strategy::legs::{destination_leg, package_leg};
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use transit_env::EntityId;

/// Number of packages a dragon carries per batch.
pub const DRAGON_CAPACITY: usize = 2;

/// Where a slot's package is in its delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPhase {
    AwaitingPickup,
    Carried,
}

#[derive(Debug)]
struct Slot {
    package: EntityId,
    phase: SlotPhase,
    to_package: Box<dyn Strategy>,
    to_destination: Box<dyn Strategy>,
}

/// Collects a batch of heavy packages, then drops them off in order.
#[derive(Debug)]
pub struct Dragon {
    capacity: usize,
    slots: Vec<Slot>,
}

impl Dragon {
    pub fn new() -> Self {
        Self::with_capacity(DRAGON_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Packages currently assigned to this dragon.
    pub fn load(&self) -> usize {
        self.slots.len()
    }

    pub fn picked_up(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.phase == SlotPhase::Carried)
            .count()
    }

    pub fn is_available(&self) -> bool {
        self.slots.is_empty()
    }

    /// Package ids with their phase, in drop-off order.
    pub fn slots(&self) -> impl Iterator<Item = (EntityId, SlotPhase)> + '_ {
        self.slots.iter().map(|s| (s.package, s.phase))
    }

    /// Draws up to `capacity` packages from the heavy queue.
    ///
    /// Pickups are chained: each to-package leg starts where the previous
    /// one ends, and the drop-off legs continue from the last pickup.
    pub fn load_batch(&mut self, body: &Body, ctx: &mut TickContext<'_>) -> usize {
        let mut cursor = body.position;
        let mut drawn = Vec::new();

        while drawn.len() + self.slots.len() < self.capacity {
            let Some(id) = ctx.deliveries_mut().pop_heavy() else {
                break;
            };
            let Some((position, package)) = ctx.package(id) else {
                warn!("Queued heavy package {} is no longer registered", id);
                continue;
            };
            let to_package = package_leg(cursor, position);
            cursor = position;
            drawn.push((
                id,
                to_package,
                package.strategy_name().to_string(),
                package.destination(),
            ));
        }

        let count = drawn.len();
        for (package, to_package, strategy_name, destination) in drawn {
            let to_destination =
                destination_leg(&strategy_name, cursor, destination, ctx.routing());
            cursor = destination;
            self.slots.push(Slot {
                package,
                phase: SlotPhase::AwaitingPickup,
                to_package,
                to_destination,
            });
        }

        if count > 0 {
            debug!("Dragon loaded {} package(s)", count);
        }
        count
    }

    pub fn update(
        &mut self,
        body: &mut Body,
        dt: f64,
        ctx: &mut TickContext<'_>,
    ) -> Result<(), TransitError> {
        if self.slots.is_empty() {
            self.load_batch(body, ctx);
        }

        let pickup = self
            .slots
            .iter()
            .position(|s| s.phase == SlotPhase::AwaitingPickup);

        match pickup {
            Some(index) => {
                self.slots[index].to_package.step(body, dt)?;
                self.mirror_carried(body, ctx);

                let slot = &mut self.slots[index];
                if slot.to_package.is_completed() {
                    slot.phase = SlotPhase::Carried;
                    ctx.mirror_pose(slot.package, body);
                    debug!("Dragon picked up package {}", slot.package);
                }
            }
            None => {
                let Some(slot) = self.slots.first_mut() else {
                    return Ok(());
                };
                slot.to_destination.step(body, dt)?;
                self.mirror_carried(body, ctx);

                if self.slots[0].to_destination.is_completed() {
                    let slot = self.slots.remove(0);
                    ctx.hand_off(slot.package);
                }
            }
        }
        Ok(())
    }

    fn mirror_carried(&self, body: &Body, ctx: &mut TickContext<'_>) {
        for slot in self.slots.iter().filter(|s| s.phase == SlotPhase::Carried) {
            ctx.mirror_pose(slot.package, body);
        }
    }
}

impl Default for Dragon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, World};

    fn dragon(world: &World, id: EntityId) -> &Dragon {
        world.entities[&id].as_dragon().unwrap()
    }

    /// Dragon at the origin with three heavy deliveries queued.
    fn three_heavy() -> (World, EntityId, Vec<(EntityId, EntityId)>) {
        let mut world = World::new();
        let carrier = world.spawn(record("dragon", "Dragon", [0.0, 0.0, 0.0], 20.0));

        let mut pairs = Vec::new();
        for i in 0..3 {
            let name = format!("R{}", i);
            let x = 100.0 * (i + 1) as f64;
            let robot = world.robot(&name, [x, 0.0, 200.0]);
            let package = world.package(&format!("{}_package", name), [x, 0.0, 0.0], 80.0);
            world.schedule(package, robot, "");
            pairs.push((package, robot));
        }
        (world, carrier, pairs)
    }

    #[test]
    fn test_first_batch_draws_capacity() {
        let (mut world, carrier, pairs) = three_heavy();
        world.tick(carrier, 0.1).unwrap();

        let dragon = dragon(&world, carrier);
        assert_eq!(dragon.load(), DRAGON_CAPACITY);
        assert_eq!(dragon.picked_up(), 0);
        assert!(!dragon.is_available());
        assert_eq!(world.deliveries.heavy().iter().copied().collect::<Vec<_>>(), vec![pairs[2].0]);
    }

    #[test]
    fn test_third_package_waits_for_idle() {
        let (mut world, carrier, pairs) = three_heavy();

        let mut ticks = 0;
        while world.received(pairs[1].1).is_none() {
            world.tick(carrier, 1.0).unwrap();
            assert!(dragon(&world, carrier).load() <= DRAGON_CAPACITY);
            if dragon(&world, carrier).load() > 0 {
                assert_eq!(world.deliveries.heavy().len(), 1);
            }
            ticks += 1;
            assert!(ticks < 500);
        }

        assert_eq!(world.received(pairs[0].1), Some(pairs[0].0));
        assert!(dragon(&world, carrier).is_available());
        assert_eq!(world.deliveries.heavy().len(), 1);

        world.tick(carrier, 1.0).unwrap();
        assert_eq!(dragon(&world, carrier).load(), 1);
        assert!(world.deliveries.heavy().is_empty());
    }

    #[test]
    fn test_every_package_handed_off_once() {
        let (mut world, carrier, pairs) = three_heavy();

        for _ in 0..1000 {
            world.tick(carrier, 1.0).unwrap();
        }

        for (package, robot) in &pairs {
            assert_eq!(world.received(*robot), Some(*package));
        }
        assert!(dragon(&world, carrier).is_available());
        assert!(world.deliveries.is_empty());
    }

    #[test]
    fn test_carried_packages_follow_the_dragon() {
        let (mut world, carrier, pairs) = three_heavy();

        while dragon(&world, carrier).picked_up() < 2 {
            world.tick(carrier, 1.0).unwrap();
        }
        world.tick(carrier, 1.0).unwrap();

        let position = world.entities[&carrier].position();
        assert_eq!(world.entities[&pairs[0].0].position(), position);
        assert_eq!(world.entities[&pairs[1].0].position(), position);
    }

    #[test]
    fn test_empty_queue_leaves_dragon_idle() {
        let mut world = World::new();
        let carrier = world.spawn(record("dragon", "Dragon", [0.0, 0.0, 0.0], 20.0));
        world.tick(carrier, 1.0).unwrap();

        assert!(dragon(&world, carrier).is_available());
        assert_eq!(world.entities[&carrier].position(), nalgebra::Vector3::zeros());
    }
}
