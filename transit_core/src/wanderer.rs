//! Decorative entities that roam between random destinations.

use crate::body::Body;
use crate::context::TickContext;
use crate::error::TransitError;
use crate::strategy::{PathStrategy, Strategy};
use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::trace;
use transit_env::SearchAlgorithm;

/// Horizontal extent of the map.
pub const WANDER_X: RangeInclusive<f64> = -1400.0..=1500.0;
pub const WANDER_Z: RangeInclusive<f64> = -800.0..=800.0;

/// Altitude band ducks fly in.
pub const DUCK_ALTITUDE: RangeInclusive<f64> = 240.0..=300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WanderStyle {
    /// Walks the road graph at ground level
    Human,
    /// Flies straight lines at its current altitude
    Helicopter,
    /// Flies the road graph at a random altitude
    Duck,
}

/// Roams forever: once a destination is reached a new one is drawn.
#[derive(Debug)]
pub struct Wanderer {
    style: WanderStyle,
    movement: Option<Box<dyn Strategy>>,
    destination: Option<Vector3<f64>>,
}

impl Wanderer {
    pub fn new(style: WanderStyle) -> Self {
        Self {
            style,
            movement: None,
            destination: None,
        }
    }

    pub fn style(&self) -> WanderStyle {
        self.style
    }

    pub fn destination(&self) -> Option<Vector3<f64>> {
        self.destination
    }

    /// Steps toward the current destination, or picks a new one.
    ///
    /// Picking a destination takes the whole tick.
    pub fn update(
        &mut self,
        body: &mut Body,
        dt: f64,
        ctx: &mut TickContext<'_>,
    ) -> Result<(), TransitError> {
        if let Some(movement) = self.movement.as_mut() {
            if !movement.is_completed() {
                return movement.step(body, dt);
            }
        }

        let destination = self.pick_destination(body, ctx);
        trace!(
            "{:?} heading to ({:.1}, {:.1}, {:.1})",
            self.style,
            destination.x,
            destination.y,
            destination.z
        );

        let movement: Box<dyn Strategy> = match self.style {
            WanderStyle::Helicopter => Box::new(PathStrategy::beeline(body.position, destination)),
            WanderStyle::Human | WanderStyle::Duck => Box::new(PathStrategy::searched(
                body.position,
                destination,
                ctx.routing(),
                SearchAlgorithm::AStar,
            )),
        };
        self.movement = Some(movement);
        self.destination = Some(destination);
        Ok(())
    }

    fn pick_destination(&self, body: &Body, ctx: &mut TickContext<'_>) -> Vector3<f64> {
        let rng = ctx.rng();
        let x = rng.gen_range(WANDER_X);
        let z = rng.gen_range(WANDER_Z);
        let y = match self.style {
            WanderStyle::Duck => rng.gen_range(DUCK_ALTITUDE),
            WanderStyle::Human | WanderStyle::Helicopter => body.position.y,
        };
        Vector3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, World};
    use transit_env::EntityId;

    fn wanderer(world: &World, id: EntityId) -> &Wanderer {
        match &world.entities[&id].behavior {
            crate::entity::Behavior::Wanderer(w) => w,
            other => panic!("not a wanderer: {:?}", other),
        }
    }

    #[test]
    fn test_first_tick_only_picks_a_destination() {
        let mut world = World::new();
        let human = world.spawn(record("human", "Human", [0.0, 0.0, 0.0], 5.0));

        world.tick(human, 1.0).unwrap();

        assert_eq!(world.entities[&human].position(), Vector3::zeros());
        let destination = wanderer(&world, human).destination().unwrap();
        assert!(WANDER_X.contains(&destination.x));
        assert!(WANDER_Z.contains(&destination.z));
        assert_eq!(destination.y, 0.0);
    }

    #[test]
    fn test_duck_flies_in_altitude_band() {
        let mut world = World::new();
        let duck = world.spawn(record("duck", "Duck", [0.0, 0.0, 0.0], 5.0));

        world.tick(duck, 1.0).unwrap();

        let destination = wanderer(&world, duck).destination().unwrap();
        assert!(DUCK_ALTITUDE.contains(&destination.y));
        assert_eq!(wanderer(&world, duck).style(), WanderStyle::Duck);
    }

    #[test]
    fn test_helicopter_keeps_altitude_and_moves() {
        let mut world = World::new();
        let heli = world.spawn(record("helicopter", "Heli", [0.0, 120.0, 0.0], 50.0));

        world.tick(heli, 1.0).unwrap();
        world.tick(heli, 1.0).unwrap();

        let entity = &world.entities[&heli];
        assert_eq!(wanderer(&world, heli).destination().unwrap().y, 120.0);
        assert!((entity.position().y - 120.0).abs() < 1e-9);
        assert!(entity.position().x != 0.0 || entity.position().z != 0.0);
    }

    #[test]
    fn test_same_seed_same_destinations() {
        let pick = || {
            let mut world = World::new();
            let human = world.spawn(record("human", "Human", [0.0, 0.0, 0.0], 5.0));
            world.tick(human, 1.0).unwrap();
            wanderer(&world, human).destination()
        };
        assert_eq!(pick(), pick());
    }
}
