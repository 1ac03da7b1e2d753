//! Single-slot carrier.

use crate::body::Body;
use crate::context::TickContext;
use crate::error::TransitError;
use crate::strategy::legs::{destination_leg, package_leg};
use crate::strategy::Strategy;
use tracing::debug;
use transit_env::EntityId;

/// The two legs of a delivery that has not been committed to yet.
#[derive(Debug)]
pub struct DeliveryPlan {
    pub package: EntityId,
    pub to_package: Box<dyn Strategy>,
    pub to_destination: Box<dyn Strategy>,
}

impl DeliveryPlan {
    /// Length of both legs together.
    pub fn total_distance(&self) -> Result<f64, TransitError> {
        Ok(self.to_package.total_distance()? + self.to_destination.total_distance()?)
    }
}

/// Carries one light package at a time.
#[derive(Debug)]
pub struct Drone {
    available: bool,
    package: Option<EntityId>,
    picked_up: bool,
    moving: bool,
    to_package: Option<Box<dyn Strategy>>,
    to_destination: Option<Box<dyn Strategy>>,
}

impl Drone {
    pub fn new() -> Self {
        Self {
            available: true,
            package: None,
            picked_up: false,
            moving: false,
            to_package: None,
            to_destination: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_picked_up(&self) -> bool {
        self.picked_up
    }

    pub fn package(&self) -> Option<EntityId> {
        self.package
    }

    /// Builds the legs for the package at the front of the light queue.
    ///
    /// The queue is left untouched.
    pub fn plan_next_delivery(&self, body: &Body, ctx: &TickContext<'_>) -> Option<DeliveryPlan> {
        let id = *ctx.deliveries().light().front()?;
        let (position, package) = ctx.package(id)?;

        Some(DeliveryPlan {
            package: id,
            to_package: package_leg(body.position, position),
            to_destination: destination_leg(
                package.strategy_name(),
                position,
                package.destination(),
                ctx.routing(),
            ),
        })
    }

    /// Commits to `plan`, taking its package off the light queue.
    pub fn accept(&mut self, plan: DeliveryPlan, ctx: &mut TickContext<'_>) {
        ctx.deliveries_mut().remove_light(plan.package);
        debug!("Drone accepted package {}", plan.package);

        self.package = Some(plan.package);
        self.to_package = Some(plan.to_package);
        self.to_destination = Some(plan.to_destination);
        self.available = false;
        self.picked_up = false;
    }

    pub fn update(
        &mut self,
        body: &mut Body,
        dt: f64,
        ctx: &mut TickContext<'_>,
    ) -> Result<(), TransitError> {
        if self.available {
            if let Some(plan) = self.plan_next_delivery(body, ctx) {
                self.accept(plan, ctx);
            }
        }

        if let Some(leg) = self.to_package.as_mut() {
            leg.step(body, dt)?;
            self.moving = true;
            if leg.is_completed() {
                self.to_package = None;
                self.picked_up = true;
                self.moving = false;
            }
        } else if let Some(leg) = self.to_destination.as_mut() {
            leg.step(body, dt)?;
            self.moving = true;
            if let (Some(package), true) = (self.package, self.picked_up) {
                ctx.mirror_pose(package, body);
            }
            if leg.is_completed() {
                self.to_destination = None;
                self.moving = false;
                if let Some(package) = self.package.take() {
                    ctx.hand_off(package);
                }
                self.available = true;
                self.picked_up = false;
            }
        }
        Ok(())
    }
}

impl Default for Drone {
    fn default() -> Self {
        Self::new()
    }
}
