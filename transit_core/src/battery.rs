//! Battery gating for the single-slot drone.
//!
//! Before committing to a delivery the drone checks that its remaining
//! charge covers both legs. When it does not, it flies to the nearest
//! charger, refills, and flies back to where it stopped:
//!
//! ```text
//! Working ──(infeasible)──▶ MustCharge ──▶ Outbound ──(arrived, 100%)──▶ Returning ──▶ Working
//! ```

use crate::body::Body;
use crate::context::TickContext;
use crate::drone::Drone;
use crate::error::TransitError;
use crate::strategy::{Celebration, PathStrategy, Strategy};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use transit_env::ConstructionRecord;

/// Battery level after a visit to a charger.
pub const FULL_CHARGE: f64 = 100.0;

/// Charging stations known to every drone.
pub const CHARGER_STATIONS: [[f64; 3]; 25] = [
    [498.292, 270.0, -228.623],
    [-698.510, 254.664, 13.222],
    [-282.063, 254.664, -95.990],
    [143.436, 254.664, -107.486],
    [-23.485, 254.664, -93.116],
    [-255.850, 254.664, -236.818],
    [-22.485, 254.664, -228.195],
    [264.146, 254.664, -219.573],
    [-309.223, 254.664, 85.073],
    [113.259, 254.664, 217.279],
    [390.891, 254.664, 277.633],
    [-918.805, 254.664, 47.711],
    [-903.716, 254.664, -170.715],
    [-939.929, 254.664, 314.996],
    [-816.202, 254.664, 562.163],
    [-656.262, 254.664, 309.248],
    [-562.712, 254.664, 579.407],
    [-1063.656, 254.664, 562.163],
    [-1244.720, 254.664, 214.405],
    [37.816, 254.664, -472.488],
    [396.926, 254.664, 16.096],
    [635.327, 254.664, -95.990],
    [743.965, 254.664, 162.672],
    [571.955, 254.664, -294.298],
    [170.596, 254.664, -679.419],
];

/// Battery parameters of a drone.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryConfig {
    pub initial_level: f64,

    /// Drain per second while carrying out a delivery
    pub stationary_rate: f64,

    /// Drain per second while flying to or from a charger
    pub moving_rate: f64,

    pub chargers: Vec<Vector3<f64>>,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            initial_level: FULL_CHARGE,
            stationary_rate: 0.5,
            moving_rate: 0.5,
            chargers: CHARGER_STATIONS
                .iter()
                .map(|c| Vector3::new(c[0], c[1], c[2]))
                .collect(),
        }
    }
}

impl BatteryConfig {
    /// Defaults, overridden by the optional `battery` and
    /// `consumption_rate` fields of a drone record.
    pub fn from_record(record: &ConstructionRecord) -> Result<Self, TransitError> {
        let mut config = Self::default();
        if let Some(level) = record.number("battery")? {
            config.initial_level = level;
        }
        if let Some(rate) = record.number("consumption_rate")? {
            config.stationary_rate = rate;
            config.moving_rate = rate;
        }
        Ok(config)
    }
}

/// Coarse view of the charge cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerPhase {
    Working,
    MustCharge,
    Outbound,
    Returning,
}

#[derive(Debug)]
enum PowerState {
    Working,
    MustCharge,
    Outbound {
        out: Box<dyn Strategy>,
        back: Box<dyn Strategy>,
    },
    Returning {
        back: Box<dyn Strategy>,
    },
}

/// A [`Drone`] that only takes deliveries its battery can cover.
#[derive(Debug)]
pub struct BatteryDrone {
    drone: Drone,
    level: f64,
    config: BatteryConfig,
    state: PowerState,

    /// Set after a charge cycle; the next plan is accepted unconditionally
    recharged: bool,
}

impl BatteryDrone {
    pub fn new(drone: Drone, config: BatteryConfig) -> Self {
        Self {
            drone,
            level: config.initial_level,
            config,
            state: PowerState::Working,
            recharged: false,
        }
    }

    pub fn drone(&self) -> &Drone {
        &self.drone
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn config(&self) -> &BatteryConfig {
        &self.config
    }

    pub fn phase(&self) -> PowerPhase {
        match self.state {
            PowerState::Working => PowerPhase::Working,
            PowerState::MustCharge => PowerPhase::MustCharge,
            PowerState::Outbound { .. } => PowerPhase::Outbound,
            PowerState::Returning { .. } => PowerPhase::Returning,
        }
    }

    /// True from the moment a charge is required until the drone is back.
    pub fn must_charge(&self) -> bool {
        !matches!(self.state, PowerState::Working)
    }

    /// Distance the current charge allows at `speed`.
    pub fn flyable_distance(&self, speed: f64) -> f64 {
        self.level / self.config.stationary_rate * speed
    }

    /// Nearest charger to `from`, or the origin if none are known.
    pub fn find_charger(&self, from: &Vector3<f64>) -> Vector3<f64> {
        let nearest = self
            .config
            .chargers
            .iter()
            .min_by(|a, b| (*a - from).norm().total_cmp(&(*b - from).norm()));

        match nearest {
            Some(charger) => *charger,
            None => {
                warn!("No chargers available, heading to the origin");
                Vector3::zeros()
            }
        }
    }

    pub fn update(
        &mut self,
        body: &mut Body,
        dt: f64,
        ctx: &mut TickContext<'_>,
    ) -> Result<(), TransitError> {
        if matches!(self.state, PowerState::Working) {
            self.check_next_delivery(body, ctx)?;

            if matches!(self.state, PowerState::Working) {
                self.drone.update(body, dt, ctx)?;
                if !self.drone.is_available() {
                    self.drain(self.config.stationary_rate * dt);
                }
                return Ok(());
            }
        }

        if matches!(self.state, PowerState::MustCharge) {
            let charger = self.find_charger(&body.position);
            info!(
                "Battery at {:.1}, flying to charger at ({:.1}, {:.1}, {:.1})",
                self.level, charger.x, charger.y, charger.z
            );

            let beeline = PathStrategy::beeline(body.position, charger);
            self.state = PowerState::Outbound {
                out: Box::new(Celebration::jump_default(Box::new(Celebration::spin_default(
                    Box::new(beeline),
                )))),
                back: Box::new(PathStrategy::beeline(charger, body.position)),
            };
        }

        self.step_charge_cycle(body, dt)
    }

    /// Accepts the next light delivery if the battery covers it, otherwise
    /// sets the must-charge latch and leaves the package queued.
    fn check_next_delivery(
        &mut self,
        body: &Body,
        ctx: &mut TickContext<'_>,
    ) -> Result<(), TransitError> {
        if !self.drone.is_available() {
            return Ok(());
        }
        let Some(plan) = self.drone.plan_next_delivery(body, ctx) else {
            return Ok(());
        };

        let total = plan.total_distance()?;
        let flyable = self.flyable_distance(body.speed);

        if flyable > total {
            self.recharged = false;
            self.drone.accept(plan, ctx);
        } else if self.recharged {
            warn!(
                "Delivery needs {:.1} but a full charge covers {:.1}, flying anyway",
                total, flyable
            );
            self.recharged = false;
            self.drone.accept(plan, ctx);
        } else {
            debug!("Flyable {:.1} < required {:.1}, must charge", flyable, total);
            self.state = PowerState::MustCharge;
        }
        Ok(())
    }

    fn step_charge_cycle(&mut self, body: &mut Body, dt: f64) -> Result<(), TransitError> {
        let drain = self.config.moving_rate * dt;

        match &mut self.state {
            PowerState::Outbound { out, .. } => {
                out.step(body, dt)?;
                let arrived = out.is_completed();
                self.drain(drain);

                if arrived {
                    self.level = FULL_CHARGE;
                    info!("Fully charged");
                    if let PowerState::Outbound { back, .. } =
                        std::mem::replace(&mut self.state, PowerState::MustCharge)
                    {
                        self.state = PowerState::Returning { back };
                    }
                }
            }
            PowerState::Returning { back } => {
                back.step(body, dt)?;
                let arrived = back.is_completed();
                self.drain(drain);

                if arrived {
                    debug!("Back from charger");
                    self.state = PowerState::Working;
                    self.recharged = true;
                }
            }
            PowerState::Working | PowerState::MustCharge => {}
        }
        Ok(())
    }

    fn drain(&mut self, amount: f64) {
        self.level -= amount;
        if self.level < 0.0 {
            warn!("Drone out of battery ({:.2})", self.level);
        }
    }
}
