//! Transit Delivery Simulation Harness
//!
//! This crate owns the tick loop: a [`SimulationModel`] holds every entity,
//! matches trip requests to packages, and drives per-entity updates in id
//! order. Everything it reports goes through a [`transit_env::Controller`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    SimulationModel                       │
//! │  ┌────────────────┐   create_entity   ┌───────────────┐  │
//! │  │CompositeFactory│──────────────────►│   Registry    │  │
//! │  └────────────────┘                   │ (id → Entity) │  │
//! │                                       └───────┬───────┘  │
//! │  schedule_trip ──► DeliveryQueues ◄──── TickContext      │
//! │                    (light / heavy)            │          │
//! │                                         Routing (paths)  │
//! └───────────────────────────────┬──────────────────────────┘
//!                                 │ add / update / remove / events
//!                           ┌─────▼──────┐
//!                           │ Controller │
//!                           └────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use transit_sim::{RecordingController, SimConfig, SimulationModel};
//! use transit_env::StraightLineRouting;
//!
//! let mut model = SimulationModel::new(
//!     SimConfig::default(),
//!     RecordingController::new(),
//!     StraightLineRouting,
//! );
//! model.create_entity(serde_json::json!({ "type": "robot", /* ... */ }))?;
//! model.tick()?;
//! ```

mod error;
mod exporter;
mod model;
mod recorder;
mod runner;
pub mod scenarios;

pub use error::SimError;
pub use exporter::{SimEvent, SimExport, SimFrame};
pub use model::{SimConfig, SimulationModel};
pub use recorder::RecordingController;
pub use runner::{ScenarioResult, ScenarioRunner};
