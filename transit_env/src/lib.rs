//! Transit Environment Abstraction Layer
//!
//! This crate holds everything the simulation core exchanges with the
//! outside world, so the core can run against a real view/controller or a
//! headless recorder without change:
//! - **Records**: construction records and trip requests (`serde_json` values)
//! - **Routing**: the opaque pathfinding service (`get_path`)
//! - **Controller**: the observer notified about entity lifecycle and events
//!
//! # Example
//!
//! ```ignore
//! use transit_env::{Controller, Routing, SearchAlgorithm, StraightLineRouting};
//!
//! let routing = StraightLineRouting;
//! let path = routing.get_path([0.0; 3], [10.0, 0.0, 0.0], SearchAlgorithm::AStar);
//! assert_eq!(path.len(), 2);
//! ```

mod controller;
mod error;
mod record;
mod routing;
mod tracing_impl;
mod types;

pub use controller::Controller;
pub use error::EnvError;
pub use record::{ConstructionRecord, TripRequest};
pub use routing::{Routing, StraightLineRouting};
pub use tracing_impl::TracingController;
pub use types::{EntityId, EntitySnapshot, SearchAlgorithm};
