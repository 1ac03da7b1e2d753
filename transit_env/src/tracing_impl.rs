//! Controller implementation that only logs.

use crate::controller::Controller;
use crate::types::EntitySnapshot;
use serde_json::Value;
use tracing::{debug, info, trace};

/// Headless controller that reports every callback through `tracing`.
///
/// Per-tick updates are logged at `trace` level so a normal run stays quiet.
#[derive(Debug, Default)]
pub struct TracingController {
    stopped: bool,
}

impl TracingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once `stop()` has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Controller for TracingController {
    fn add_entity(&mut self, entity: &EntitySnapshot) {
        info!("added {} {} '{}' at {:?}", entity.kind, entity.id, entity.name, entity.position);
    }

    fn update_entity(&mut self, entity: &EntitySnapshot) {
        trace!("{} '{}' -> {:?}", entity.id, entity.name, entity.position);
    }

    fn remove_entity(&mut self, entity: &EntitySnapshot) {
        info!("removed {} '{}'", entity.id, entity.name);
    }

    fn send_event_to_view(&mut self, event: &str, details: &Value) {
        debug!("event {}: {}", event, details);
    }

    fn stop(&mut self) {
        self.stopped = true;
        info!("controller stopped");
    }
}
