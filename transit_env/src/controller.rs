//! Observer interface between the simulation model and the view.

use crate::types::EntitySnapshot;
use serde_json::Value;

/// Receives entity lifecycle notifications and view events from the model.
///
/// # Call Pattern
///
/// ```text
/// create_entity ──> add_entity(snapshot)
/// update(dt)    ──> update_entity(snapshot)   once per entity per tick
///               ──> remove_entity(snapshot)   for removals queued this tick
/// schedule_trip ──> send_event_to_view("DeliveryScheduled", request)
/// stop          ──> stop()
/// ```
pub trait Controller {
    fn add_entity(&mut self, entity: &EntitySnapshot);

    fn update_entity(&mut self, entity: &EntitySnapshot);

    fn remove_entity(&mut self, entity: &EntitySnapshot);

    /// Forwards a named event with its payload record to the view.
    fn send_event_to_view(&mut self, event: &str, details: &Value);

    fn stop(&mut self);
}
