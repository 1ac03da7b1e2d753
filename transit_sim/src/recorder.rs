//! Controller that keeps everything it is told.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};
use transit_env::{Controller, EntityId, EntitySnapshot};

/// Headless controller used by the runner and tests.
///
/// Keeps the latest snapshot per entity plus every event, so a run can be
/// inspected or exported afterwards.
#[derive(Debug, Default)]
pub struct RecordingController {
    added: Vec<EntitySnapshot>,
    latest: BTreeMap<EntityId, EntitySnapshot>,
    removed: Vec<EntitySnapshot>,
    events: Vec<(String, Value)>,

    /// Events not yet taken by [`RecordingController::take_events`]
    pending: Vec<(String, Value)>,

    update_count: u64,
    stopped: bool,
}

impl RecordingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(&self) -> &[EntitySnapshot] {
        &self.added
    }

    /// Latest known state of every live entity, in id order.
    pub fn latest(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.latest.values()
    }

    pub fn snapshot(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.latest.get(&id)
    }

    pub fn removed(&self) -> &[EntitySnapshot] {
        &self.removed
    }

    /// Every event sent to the view, oldest first.
    pub fn events(&self) -> &[(String, Value)] {
        &self.events
    }

    /// Events received since the previous call.
    pub fn take_events(&mut self) -> Vec<(String, Value)> {
        std::mem::take(&mut self.pending)
    }

    /// Total `update_entity` calls.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Controller for RecordingController {
    fn add_entity(&mut self, entity: &EntitySnapshot) {
        debug!("add {} '{}'", entity.id, entity.name);
        self.added.push(entity.clone());
        self.latest.insert(entity.id, entity.clone());
    }

    fn update_entity(&mut self, entity: &EntitySnapshot) {
        trace!("update {} -> {:?}", entity.id, entity.position);
        self.update_count += 1;
        self.latest.insert(entity.id, entity.clone());
    }

    fn remove_entity(&mut self, entity: &EntitySnapshot) {
        debug!("remove {} '{}'", entity.id, entity.name);
        self.latest.remove(&entity.id);
        self.removed.push(entity.clone());
    }

    fn send_event_to_view(&mut self, event: &str, details: &Value) {
        debug!("event {}", event);
        self.events.push((event.to_string(), details.clone()));
        self.pending.push((event.to_string(), details.clone()));
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(id: u64, x: f64) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId(id),
            kind: "robot".to_string(),
            name: format!("R{}", id),
            position: [x, 0.0, 0.0],
            direction: [1.0, 0.0, 0.0],
            color: None,
        }
    }

    #[test]
    fn test_latest_tracks_updates_and_removals() {
        let mut recorder = RecordingController::new();
        recorder.add_entity(&snapshot(0, 0.0));
        recorder.add_entity(&snapshot(1, 0.0));
        recorder.update_entity(&snapshot(0, 5.0));
        recorder.remove_entity(&snapshot(1, 0.0));

        assert_eq!(recorder.snapshot(EntityId(0)).map(|s| s.position[0]), Some(5.0));
        assert!(recorder.snapshot(EntityId(1)).is_none());
        assert_eq!(recorder.latest().count(), 1);
        assert_eq!(recorder.update_count(), 1);
        assert_eq!(recorder.removed().len(), 1);
    }

    #[test]
    fn test_take_events_drains_pending_only() {
        let mut recorder = RecordingController::new();
        recorder.send_event_to_view("DeliveryScheduled", &json!({ "name": "R1" }));

        assert_eq!(recorder.take_events().len(), 1);
        assert!(recorder.take_events().is_empty());
        assert_eq!(recorder.events().len(), 1);
    }
}
