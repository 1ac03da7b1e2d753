//! Queues of scheduled deliveries, bucketed by weight.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use transit_env::EntityId;

/// Packages heavier than this go to the heavy queue.
pub const WEIGHT_THRESHOLD: f64 = 50.0;

/// Which queue a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueKind {
    /// Weight ≤ 50, served by single-slot drones
    Light,
    /// Weight > 50, served by multi-slot dragons
    Heavy,
}

impl QueueKind {
    pub fn for_weight(weight: f64) -> Self {
        if weight <= WEIGHT_THRESHOLD {
            QueueKind::Light
        } else {
            QueueKind::Heavy
        }
    }
}

/// FIFO queues of scheduled package ids.
#[derive(Debug, Clone, Default)]
pub struct DeliveryQueues {
    light: VecDeque<EntityId>,
    heavy: VecDeque<EntityId>,
}

impl DeliveryQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `package` to the queue matching `weight`.
    pub fn enqueue(&mut self, package: EntityId, weight: f64) -> QueueKind {
        let kind = QueueKind::for_weight(weight);
        match kind {
            QueueKind::Light => self.light.push_back(package),
            QueueKind::Heavy => self.heavy.push_back(package),
        }
        kind
    }

    pub fn light(&self) -> &VecDeque<EntityId> {
        &self.light
    }

    pub fn heavy(&self) -> &VecDeque<EntityId> {
        &self.heavy
    }

    /// Removes `package` from the light queue, wherever it sits.
    pub fn remove_light(&mut self, package: EntityId) -> bool {
        match self.light.iter().position(|id| *id == package) {
            Some(index) => {
                self.light.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn pop_heavy(&mut self) -> Option<EntityId> {
        self.heavy.pop_front()
    }

    /// Drops `package` from both queues. Returns true if it was queued.
    pub fn purge(&mut self, package: EntityId) -> bool {
        let light = self.remove_light(package);
        let before = self.heavy.len();
        self.heavy.retain(|id| *id != package);
        light || self.heavy.len() != before
    }

    pub fn contains(&self, package: EntityId) -> bool {
        self.light.contains(&package) || self.heavy.contains(&package)
    }

    pub fn len(&self) -> usize {
        self.light.len() + self.heavy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.heavy.is_empty()
    }
}
