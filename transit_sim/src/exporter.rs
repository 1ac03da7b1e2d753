//! JSON exporter for offline inspection of a run.
//!
//! Exports periodic frames of every entity's pose plus the view events
//! raised since the previous frame.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use transit_env::EntitySnapshot;

/// A single frame of simulation data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimFrame {
    /// Simulation time in seconds
    pub time_sec: f64,

    pub tick: u64,

    /// Every live entity
    pub entities: Vec<EntitySnapshot>,

    /// Events raised since the previous frame
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<SimEvent>,
}

/// An event sent to the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimEvent {
    pub name: String,
    pub details: Value,
}

/// Complete simulation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    pub scenario: String,
    pub seed: u64,

    /// Duration in seconds
    pub duration_sec: f64,

    pub frames: Vec<SimFrame>,

    pub passed: bool,

    /// Deliveries completed out of those scheduled
    pub delivered: usize,
    pub scheduled: usize,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, seed: u64) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            duration_sec: 0.0,
            frames: Vec::new(),
            passed: false,
            delivered: 0,
            scheduled: 0,
        }
    }

    pub fn add_frame(&mut self, frame: SimFrame) {
        self.duration_sec = frame.time_sec;
        self.frames.push(frame);
    }

    pub fn finalize(&mut self, passed: bool, delivered: usize, scheduled: usize) {
        self.passed = passed;
        self.delivered = delivered;
        self.scheduled = scheduled;
    }

    /// Writes the export as pretty-printed JSON.
    pub fn write_to_file(&self, path: &str) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
