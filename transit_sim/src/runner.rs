//! Scenario runner - builds a scene, schedules its trips and ticks it out.

use crate::error::SimError;
use crate::exporter::{SimEvent, SimExport, SimFrame};
use crate::model::{SimConfig, SimulationModel};
use crate::recorder::RecordingController;
use crate::scenarios::ScenarioId;
use tracing::{debug, info, warn};
use transit_core::{Entity, TransitError};
use transit_env::{StraightLineRouting, TripRequest};

type Model = SimulationModel<RecordingController, StraightLineRouting>;

/// Results from running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: ScenarioId,

    /// Seed used
    pub seed: u64,

    /// Whether every scheduled package reached its robot
    pub passed: bool,

    /// Total ticks executed
    pub total_ticks: u64,

    /// Final simulation time in seconds
    pub final_time_secs: f64,

    /// Number of entities at end
    pub final_entity_count: usize,

    /// Trips the model accepted
    pub scheduled: usize,

    /// Scheduled trips whose robot holds its package
    pub delivered: usize,

    /// Failure message if any
    pub failure_reason: Option<String>,
}

/// Runs built-in scenarios.
pub struct ScenarioRunner {
    /// Configuration seed
    seed: u64,

    /// Tick rate in Hz
    tick_rate_hz: u32,

    /// Maximum duration in seconds
    max_duration_secs: f64,

    /// Ticks between exported frames
    export_interval: u64,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64) -> Self {
        let defaults = SimConfig::default();
        Self {
            seed,
            tick_rate_hz: defaults.tick_rate_hz,
            max_duration_secs: defaults.max_duration_secs,
            export_interval: 10,
        }
    }

    /// Sets the tick rate.
    pub fn with_tick_rate(mut self, hz: u32) -> Self {
        self.tick_rate_hz = hz.max(1);
        self
    }

    /// Sets the maximum duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.max_duration_secs = secs;
        self
    }

    /// Sets how many ticks pass between exported frames.
    pub fn with_export_interval(mut self, ticks: u64) -> Self {
        self.export_interval = ticks.max(1);
        self
    }

    fn config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            tick_rate_hz: self.tick_rate_hz,
            max_duration_secs: self.max_duration_secs,
        }
    }

    /// Runs a scenario and returns the result.
    pub fn run(&self, scenario: ScenarioId) -> Result<ScenarioResult, SimError> {
        self.execute(scenario, None)
    }

    /// Runs a scenario, recording frames for export.
    pub fn run_with_export(
        &self,
        scenario: ScenarioId,
    ) -> Result<(ScenarioResult, SimExport), SimError> {
        let mut export = SimExport::new(scenario.name(), self.seed);
        let result = self.execute(scenario, Some(&mut export))?;
        export.finalize(result.passed, result.delivered, result.scheduled);
        Ok((result, export))
    }

    fn execute(
        &self,
        scenario: ScenarioId,
        mut export: Option<&mut SimExport>,
    ) -> Result<ScenarioResult, SimError> {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);

        let config = self.config();
        let max_ticks = config.max_ticks();
        let mut model =
            SimulationModel::new(config, RecordingController::new(), StraightLineRouting);
        let scene = scenario.scene();

        for record in scene.records {
            if model.create_entity(record)?.is_none() {
                warn!("Scene record skipped: no factory for its type");
            }
        }

        let mut robots = Vec::new();
        for trip in scene.trips {
            let request = TripRequest::from_value(trip).map_err(TransitError::from)?;
            if model.schedule_trip(&request) {
                robots.push(request.name);
            } else {
                warn!("Trip for '{}' could not be scheduled", request.name);
            }
        }

        if let Some(export) = export.as_deref_mut() {
            export.add_frame(frame(&mut model));
        }

        let mut delivered = count_delivered(&model, &robots);
        while delivered < robots.len() && model.tick_count() < max_ticks {
            model.tick()?;
            delivered = count_delivered(&model, &robots);

            if model.tick_count() % self.export_interval == 0 {
                if let Some(export) = export.as_deref_mut() {
                    export.add_frame(frame(&mut model));
                }
            }
            if model.tick_count() % self.tick_rate_hz as u64 == 0 {
                debug!(
                    "  t={:.1}s | delivered={}/{} | queued={}",
                    model.time(),
                    delivered,
                    robots.len(),
                    model.deliveries().len()
                );
            }
        }

        if let Some(export) = export.as_deref_mut() {
            export.add_frame(frame(&mut model));
        }
        model.stop();

        let passed = delivered == robots.len();
        Ok(ScenarioResult {
            scenario,
            seed: self.seed,
            passed,
            total_ticks: model.tick_count(),
            final_time_secs: model.time(),
            final_entity_count: model.entity_count(),
            scheduled: robots.len(),
            delivered,
            failure_reason: if passed {
                None
            } else {
                Some(format!(
                    "{} of {} deliveries incomplete after {:.1}s",
                    robots.len() - delivered,
                    robots.len(),
                    model.time()
                ))
            },
        })
    }
}

/// Robots in `robots` that hold a package.
fn count_delivered(model: &Model, robots: &[String]) -> usize {
    robots
        .iter()
        .filter(|name| {
            model
                .find_by_name(name)
                .and_then(Entity::as_robot)
                .is_some_and(|r| r.package().is_some())
        })
        .count()
}

fn frame(model: &mut Model) -> SimFrame {
    let events = model
        .controller_mut()
        .take_events()
        .into_iter()
        .map(|(name, details)| SimEvent { name, details })
        .collect();

    SimFrame {
        time_sec: model.time(),
        tick: model.tick_count(),
        entities: model.entities().map(Entity::snapshot).collect(),
        events,
    }
}
