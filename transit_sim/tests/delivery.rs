//! End-to-end delivery behavior through the public model API.

use nalgebra::Vector3;
use serde_json::{json, Value};
use transit_core::{
    Entity, PathStrategy, PowerPhase, Strategy, TransitError, CHARGER_STATIONS, FULL_CHARGE,
    SNAP_DISTANCE,
};
use transit_env::{EntityId, StraightLineRouting, TripRequest};
use transit_sim::scenarios::ScenarioId;
use transit_sim::{RecordingController, ScenarioRunner, SimConfig, SimulationModel};

type Model = SimulationModel<RecordingController, StraightLineRouting>;

fn model() -> Model {
    SimulationModel::new(SimConfig::default(), RecordingController::new(), StraightLineRouting)
}

fn record(kind: &str, name: &str, position: [f64; 3], speed: f64) -> Value {
    json!({
        "type": kind,
        "name": name,
        "position": position,
        "direction": [1.0, 0.0, 0.0],
        "speed": speed
    })
}

fn spawn(model: &mut Model, value: Value) -> EntityId {
    model.create_entity(value).unwrap().unwrap()
}

fn package(model: &mut Model, name: &str, position: [f64; 3], weight: Value) -> EntityId {
    let mut value = record("package", name, position, 0.0);
    value["weight"] = weight;
    spawn(model, value)
}

fn trip(name: &str, search: &str) -> TripRequest {
    TripRequest::from_value(json!({ "name": name, "search": search })).unwrap()
}

fn held_by(model: &Model, robot: EntityId) -> Option<EntityId> {
    model.entity(robot).and_then(Entity::as_robot).and_then(|r| r.package())
}

#[test]
fn test_two_point_path_example() {
    let mut strategy = PathStrategy::new(vec![vec![0.0, 0.0, 0.0], vec![10.0, 0.0, 0.0]]);
    let mut body = transit_core::Body::new(Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0), 5.0);

    strategy.step(&mut body, 1.0).unwrap();
    assert!((body.position - Vector3::new(5.0, 0.0, 0.0)).norm() < 1e-9);
    assert!(!strategy.is_completed());

    strategy.step(&mut body, 1.0).unwrap();
    assert!(body.distance_to(&Vector3::new(10.0, 0.0, 0.0)) < SNAP_DISTANCE);
    assert!(strategy.is_completed());
}

#[test]
fn test_total_distance_example() {
    let strategy = PathStrategy::new(vec![vec![0.0, 0.0, 0.0], vec![3.0, 4.0, 0.0]]);
    assert_eq!(strategy.total_distance(), Ok(5.0));
}

#[test]
fn test_battery_latch_example() {
    let mut model = model();
    let drone = spawn(&mut model, record("drone", "Drone", [0.0, 0.0, 0.0], 10.0));
    spawn(&mut model, record("robot", "R1", [3000.0, 0.0, 0.0], 0.0));
    let parcel = package(&mut model, "R1_package", [1500.0, 0.0, 0.0], json!(10));
    assert!(model.schedule_trip(&trip("R1", "")));

    model.update(1.0).unwrap();

    let carrier = model.entity(drone).and_then(Entity::as_drone).unwrap();
    assert!(carrier.must_charge());
    assert_eq!(carrier.phase(), PowerPhase::Outbound);
    assert_eq!(model.deliveries().light().front(), Some(&parcel));

    let nearest = CHARGER_STATIONS
        .iter()
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .min_by(|a, b| a.norm().total_cmp(&b.norm()))
        .unwrap();
    assert_eq!(carrier.find_charger(&Vector3::zeros()), nearest);

    // The first tick of the outbound leg heads for that charger.
    let position = model.entity(drone).unwrap().position();
    let heading = (nearest - Vector3::zeros()).normalize();
    assert!((position.normalize() - heading).norm() < 1e-9);
}

#[test]
fn test_battery_refills_exactly_and_latch_clears_after_return() {
    let mut model = model();
    let drone = spawn(&mut model, record("drone", "Drone", [0.0, 0.0, 0.0], 10.0));
    let robot = spawn(&mut model, record("robot", "R1", [3000.0, 0.0, 0.0], 0.0));
    package(&mut model, "R1_package", [1500.0, 0.0, 0.0], json!(10));
    assert!(model.schedule_trip(&trip("R1", "")));

    let phase = |model: &Model| model.entity(drone).and_then(Entity::as_drone).unwrap().phase();
    let mut phases = Vec::new();

    for _ in 0..3000 {
        let before = phase(&model);
        model.update(1.0).unwrap();
        let after = phase(&model);

        if before == PowerPhase::Outbound && after == PowerPhase::Returning {
            let level = model.entity(drone).and_then(Entity::as_drone).unwrap().level();
            assert_eq!(level, FULL_CHARGE);
        }
        if phases.last() != Some(&after) {
            phases.push(after);
        }
        if held_by(&model, robot).is_some() {
            break;
        }
    }

    assert_eq!(
        phases,
        vec![PowerPhase::Outbound, PowerPhase::Returning, PowerPhase::Working]
    );
    assert!(held_by(&model, robot).is_some());
}

#[test]
fn test_dragon_batches_two_then_one() {
    let mut model = model();
    let dragon = spawn(&mut model, record("dragon", "Dragon", [0.0, 0.0, 0.0], 25.0));
    let mut robots = Vec::new();
    for (i, x) in [100.0, -100.0, 200.0].into_iter().enumerate() {
        let name = format!("R{}", i);
        robots.push(spawn(&mut model, record("robot", &name, [x, 0.0, 150.0], 0.0)));
        package(&mut model, &format!("{}_package", name), [x, 0.0, 0.0], json!(80));
        assert!(model.schedule_trip(&trip(&name, "")));
    }
    assert_eq!(model.deliveries().heavy().len(), 3);

    model.update(1.0).unwrap();
    let load = |model: &Model| model.entity(dragon).and_then(Entity::as_dragon).unwrap().load();
    assert_eq!(load(&model), 2);
    assert_eq!(model.deliveries().heavy().len(), 1);

    while load(&model) > 0 {
        model.update(1.0).unwrap();
        assert_eq!(model.deliveries().heavy().len(), 1);
    }
    assert!(held_by(&model, robots[0]).is_some());
    assert!(held_by(&model, robots[1]).is_some());
    assert!(held_by(&model, robots[2]).is_none());

    model.update(1.0).unwrap();
    assert_eq!(load(&model), 1);
    assert!(model.deliveries().heavy().is_empty());

    for _ in 0..200 {
        model.update(1.0).unwrap();
    }
    assert!(held_by(&model, robots[2]).is_some());
}

#[test]
fn test_schedule_trip_example() {
    let mut model = model();
    let robot = spawn(&mut model, record("robot", "R1", [12.0, 0.0, -7.0], 0.0));
    let parcel = package(&mut model, "R1_package", [0.0, 0.0, 0.0], json!("42.5"));

    assert!(model.schedule_trip(&trip("R1", "dfs")));

    let payload = model.entity(parcel).and_then(Entity::as_package).unwrap();
    let receiver = model.entity(robot).and_then(Entity::as_robot).unwrap();
    assert!(!payload.requires_delivery());
    assert!(!receiver.requested_delivery());
    assert_eq!(payload.destination(), Vector3::new(12.0, 0.0, -7.0));
    assert_eq!(payload.owner(), Some(robot));
    assert_eq!(payload.strategy_name(), "dfs");

    let light = model.deliveries().light().iter().filter(|id| **id == parcel).count();
    let heavy = model.deliveries().heavy().iter().filter(|id| **id == parcel).count();
    assert_eq!(light + heavy, 1);
    assert_eq!(light, 1);

    let events = model.controller().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "DeliveryScheduled");
    assert_eq!(events[0].1["name"], json!("R1"));
}

#[test]
fn test_removed_package_mid_flight_is_tolerated() {
    let mut model = model();
    let drone = spawn(&mut model, record("drone", "Drone", [0.0, 0.0, 0.0], 10.0));
    let robot = spawn(&mut model, record("robot", "R1", [200.0, 0.0, 0.0], 0.0));
    let parcel = package(&mut model, "R1_package", [100.0, 0.0, 0.0], json!(5));
    assert!(model.schedule_trip(&trip("R1", "astar")));

    model.update(1.0).unwrap();
    model.remove_entity(parcel);
    for _ in 0..100 {
        model.update(1.0).unwrap();
    }

    assert!(model.entity(parcel).is_none());
    assert!(held_by(&model, robot).is_none());
    let carrier = model.entity(drone).and_then(Entity::as_drone).unwrap();
    assert!(carrier.drone().is_available());
}

#[test]
fn test_malformed_route_aborts_update() {
    struct BrokenRouting;

    impl transit_env::Routing for BrokenRouting {
        fn get_path(
            &self,
            start: [f64; 3],
            _end: [f64; 3],
            _algorithm: transit_env::SearchAlgorithm,
        ) -> Vec<Vec<f64>> {
            vec![start.to_vec(), vec![1.0, 2.0]]
        }
    }

    let mut model =
        SimulationModel::new(SimConfig::default(), RecordingController::new(), BrokenRouting);
    spawn_into(&mut model, record("drone", "Drone", [0.0, 0.0, 0.0], 10.0));
    spawn_into(&mut model, record("robot", "R1", [50.0, 0.0, 0.0], 0.0));
    let mut value = record("package", "R1_package", [20.0, 0.0, 0.0], 0.0);
    value["weight"] = json!(1);
    spawn_into(&mut model, value);
    assert!(model.schedule_trip(&trip("R1", "bfs")));

    let err = model.update(1.0).unwrap_err();
    assert_eq!(err, TransitError::MalformedWaypoint { index: 1, len: 2 });
}

fn spawn_into<R: transit_env::Routing>(
    model: &mut SimulationModel<RecordingController, R>,
    value: Value,
) -> EntityId {
    model.create_entity(value).unwrap().unwrap()
}

#[test]
fn test_every_scenario_passes() {
    for scenario in ScenarioId::all() {
        let result = ScenarioRunner::new(42).run(scenario).unwrap();
        assert!(
            result.passed,
            "{} failed: {:?}",
            scenario,
            result.failure_reason
        );
        assert_eq!(result.delivered, result.scheduled);
    }
}

#[test]
fn test_runs_are_deterministic() {
    let run = || {
        let (_, export) = ScenarioRunner::new(9)
            .with_duration(5.0)
            .run_with_export(ScenarioId::City)
            .unwrap();
        serde_json::to_string(&export).unwrap()
    };
    assert_eq!(run(), run());
}
