//! Vehicle motion model validation
//!
//! These tests drive single cars through `VehicleSimulator::step` on small
//! hand-built maps.

use std::f32::consts::FRAC_PI_2;

use drift_sim::simulation::{
    CarModel, Collision, ControlInput, Position, RoadSegment, Scenery, SceneryKind, Vehicle,
    VehicleSimulator, WorldMap, MAX_SPEED, NITRO_MAX,
};

const EPS: f32 = 1e-4;

/// A 20000-unit world with one vertical road through the origin
fn road_map() -> WorldMap {
    let mut map = WorldMap::new(20000.0);
    map.roads
        .push(RoadSegment::new(0.0, -10000.0, 0.0, 10000.0, 200.0));
    map
}

fn car_at(x: f32, y: f32, angle: f32) -> Vehicle {
    Vehicle::player(CarModel::Ferrari, Position::ground(x, y), angle)
}

fn step(sim: &VehicleSimulator, car: &mut Vehicle, control: ControlInput, map: &WorldMap) {
    let mut particles = Vec::new();
    sim.step(car, control, map, &mut particles);
}

#[test]
fn test_first_throttle_tick_on_road() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(0.0, 0.0, -FRAC_PI_2);

    step(&sim, &mut car, ControlInput::new(1.0, 0.0, false), &map);

    assert!((car.speed - 0.384).abs() < EPS, "speed was {}", car.speed);
    assert!(car.position.x.abs() < EPS);
    assert!((car.position.y + 0.384).abs() < EPS);
}

#[test]
fn test_offroad_friction_applies() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(5000.0, 5000.0, 0.0);

    step(&sim, &mut car, ControlInput::new(1.0, 0.0, false), &map);

    assert!((car.speed - 0.4 * 0.96 * 0.9).abs() < EPS);
}

#[test]
fn test_speed_stays_within_bounds() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut forward = car_at(0.0, 9000.0, -FRAC_PI_2);
    let mut backward = car_at(0.0, -9000.0, -FRAC_PI_2);

    for tick in 0..600 {
        let boost = tick % 3 == 0;
        step(&sim, &mut forward, ControlInput::new(1.0, 0.0, boost), &map);
        step(&sim, &mut backward, ControlInput::new(-1.0, 0.0, false), &map);

        assert!(forward.speed <= MAX_SPEED + EPS);
        assert!(backward.speed >= -MAX_SPEED / 2.0 - EPS);
    }
    assert!(forward.speed > 0.0);
    assert!(backward.speed < 0.0);
}

#[test]
fn test_coasting_decays_monotonically() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(0.0, 0.0, -FRAC_PI_2);
    car.speed = 10.0;

    let mut last = car.speed;
    for _ in 0..100 {
        step(&sim, &mut car, ControlInput::coast(), &map);
        assert!(car.speed < last);
        assert!(car.speed > 0.0);
        last = car.speed;
    }
}

#[test]
fn test_no_turning_below_speed_gate() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(0.0, 0.0, -FRAC_PI_2);

    // 0.4 after one tick of throttle is still under the 0.5 gate
    step(&sim, &mut car, ControlInput::new(1.0, 1.0, false), &map);

    assert_eq!(car.angle, -FRAC_PI_2);
}

#[test]
fn test_turn_rate_and_drift() {
    let sim = VehicleSimulator::default();
    let map = road_map();

    let mut gripping = car_at(0.0, 0.0, 0.0);
    gripping.speed = 20.0;
    step(&sim, &mut gripping, ControlInput::new(1.0, 1.0, false), &map);
    assert!((gripping.angle - 0.05).abs() < EPS);

    let mut drifting = car_at(0.0, 0.0, 0.0);
    drifting.speed = 20.0;
    step(&sim, &mut drifting, ControlInput::new(0.0, 1.0, false), &map);
    assert!((drifting.angle - 0.075).abs() < EPS);

    // Coasting below the drift speed turns at the normal rate
    let mut slow = car_at(0.0, 0.0, 0.0);
    slow.speed = 5.0;
    step(&sim, &mut slow, ControlInput::new(0.0, 1.0, false), &map);
    assert!((slow.angle - 0.05).abs() < EPS);
}

#[test]
fn test_reverse_inverts_steering() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(0.0, 0.0, 0.0);
    car.speed = -5.0;

    step(&sim, &mut car, ControlInput::new(0.0, 1.0, false), &map);

    assert!((car.angle + 0.05).abs() < EPS);
}

#[test]
fn test_nitro_drain_and_regen() {
    let sim = VehicleSimulator::default();
    let map = road_map();

    let mut boosted = car_at(0.0, 0.0, -FRAC_PI_2);
    let mut particles = Vec::new();
    let report = sim.step(
        &mut boosted,
        ControlInput::new(1.0, 0.0, true),
        &map,
        &mut particles,
    );
    assert!(report.boosting);
    assert!((boosted.nitro - (NITRO_MAX - 1.0)).abs() < EPS);
    assert!((boosted.speed - 0.8 * 0.96).abs() < EPS);

    // Boost without throttle does nothing and the gauge refills
    let mut idle = car_at(0.0, 0.0, -FRAC_PI_2);
    idle.nitro = 50.0;
    let report = sim.step(
        &mut idle,
        ControlInput::new(0.0, 0.0, true),
        &map,
        &mut particles,
    );
    assert!(!report.boosting);
    assert!((idle.nitro - 50.2).abs() < EPS);

    // Regeneration caps at the maximum
    let mut full = car_at(0.0, 0.0, -FRAC_PI_2);
    step(&sim, &mut full, ControlInput::coast(), &map);
    assert_eq!(full.nitro, NITRO_MAX);

    // An empty gauge cannot boost
    let mut empty = car_at(0.0, 0.0, -FRAC_PI_2);
    empty.nitro = 0.0;
    let report = sim.step(
        &mut empty,
        ControlInput::new(1.0, 0.0, true),
        &map,
        &mut particles,
    );
    assert!(!report.boosting);
}

#[test]
fn test_boundary_bounce() {
    let sim = VehicleSimulator::default();
    let map = WorldMap::new(1000.0);
    let mut car = car_at(495.0, 0.0, 0.0);
    car.speed = 20.0;

    let mut particles = Vec::new();
    let report = sim.step(&mut car, ControlInput::coast(), &map, &mut particles);

    let before_bounce = 20.0 * 0.96 * 0.9;
    assert_eq!(report.collision, Some(Collision::Boundary));
    assert!((car.speed + 0.5 * before_bounce).abs() < EPS);
    assert!(car.position.x < 500.0);
    assert!((car.position.x - (495.0 - before_bounce)).abs() < 1e-3);
}

#[test]
fn test_obstacle_bounce() {
    let sim = VehicleSimulator::default();
    let mut map = road_map();
    map.scenery.push(Scenery {
        position: Position::ground(90.0, 0.0),
        scale: 1.0,
        rotation: 0.0,
        kind: SceneryKind::Building,
    });
    let mut car = car_at(0.0, 0.0, 0.0);
    car.speed = 20.0;

    let mut particles = Vec::new();
    let report = sim.step(&mut car, ControlInput::coast(), &map, &mut particles);

    let before_bounce = 20.0 * 0.96;
    assert_eq!(report.collision, Some(Collision::Obstacle));
    assert!((car.speed + 0.3 * before_bounce).abs() < EPS);
    assert!(car.position.x.abs() < 1e-3);
}

#[test]
fn test_trees_are_not_obstacles() {
    let sim = VehicleSimulator::default();
    let mut map = road_map();
    map.scenery.push(Scenery {
        position: Position::ground(20.0, 0.0),
        scale: 1.0,
        rotation: 0.0,
        kind: SceneryKind::Tree,
    });
    let mut car = car_at(0.0, 0.0, 0.0);
    car.speed = 20.0;

    let mut particles = Vec::new();
    let report = sim.step(&mut car, ControlInput::coast(), &map, &mut particles);

    assert_eq!(report.collision, None);
    assert!(car.speed > 0.0);
}

#[test]
fn test_drift_smoke_emitted_behind_car() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(0.0, 0.0, -FRAC_PI_2);
    car.speed = 20.0;

    let mut particles = Vec::new();
    sim.step(&mut car, ControlInput::new(1.0, 1.0, false), &map, &mut particles);
    assert_eq!(particles.len(), 1);
    assert_eq!(particles[0].life, 1.0);
    // Heading is close to -Y, so the rear is further down the +Y axis
    assert!(particles[0].position.y > car.position.y);

    // Straight driving leaves no smoke
    sim.step(&mut car, ControlInput::new(1.0, 0.0, false), &map, &mut particles);
    assert_eq!(particles.len(), 1);
}

#[test]
fn test_engine_state_reports_speed() {
    let sim = VehicleSimulator::default();
    let map = road_map();
    let mut car = car_at(0.0, 0.0, -FRAC_PI_2);
    car.speed = 10.0;

    let mut particles = Vec::new();
    let report = sim.step(&mut car, ControlInput::new(0.0, -1.0, false), &map, &mut particles);

    assert_eq!(report.engine.speed, car.speed);
    assert!(report.engine.turning);
    assert!(report.on_road);
    assert!(report.engine.frequency() > 60.0);
    assert!(report.engine.volume() <= 0.15 + EPS);
}
