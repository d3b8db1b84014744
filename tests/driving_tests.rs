//! AI, input and session validation
//!
//! This test validates that opponents, controls and the frame loop work
//! together correctly

use std::f32::consts::{FRAC_PI_2, PI};

use drift_sim::simulation::{
    normalize_angle, steer, AiConfig, AiController, AiMode, CarModel, ControlInput, Driver,
    KeyState, LoggingEngineHook, Position, RoadSegment, SimConfig, SimWorld, Vehicle, Viewport,
    WorldConfig, WorldMap, MAX_SPEED,
};

fn lane_map() -> WorldMap {
    let mut map = WorldMap::new(20000.0);
    map.roads
        .push(RoadSegment::new(0.0, -10000.0, 0.0, 10000.0, 200.0));
    map
}

fn ai_car(x: f32, y: f32) -> Vehicle {
    Vehicle::ai(CarModel::Porsche, Position::ground(x, y), -FRAC_PI_2)
}

/// Small seeded world so session tests stay fast
fn small_config(seed: u64) -> SimConfig {
    SimConfig {
        world: WorldConfig {
            seed: Some(seed),
            tree_count: 500,
            water_count: 10,
            building_count: 20,
            ..WorldConfig::default()
        },
        ..SimConfig::default()
    }
}

#[test]
fn test_steer_dead_band() {
    let band = 0.05;
    assert_eq!(steer(0.0, band), 0.0);
    assert_eq!(steer(0.04, band), 0.0);
    assert_eq!(steer(-0.04, band), 0.0);
    assert_eq!(steer(0.05, band), 1.0);
    assert_eq!(steer(-0.3, band), -1.0);
    // Errors wrap around the circle
    assert_eq!(steer(2.0 * PI - 0.3, band), -1.0);

    let mut error = -10.0;
    while error < 10.0 {
        let turn = steer(error, band);
        assert_eq!(turn != 0.0, normalize_angle(error).abs() >= band, "error {}", error);
        error += 0.013;
    }
}

#[test]
fn test_ai_without_roads_drives_straight() {
    let ai = AiController::new(AiConfig::default(), MAX_SPEED);
    let map = WorldMap::new(20000.0);
    let car = ai_car(0.0, 0.0);

    let decision = ai.compute_control(&car, &map, std::iter::empty());

    assert_eq!(decision.control, ControlInput::new(1.0, 0.0, false));
    assert!(!decision.avoiding);
}

#[test]
fn test_ai_holds_lane() {
    let map = lane_map();
    for mode in [AiMode::Simple, AiMode::Elaborated] {
        let ai = AiController::new(
            AiConfig {
                mode,
                ..AiConfig::default()
            },
            MAX_SPEED,
        );
        let car = ai_car(60.0, 0.0);
        let decision = ai.compute_control(&car, &map, std::iter::empty());

        assert_eq!(decision.control.turn, 0.0);
        assert_eq!(decision.control.gas, 1.0);
        assert!((decision.target_heading + FRAC_PI_2).abs() < 1e-5);
    }
}

#[test]
fn test_ai_steers_back_toward_lane() {
    let map = lane_map();
    for mode in [AiMode::Simple, AiMode::Elaborated] {
        let ai = AiController::new(
            AiConfig {
                mode,
                ..AiConfig::default()
            },
            MAX_SPEED,
        );

        // Left of the lane while heading -Y: the lane is to the right
        let left = ai.compute_control(&ai_car(-80.0, 0.0), &map, std::iter::empty());
        assert_eq!(left.control.turn, 1.0, "{:?}", mode);

        let right = ai.compute_control(&ai_car(180.0, 0.0), &map, std::iter::empty());
        assert_eq!(right.control.turn, -1.0, "{:?}", mode);
    }
}

#[test]
fn test_ai_eases_off_above_target_speed() {
    let map = lane_map();
    let ai = AiController::new(AiConfig::default(), MAX_SPEED);

    let mut car = ai_car(60.0, 0.0);
    car.speed = ai.target_speed() + 1.0;
    let decision = ai.compute_control(&car, &map, std::iter::empty());
    assert_eq!(decision.control.gas, 0.0);

    car.speed = ai.target_speed() - 1.0;
    let decision = ai.compute_control(&car, &map, std::iter::empty());
    assert_eq!(decision.control.gas, 1.0);
}

#[test]
fn test_ai_brakes_for_car_ahead() {
    let map = lane_map();
    let ai = AiController::new(AiConfig::default(), MAX_SPEED);
    let car = ai_car(60.0, 0.0);

    let ahead = ai_car(60.0, -200.0);
    let decision = ai.compute_control(&car, &map, [&ahead]);
    assert!(decision.avoiding);
    assert_eq!(decision.control.gas, -1.0);

    let behind = ai_car(60.0, 200.0);
    let decision = ai.compute_control(&car, &map, [&behind]);
    assert!(!decision.avoiding);

    let far_ahead = ai_car(60.0, -1000.0);
    let decision = ai.compute_control(&car, &map, [&far_ahead]);
    assert!(!decision.avoiding);
}

#[test]
fn test_ai_avoidance_reverses_steering() {
    let map = lane_map();
    let ai = AiController::new(AiConfig::default(), MAX_SPEED);

    // Left of the lane, so it would normally steer right
    let car = ai_car(-80.0, 0.0);
    let clear = ai.compute_control(&car, &map, std::iter::empty());
    assert_eq!(clear.control.turn, 1.0);

    let ahead = ai_car(-80.0, -200.0);
    let blocked = ai.compute_control(&car, &map, [&ahead]);
    assert!(blocked.avoiding);
    assert_eq!(blocked.control.gas, -1.0);
    assert_eq!(blocked.control.turn, -clear.control.turn);
    assert_eq!(blocked.target_heading, clear.target_heading);
}

#[test]
fn test_key_resolution_order() {
    let both = KeyState {
        accelerate: true,
        brake: true,
        steer_left: true,
        steer_right: true,
        boost: true,
        horn: false,
    };
    assert_eq!(ControlInput::from(both), ControlInput::new(-1.0, 1.0, true));

    let left = KeyState {
        accelerate: true,
        steer_left: true,
        ..KeyState::default()
    };
    assert_eq!(ControlInput::from(left), ControlInput::new(1.0, -1.0, false));

    assert_eq!(ControlInput::from(KeyState::default()), ControlInput::coast());
}

#[test]
fn test_config_validation() {
    assert!(SimConfig::default().validate().is_ok());

    let mut bad = SimConfig::default();
    bad.ai.difficulty = 1.5;
    assert!(bad.validate().is_err());

    let mut bad = SimConfig::default();
    bad.camera.near_clip = 0.0;
    assert!(bad.validate().is_err());

    let mut bad = SimConfig::default();
    bad.world.grid_spacing = 100.0;
    let err = bad.validate().expect_err("road wider than grid spacing");
    assert!(err.to_string().contains("grid spacing"));

    assert!(SimWorld::new(bad).is_err());

    // Opponents queue ahead of the player and must stay inside the world
    let mut crowded = SimConfig::default();
    crowded.ai.opponents = 30;
    let err = crowded.validate().expect_err("opponents past the world edge");
    assert!(err.to_string().contains("opponents"));
    crowded.ai.opponents = 28;
    assert!(crowded.validate().is_ok());
}

#[test]
fn test_session_spawns_player_and_opponents() {
    let world = SimWorld::new(small_config(1)).expect("valid config");

    assert_eq!(world.vehicles.len(), 4);
    assert!(world.player().is_player());
    assert_eq!(world.player().position, Position::ground(0.0, 0.0));
    for car in &world.vehicles[1..] {
        assert!(matches!(car.driver, Driver::Ai { .. }));
        assert!(car.position.y < 0.0);
    }
}

#[test]
fn test_opponents_stay_on_grid_roads() {
    let config = SimConfig {
        world: WorldConfig {
            seed: Some(1),
            ..WorldConfig::default()
        },
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config).expect("valid config");
    let mut engine = LoggingEngineHook::default();

    // Long enough to cross several intersections
    for tick in 0..400 {
        world.frame(&KeyState::default(), Viewport::default(), &mut engine);
        for car in &world.vehicles[1..] {
            assert!(
                world.map.is_on_road(car.position.x, car.position.y),
                "opponent left the road at ({:.0}, {:.0}) on tick {}",
                car.position.x,
                car.position.y,
                tick
            );
        }
    }

    // Still in the right-hand lane heading up the map
    for car in &world.vehicles[1..] {
        assert!((car.position.x - world.config.ai.lane_offset).abs() < 20.0);
        assert!(car.position.y < -2000.0);
    }
}

#[test]
fn test_session_frames_advance() {
    let mut world = SimWorld::new(small_config(2)).expect("valid config");
    let mut engine = LoggingEngineHook::default();
    let keys = KeyState {
        accelerate: true,
        ..KeyState::default()
    };

    for _ in 0..120 {
        let list = world.frame(&keys, Viewport::default(), &mut engine);
        assert!(!list.is_empty());
    }

    assert_eq!(world.ticks, 120);
    assert_eq!(world.stats.ticks, 120);
    assert_eq!(engine.notifications, 120);
    assert_eq!(engine.horns, 0);
    assert!(world.player().position.y < 0.0);
    assert!(world.stats.distance > 0.0);
    assert!(world.stats.top_speed <= MAX_SPEED);

    // The top-down camera keeps the player centered
    let viewport = Viewport::default();
    assert!((world.camera.x + viewport.width / 2.0 - world.player().position.x).abs() < 1e-3);
}

#[test]
fn test_session_horn_and_smoke() {
    let mut world = SimWorld::new(small_config(3)).expect("valid config");
    let mut engine = LoggingEngineHook::default();

    let honk = KeyState {
        horn: true,
        ..KeyState::default()
    };
    world.tick(&honk, &mut engine);
    assert_eq!(engine.horns, 1);

    // Fast hard turn leaves smoke that fades away over later frames
    world.vehicles[0].speed = MAX_SPEED;
    let turn = KeyState {
        accelerate: true,
        steer_right: true,
        ..KeyState::default()
    };
    world.tick(&turn, &mut engine);
    assert!(!world.particles.is_empty());

    for _ in 0..30 {
        world.frame(&KeyState::default(), Viewport::default(), &mut engine);
    }
    assert!(world.particles.is_empty());
}

#[test]
fn test_ascii_map_marks_player() {
    let world = SimWorld::new(small_config(4)).expect("valid config");
    let lines = world.map_lines(21, 11, 200.0);

    assert_eq!(lines.len(), 11);
    assert!(lines.iter().all(|l| l.chars().count() == 21));
    assert_eq!(lines[5].chars().nth(10), Some('P'));
    assert!(lines.iter().any(|l| l.contains('#')));
}
