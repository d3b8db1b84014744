//! Startup configuration for a driving session
//!
//! Every tunable is a `pub const` here; the `Default` impls assemble them into
//! the config structs. A `SimConfig` is fixed once a session is built.

use anyhow::{ensure, Result};
use clap::ValueEnum;
use std::f32::consts::FRAC_PI_2;

use super::vehicle::CarModel;

/// Top forward speed in world units per tick
pub const MAX_SPEED: f32 = 25.0;
pub const ACCELERATION: f32 = 0.4;
/// Heading change per tick at full turn input, in radians
pub const TURNING_SPEED: f32 = 0.05;
pub const FRICTION: f32 = 0.96;
/// Extra multiplier applied on top of `FRICTION` while off-road
pub const OFFROAD_FRICTION: f32 = 0.9;

/// Below this speed magnitude turn input is ignored
pub const MIN_TURN_SPEED: f32 = 0.5;
/// Coasting above this speed magnitude turns faster
pub const DRIFT_SPEED: f32 = 10.0;
pub const DRIFT_TURN_FACTOR: f32 = 1.5;

pub const NITRO_MAX: f32 = 100.0;
pub const NITRO_DRAIN: f32 = 1.0;
pub const NITRO_REGEN: f32 = 0.2;
pub const NITRO_GAS_MULTIPLIER: f32 = 2.0;

/// Speed multiplier when crossing the world edge
pub const BOUNDARY_BOUNCE: f32 = -0.5;
/// How many velocity steps the vehicle is pushed back after a boundary hit
pub const BOUNDARY_RETRACT: f32 = 2.0;
/// Speed multiplier when touching a building
pub const OBSTACLE_BOUNCE: f32 = -0.3;
pub const OBSTACLE_RETRACT: f32 = 1.0;
pub const OBSTACLE_RADIUS: f32 = 80.0;

/// Minimum speed magnitude for drift smoke while turning
pub const SMOKE_SPEED: f32 = 12.0;
pub const SMOKE_SIZE: f32 = 14.0;
/// Life lost by a smoke particle every frame
pub const SMOKE_DECAY: f32 = 0.04;

pub const CAR_WIDTH: f32 = 70.0;
pub const CAR_LENGTH: f32 = 120.0;

pub const WORLD_SIZE: f32 = 20000.0;
pub const GRID_SPACING: f32 = 2000.0;
pub const ROAD_WIDTH: f32 = 200.0;
pub const CORRIDOR_WIDTH: f32 = 400.0;
pub const CONNECTOR_COUNT: usize = 12;
pub const CONNECTOR_MIN_LENGTH: f32 = 1500.0;
pub const CONNECTOR_MAX_LENGTH: f32 = 5000.0;

pub const WATER_COUNT: usize = 40;
pub const WATER_MIN_WIDTH: f32 = 150.0;
pub const WATER_WIDTH_RANGE: f32 = 300.0;
pub const WATER_MIN_POINTS: f32 = 50.0;
pub const WATER_POINT_RANGE: f32 = 80.0;
pub const WATER_STEP: f32 = 300.0;
pub const WATER_AMPLITUDE: f32 = 800.0;
pub const WATER_FREQUENCY: f32 = 0.1;
pub const WATER_JITTER: f32 = 300.0;
pub const WATER_PADDING: f32 = 100.0;
/// Extra width of the bank stroke drawn beneath a water ribbon
pub const WATER_BANK: f32 = 60.0;

pub const TREE_COUNT: usize = 5000;
pub const TREE_MARGIN: f32 = 50.0;
pub const TREE_MIN_SCALE: f32 = 1.0;
pub const TREE_SCALE_RANGE: f32 = 0.8;

pub const BUILDING_COUNT: usize = 80;
pub const BUILDING_PADDING: f32 = 150.0;
pub const BUILDING_MIN_SCALE: f32 = 1.0;
pub const BUILDING_SCALE_RANGE: f32 = 1.0;

pub const FOV: f32 = 600.0;
pub const CAMERA_HEIGHT: f32 = 150.0;
pub const CAMERA_DISTANCE: f32 = 300.0;
/// Fraction of the remaining gap the chase camera closes each frame
pub const CAMERA_FOLLOW: f32 = 0.1;
/// Pinned yaw of the chase camera: looking down the -Y axis
pub const CAMERA_ANGLE: f32 = -FRAC_PI_2;
pub const NEAR_CLIP: f32 = 1.0;
pub const VIEW_AHEAD: f32 = 6000.0;
pub const VIEW_BEHIND: f32 = 400.0;
pub const CULL_PADDING: f32 = 500.0;
pub const ROAD_SEGMENT_LENGTH: f32 = 200.0;

pub const OPPONENT_COUNT: usize = 3;
pub const DIFFICULTY: f32 = 0.8;
pub const AI_SPEED_FRACTION: f32 = 0.8;
pub const LANE_OFFSET: f32 = 60.0;
/// Lateral error tolerated by the simple lane follower
pub const LANE_THRESHOLD: f32 = 20.0;
pub const STEER_GAIN: f32 = 0.004;
pub const MAX_CORRECTION: f32 = 0.5;
pub const DEAD_BAND: f32 = 0.05;
pub const AVOID_RADIUS: f32 = 300.0;
pub const AVOID_CONE: f32 = 0.35;
pub const AI_HEADING: f32 = -FRAC_PI_2;
pub const AI_SPAWN_GAP: f32 = 350.0;

/// Motion model constants
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleTuning {
    pub max_speed: f32,
    pub acceleration: f32,
    pub turning_speed: f32,
    pub friction: f32,
    pub offroad_friction: f32,
    pub min_turn_speed: f32,
    pub drift_speed: f32,
    pub drift_turn_factor: f32,
    pub nitro_max: f32,
    pub nitro_drain: f32,
    pub nitro_regen: f32,
    pub boundary_bounce: f32,
    pub boundary_retract: f32,
    pub obstacle_bounce: f32,
    pub obstacle_retract: f32,
    pub obstacle_radius: f32,
    pub smoke_speed: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            turning_speed: TURNING_SPEED,
            friction: FRICTION,
            offroad_friction: OFFROAD_FRICTION,
            min_turn_speed: MIN_TURN_SPEED,
            drift_speed: DRIFT_SPEED,
            drift_turn_factor: DRIFT_TURN_FACTOR,
            nitro_max: NITRO_MAX,
            nitro_drain: NITRO_DRAIN,
            nitro_regen: NITRO_REGEN,
            boundary_bounce: BOUNDARY_BOUNCE,
            boundary_retract: BOUNDARY_RETRACT,
            obstacle_bounce: OBSTACLE_BOUNCE,
            obstacle_retract: OBSTACLE_RETRACT,
            obstacle_radius: OBSTACLE_RADIUS,
            smoke_speed: SMOKE_SPEED,
        }
    }
}

/// Which road network the generator lays down
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoadLayout {
    /// Full orthogonal grid at `grid_spacing`
    Grid,
    /// One vertical corridor with random horizontal connectors
    Highway,
}

/// How strictly generated features keep clear of roads
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExclusionMode {
    /// No road checks at all
    Off,
    /// Trees and buildings avoid roads, water is placed loosely
    SceneryOnly,
    /// Everything avoids roads; offending water bodies are dropped whole
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub world_size: f32,
    pub layout: RoadLayout,
    pub exclusion: ExclusionMode,
    /// Seed for reproducible worlds; `None` draws from the thread RNG
    pub seed: Option<u64>,
    pub grid_spacing: f32,
    pub road_width: f32,
    pub corridor_width: f32,
    pub connector_count: usize,
    pub water_count: usize,
    pub water_padding: f32,
    pub tree_count: usize,
    pub tree_margin: f32,
    pub building_count: usize,
    pub building_padding: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            layout: RoadLayout::Grid,
            exclusion: ExclusionMode::Full,
            seed: None,
            grid_spacing: GRID_SPACING,
            road_width: ROAD_WIDTH,
            corridor_width: CORRIDOR_WIDTH,
            connector_count: CONNECTOR_COUNT,
            water_count: WATER_COUNT,
            water_padding: WATER_PADDING,
            tree_count: TREE_COUNT,
            tree_margin: TREE_MARGIN,
            building_count: BUILDING_COUNT,
            building_padding: BUILDING_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    /// Flat view centered on the player
    TopDown,
    /// Pseudo-3D chase camera
    Perspective,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub mode: ViewMode,
    pub fov: f32,
    pub height: f32,
    pub distance: f32,
    pub follow: f32,
    pub angle: f32,
    pub near_clip: f32,
    pub view_ahead: f32,
    pub view_behind: f32,
    pub cull_padding: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: ViewMode::TopDown,
            fov: FOV,
            height: CAMERA_HEIGHT,
            distance: CAMERA_DISTANCE,
            follow: CAMERA_FOLLOW,
            angle: CAMERA_ANGLE,
            near_clip: NEAR_CLIP,
            view_ahead: VIEW_AHEAD,
            view_behind: VIEW_BEHIND,
            cull_padding: CULL_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiMode {
    /// Constant throttle, nudged back toward the lane center
    Simple,
    /// Nearest-road lane keeping, speed target and avoidance
    Elaborated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub mode: AiMode,
    pub opponents: usize,
    /// Scales the opponents' target speed, in (0, 1]
    pub difficulty: f32,
    pub speed_fraction: f32,
    pub lane_offset: f32,
    pub lane_threshold: f32,
    pub steer_gain: f32,
    pub max_correction: f32,
    pub dead_band: f32,
    pub avoid_radius: f32,
    pub avoid_cone: f32,
    pub default_heading: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            mode: AiMode::Elaborated,
            opponents: OPPONENT_COUNT,
            difficulty: DIFFICULTY,
            speed_fraction: AI_SPEED_FRACTION,
            lane_offset: LANE_OFFSET,
            lane_threshold: LANE_THRESHOLD,
            steer_gain: STEER_GAIN,
            max_correction: MAX_CORRECTION,
            dead_band: DEAD_BAND,
            avoid_radius: AVOID_RADIUS,
            avoid_cone: AVOID_CONE,
            default_heading: AI_HEADING,
        }
    }
}

/// Everything a session needs at startup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimConfig {
    /// The player's car
    pub car: CarModel,
    pub tuning: VehicleTuning,
    pub world: WorldConfig,
    pub camera: CameraConfig,
    pub ai: AiConfig,
}

impl SimConfig {
    /// Reject settings the motion model or generator can't work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.tuning;
        ensure!(t.max_speed > 0.0, "max speed must be positive, got {}", t.max_speed);
        ensure!(
            t.friction > 0.0 && t.friction <= 1.0,
            "friction must be in (0, 1], got {}",
            t.friction
        );
        ensure!(
            t.offroad_friction > 0.0 && t.offroad_friction <= 1.0,
            "off-road friction must be in (0, 1], got {}",
            t.offroad_friction
        );
        ensure!(
            t.drift_turn_factor >= 1.0,
            "drift turn factor must be at least 1, got {}",
            t.drift_turn_factor
        );

        let w = &self.world;
        ensure!(w.world_size > 0.0, "world size must be positive");
        ensure!(
            w.grid_spacing > w.road_width,
            "grid spacing {} must exceed road width {}",
            w.grid_spacing,
            w.road_width
        );
        ensure!(w.road_width > 0.0 && w.corridor_width > 0.0, "road widths must be positive");

        let c = &self.camera;
        ensure!(c.fov > 0.0, "field of view constant must be positive");
        ensure!(c.near_clip > 0.0, "near clip must be positive, got {}", c.near_clip);
        ensure!(
            c.follow > 0.0 && c.follow <= 1.0,
            "camera follow must be in (0, 1], got {}",
            c.follow
        );

        let a = &self.ai;
        ensure!(
            a.difficulty > 0.0 && a.difficulty <= 1.0,
            "difficulty must be in (0, 1], got {}",
            a.difficulty
        );
        ensure!(a.dead_band >= 0.0, "dead band must not be negative");
        ensure!(
            (a.opponents as f32) * AI_SPAWN_GAP < w.world_size / 2.0,
            "{} opponents spaced {} apart don't fit in the world",
            a.opponents,
            AI_SPAWN_GAP
        );
        Ok(())
    }
}
