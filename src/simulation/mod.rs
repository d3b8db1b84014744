//! Standalone driving simulation module
//!
//! This module contains the vehicle physics, world generation, AI opponents
//! and the render pipeline. It runs independently of the Bevy game engine:
//! rendering produces a `DrawList` that any backend can replay, so the whole
//! loop can be driven and tested from the console.

mod ai;
mod audio;
mod camera;
mod config;
mod draw;
mod generator;
mod input;
mod map;
mod physics;
mod render;
mod stats;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use ai::{steer, AiController, AiDecision};
#[allow(unused_imports)]
pub use audio::{speed_kmh, EngineSoundHook, EngineState, LoggingEngineHook, SilentEngine};
#[allow(unused_imports)]
pub use camera::{depth, project, project_perspective, project_top_down, Camera};
#[allow(unused_imports)]
pub use config::*;
#[allow(unused_imports)]
pub use draw::{
    DrawCommand, DrawList, DrawSurface, Rgba, Sprite, Stroke, ASPHALT, ASPHALT_LIGHT, BANK, GRASS,
    HEADLIGHT, MARKING, SKY, SMOKE, WATER,
};
#[allow(unused_imports)]
pub use generator::{generate, water_is_clear, GenerationReport, WorldGenerator};
#[allow(unused_imports)]
pub use input::{ControlInput, KeyState};
#[allow(unused_imports)]
pub use map::{RoadSegment, Scenery, SceneryKind, Water, WorldMap};
#[allow(unused_imports)]
pub use physics::{Collision, StepReport, VehicleSimulator};
#[allow(unused_imports)]
pub use render::{strip_tint, Renderer};
#[allow(unused_imports)]
pub use stats::DriveStats;
#[allow(unused_imports)]
pub use types::{normalize_angle, signum_or_zero, Position, Rect, ScreenPoint, Viewport};
#[allow(unused_imports)]
pub use vehicle::{decay_particles, CarModel, Driver, Particle, Role, Vehicle};
pub use world::SimWorld;
