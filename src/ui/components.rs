//! UI resources linking Bevy to the simulation session

use bevy::prelude::*;

use crate::simulation::{
    generate, DrawList, KeyState, LoggingEngineHook, SimConfig, SimWorld, Viewport,
};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl SimWorldResource {
    pub fn new(config: SimConfig) -> Self {
        let map = generate(&config.world);
        Self(SimWorld::with_map(config, map))
    }
}

/// Control state sampled from the keyboard, read by the next fixed tick
#[derive(Resource, Default)]
pub struct HeldKeys(pub KeyState);

/// Engine events from the player's car
#[derive(Resource, Default)]
pub struct EngineHook(pub LoggingEngineHook);

/// Draw list produced by the most recent simulation frame
#[derive(Resource, Default)]
pub struct LastFrame(pub DrawList);

/// Render surface size, fixed for the session
#[derive(Resource, Clone, Copy)]
pub struct ViewportSize(pub Viewport);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;
