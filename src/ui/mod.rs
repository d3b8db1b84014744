//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for presentation and input - all simulation logic is
//! in the `simulation` module. Each fixed tick runs one `SimWorld` frame and
//! the resulting draw list is replayed as gizmos every render frame.

mod components;
mod input;
mod surface;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{HeldKeys, LastFrame, SimWorldResource, ViewportSize};
pub use surface::GizmoSurface;

use components::EngineHook;
use input::{handle_input, read_driving_keys};
use sync::{draw_frame, tick_simulation};
use world::setup_world;

use crate::simulation::{SimConfig, Viewport};

/// Simulation frames per second
const TICK_RATE: f64 = 60.0;

/// Plugin to register all UI systems
pub struct DriftSimUIPlugin {
    pub config: SimConfig,
    pub viewport: Viewport,
}

impl Plugin for DriftSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimWorldResource::new(self.config.clone()))
            .insert_resource(ViewportSize(self.viewport))
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
            .init_resource::<HeldKeys>()
            .init_resource::<EngineHook>()
            .init_resource::<LastFrame>()
            .add_systems(Startup, setup_world)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(Update, (read_driving_keys, handle_input, draw_frame));
    }
}
