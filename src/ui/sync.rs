//! Systems that drive the simulation and present its frames

use bevy::prelude::*;
use log::info;

use super::components::{EngineHook, HeldKeys, LastFrame, SimWorldResource, ViewportSize};
use super::surface::GizmoSurface;

/// Ticks between progress lines in the log
const LOG_EVERY: u64 = 600;

/// System to run one simulation frame per fixed tick
pub fn tick_simulation(
    mut sim_world: ResMut<SimWorldResource>,
    mut held: ResMut<HeldKeys>,
    mut engine: ResMut<EngineHook>,
    mut last_frame: ResMut<LastFrame>,
    viewport: Res<ViewportSize>,
) {
    let keys = held.0;
    last_frame.0 = sim_world.0.frame(&keys, viewport.0, &mut engine.0);
    // The horn is an edge, not a held control
    held.0.horn = false;

    let world = &sim_world.0;
    if world.ticks % LOG_EVERY == 0 {
        let stats = &world.stats;
        info!(
            "tick {}: distance {:.0}, top speed {} km/h, {:.1}% on road",
            world.ticks,
            stats.distance,
            crate::simulation::speed_kmh(stats.top_speed),
            stats.on_road_percent()
        );
    }
}

/// System to replay the latest draw list as gizmos
pub fn draw_frame(mut gizmos: Gizmos, last_frame: Res<LastFrame>, viewport: Res<ViewportSize>) {
    let mut surface = GizmoSurface::new(&mut gizmos, viewport.0);
    last_frame.0.replay(&mut surface);
}
