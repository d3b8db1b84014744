//! World setup systems for the camera and background

use bevy::prelude::*;

use super::components::MainCamera;
use super::surface::to_color;
use crate::simulation::GRASS;

/// System to setup the 2D camera the draw list is replayed under
pub fn setup_world(mut commands: Commands) {
    commands.insert_resource(ClearColor(to_color(GRASS)));
    commands.spawn((MainCamera, Camera2d));
}
