//! Input handling systems

use bevy::prelude::*;

use super::components::HeldKeys;
use crate::simulation::KeyState;

/// Sample the driving controls. Arrow keys and WASD both work.
pub fn read_driving_keys(keyboard: Res<ButtonInput<KeyCode>>, mut held: ResMut<HeldKeys>) {
    let any = |codes: &[KeyCode]| codes.iter().any(|code| keyboard.pressed(*code));

    held.0 = KeyState {
        accelerate: any(&[KeyCode::KeyW, KeyCode::ArrowUp]),
        brake: any(&[KeyCode::KeyS, KeyCode::ArrowDown]),
        steer_left: any(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
        steer_right: any(&[KeyCode::KeyD, KeyCode::ArrowRight]),
        boost: any(&[KeyCode::Space]),
        // Held until the next fixed tick consumes it
        horn: held.0.horn || keyboard.just_pressed(KeyCode::KeyH),
    };
}

/// Handle basic keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
