//! Input boundary between devices and the simulation
//!
//! Devices fill a `KeyState`; the simulator and AI only ever see the resolved
//! `ControlInput`, so input devices can be swapped freely.

/// Held state of each logical control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub boost: bool,
    pub horn: bool,
}

/// Resolved controls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlInput {
    /// -1 (brake/reverse), 0 (coast) or 1 (throttle)
    pub gas: f32,
    /// -1 (left), 0 or 1 (right)
    pub turn: f32,
    pub boost: bool,
}

impl ControlInput {
    pub fn new(gas: f32, turn: f32, boost: bool) -> Self {
        Self { gas, turn, boost }
    }

    pub fn coast() -> Self {
        Self::default()
    }
}

impl From<KeyState> for ControlInput {
    fn from(keys: KeyState) -> Self {
        let mut gas = 0.0;
        let mut turn = 0.0;

        // Later checks win: brake over accelerate, right over left
        if keys.accelerate {
            gas = 1.0;
        }
        if keys.brake {
            gas = -1.0;
        }
        if keys.steer_left {
            turn = -1.0;
        }
        if keys.steer_right {
            turn = 1.0;
        }

        Self {
            gas,
            turn,
            boost: keys.boost,
        }
    }
}
