//! Narrow hook toward the external engine-sound synthesizer
//!
//! The core only pushes state out; it never reads audio state back.

use log::trace;

use super::config::MAX_SPEED;

/// Engine signal emitted after each player step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineState {
    pub speed: f32,
    pub turning: bool,
}

impl EngineState {
    /// Oscillator pitch in Hz
    pub fn frequency(&self) -> f32 {
        60.0 + self.speed.abs() * 15.0
    }

    /// Engine gain in `[0.05, 0.15]`
    pub fn volume(&self) -> f32 {
        0.05 + (self.speed.abs() / MAX_SPEED).min(1.0) * 0.1
    }
}

/// Fire-and-forget sink for engine and horn events
pub trait EngineSoundHook {
    fn notify_engine_state(&mut self, state: EngineState);

    fn sound_horn(&mut self) {}
}

/// Discards every event
#[derive(Debug, Default)]
pub struct SilentEngine;

impl EngineSoundHook for SilentEngine {
    fn notify_engine_state(&mut self, _state: EngineState) {}
}

/// Traces engine events to the log
#[derive(Debug, Default)]
pub struct LoggingEngineHook {
    pub notifications: u64,
    pub horns: u64,
}

impl EngineSoundHook for LoggingEngineHook {
    fn notify_engine_state(&mut self, state: EngineState) {
        self.notifications += 1;
        trace!(
            "engine: speed={:.2} turning={} freq={:.1}Hz vol={:.3}",
            state.speed,
            state.turning,
            state.frequency(),
            state.volume()
        );
    }

    fn sound_horn(&mut self) {
        self.horns += 1;
        trace!("horn");
    }
}

/// Speedometer reading shown to the player
pub fn speed_kmh(speed: f32) -> u32 {
    (speed.abs() * 15.0).floor() as u32
}
