//! Scripted opponents
//!
//! The controller only produces `ControlInput`; the shared `VehicleSimulator`
//! moves AI cars exactly like the player's.

use std::f32::consts::{FRAC_PI_2, PI};

use super::config::{AiConfig, AiMode};
use super::input::ControlInput;
use super::map::{RoadSegment, WorldMap};
use super::types::{normalize_angle, signum_or_zero};
use super::vehicle::Vehicle;

/// Controls for one AI car plus the heading it is steering toward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub control: ControlInput,
    pub target_heading: f32,
    /// Another car was inside the forward avoidance cone
    pub avoiding: bool,
}

/// Bang-bang steering: full lock toward the target outside the dead band,
/// straight ahead inside it.
pub fn steer(heading_error: f32, dead_band: f32) -> f32 {
    let error = normalize_angle(heading_error);
    if error >= dead_band {
        1.0
    } else if error <= -dead_band {
        -1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct AiController {
    pub config: AiConfig,
    pub max_speed: f32,
}

impl AiController {
    pub fn new(config: AiConfig, max_speed: f32) -> Self {
        Self { config, max_speed }
    }

    /// Speed the elaborated controller holds, scaled by difficulty
    pub fn target_speed(&self) -> f32 {
        self.max_speed * self.config.speed_fraction * self.config.difficulty
    }

    pub fn compute_control<'a>(
        &self,
        vehicle: &Vehicle,
        map: &WorldMap,
        others: impl IntoIterator<Item = &'a Vehicle>,
    ) -> AiDecision {
        let Some(road) = map.road_along(&vehicle.position, vehicle.angle) else {
            return AiDecision {
                control: ControlInput::new(1.0, 0.0, false),
                target_heading: vehicle.angle,
                avoiding: false,
            };
        };

        match self.config.mode {
            AiMode::Simple => self.follow_lane(vehicle, road),
            AiMode::Elaborated => self.drive(vehicle, road, others),
        }
    }

    /// Constant throttle; steer back toward the lane once it drifts past the
    /// threshold.
    fn follow_lane(&self, vehicle: &Vehicle, road: &RoadSegment) -> AiDecision {
        let target_heading = match lane_frame(vehicle, road, self.config.lane_offset) {
            Some((base, error)) if error.abs() > self.config.lane_threshold => {
                base + signum_or_zero(error) * self.config.max_correction
            }
            Some((base, _)) => base,
            None => self.config.default_heading,
        };

        AiDecision {
            control: ControlInput::new(
                1.0,
                steer(target_heading - vehicle.angle, self.config.dead_band),
                false,
            ),
            target_heading,
            avoiding: false,
        }
    }

    fn drive<'a>(
        &self,
        vehicle: &Vehicle,
        road: &RoadSegment,
        others: impl IntoIterator<Item = &'a Vehicle>,
    ) -> AiDecision {
        let target_heading = match lane_frame(vehicle, road, self.config.lane_offset) {
            Some((base, error)) => {
                let correction = (error * self.config.steer_gain)
                    .clamp(-self.config.max_correction, self.config.max_correction);
                base + correction
            }
            None => self.config.default_heading,
        };

        let mut turn = steer(target_heading - vehicle.angle, self.config.dead_band);
        let mut gas = if vehicle.speed > self.target_speed() {
            0.0
        } else {
            1.0
        };

        let avoiding = others.into_iter().any(|other| self.blocks(vehicle, other));
        if avoiding {
            gas = -1.0;
            turn = -turn;
        }

        AiDecision {
            control: ControlInput::new(gas, turn, false),
            target_heading,
            avoiding,
        }
    }

    /// Another car close ahead, inside the narrow forward cone
    fn blocks(&self, vehicle: &Vehicle, other: &Vehicle) -> bool {
        let distance = vehicle.position.distance(&other.position);
        if distance <= 0.0 || distance >= self.config.avoid_radius {
            return false;
        }
        let bearing = normalize_angle(vehicle.position.angle_to(&other.position) - vehicle.angle);
        bearing.abs() < self.config.avoid_cone
    }
}

/// Cardinal heading along `road` closest to the car's heading, and the
/// signed lateral error to the lane (positive means the lane is to the
/// driver's right). `None` for a road with no clear axis.
fn lane_frame(vehicle: &Vehicle, road: &RoadSegment, lane_offset: f32) -> Option<(f32, f32)> {
    let base = if road.is_vertical() {
        if vehicle.angle.sin() <= 0.0 {
            -FRAC_PI_2
        } else {
            FRAC_PI_2
        }
    } else if road.is_horizontal() {
        if vehicle.angle.cos() >= 0.0 {
            0.0
        } else {
            PI
        }
    } else {
        return None;
    };

    // Right-hand normal of the base heading
    let (nx, ny) = (-base.sin(), base.cos());
    let center = road.center();
    let lateral = (vehicle.position.x - center.x) * nx + (vehicle.position.y - center.y) * ny;
    Some((base, lane_offset - lateral))
}
