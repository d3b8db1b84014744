//! Per-tick vehicle motion model
//!
//! Arcade kinematics: scalar speed along the heading, speed-gated turning,
//! multiplicative friction and soft, inelastic bounces off the world edge and
//! buildings. The same simulator drives the player and every AI car.

use log::debug;

use super::audio::EngineState;
use super::config::{VehicleTuning, NITRO_GAS_MULTIPLIER};
use super::input::ControlInput;
use super::map::WorldMap;
use super::types::{signum_or_zero, Position};
use super::vehicle::{Particle, Vehicle};

/// What a vehicle hit during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Crossed the edge of the world
    Boundary,
    /// Came within the obstacle radius of a building
    Obstacle,
}

/// Outcome of one `step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Whether the vehicle started the tick on a road
    pub on_road: bool,
    pub boosting: bool,
    pub collision: Option<Collision>,
    /// Signal for the engine sound hook
    pub engine: EngineState,
}

/// Advances vehicles one tick at a time
#[derive(Debug, Clone, Default)]
pub struct VehicleSimulator {
    pub tuning: VehicleTuning,
}

impl VehicleSimulator {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self { tuning }
    }

    /// Advance `vehicle` by one tick.
    ///
    /// Drift smoke is appended to `particles` when the car turns hard at speed.
    pub fn step(
        &self,
        vehicle: &mut Vehicle,
        control: ControlInput,
        map: &WorldMap,
        particles: &mut Vec<Particle>,
    ) -> StepReport {
        let t = &self.tuning;
        let mut gas = control.gas.clamp(-1.0, 1.0);
        let turn = control.turn.clamp(-1.0, 1.0);

        // Nitro
        let boosting = control.boost && vehicle.nitro > 0.0 && gas > 0.0;
        if boosting {
            gas *= NITRO_GAS_MULTIPLIER;
            vehicle.nitro = (vehicle.nitro - t.nitro_drain).max(0.0);
        } else {
            vehicle.nitro = (vehicle.nitro + t.nitro_regen).min(t.nitro_max);
        }

        vehicle.speed += gas * t.acceleration;

        // No turning on the spot
        if vehicle.speed.abs() > t.min_turn_speed {
            let mut rate = t.turning_speed * signum_or_zero(vehicle.speed);
            if gas == 0.0 && vehicle.speed.abs() > t.drift_speed {
                rate *= t.drift_turn_factor;
            }
            vehicle.angle += turn * rate;
        }

        vehicle.speed *= t.friction;
        let on_road = map.is_on_road(vehicle.position.x, vehicle.position.y);
        if !on_road {
            vehicle.speed *= t.offroad_friction;
        }

        vehicle.speed = vehicle.speed.clamp(-t.max_speed / 2.0, t.max_speed);

        vehicle.vel_x = vehicle.angle.cos() * vehicle.speed;
        vehicle.vel_y = vehicle.angle.sin() * vehicle.speed;
        vehicle.position.x += vehicle.vel_x;
        vehicle.position.y += vehicle.vel_y;
        vehicle.position.z += vehicle.vel_z;

        let collision = self.resolve_collisions(vehicle, map);

        if turn != 0.0 && vehicle.speed.abs() > t.smoke_speed {
            let rear = Position::new(
                vehicle.position.x - vehicle.angle.cos() * vehicle.length * 0.5,
                vehicle.position.y - vehicle.angle.sin() * vehicle.length * 0.5,
                vehicle.position.z,
            );
            particles.push(Particle::smoke(rear));
        }

        StepReport {
            on_road,
            boosting,
            collision,
            engine: EngineState {
                speed: vehicle.speed,
                turning: turn != 0.0,
            },
        }
    }

    /// Soft bounces: reverse and damp the speed, then back the car out along
    /// its last velocity step.
    fn resolve_collisions(&self, vehicle: &mut Vehicle, map: &WorldMap) -> Option<Collision> {
        let t = &self.tuning;

        if !map.bounds().contains(vehicle.position.x, vehicle.position.y) {
            vehicle.speed *= t.boundary_bounce;
            vehicle.position.x -= vehicle.vel_x * t.boundary_retract;
            vehicle.position.y -= vehicle.vel_y * t.boundary_retract;
            debug!(
                "Boundary bounce at ({:.0}, {:.0}), speed now {:.2}",
                vehicle.position.x, vehicle.position.y, vehicle.speed
            );
            return Some(Collision::Boundary);
        }

        let hit = map
            .obstacles()
            .any(|building| building.position.distance(&vehicle.position) < t.obstacle_radius);
        if hit {
            vehicle.speed *= t.obstacle_bounce;
            vehicle.position.x -= vehicle.vel_x * t.obstacle_retract;
            vehicle.position.y -= vehicle.vel_y * t.obstacle_retract;
            debug!(
                "Obstacle bounce at ({:.0}, {:.0}), speed now {:.2}",
                vehicle.position.x, vehicle.position.y, vehicle.speed
            );
            return Some(Collision::Obstacle);
        }

        None
    }
}
