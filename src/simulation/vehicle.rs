//! Vehicle state shared by the player and AI opponents

use clap::ValueEnum;
use std::f32::consts::FRAC_PI_2;

use super::config::{CAR_LENGTH, CAR_WIDTH, NITRO_MAX, SMOKE_SIZE};
use super::types::Position;

/// Sprite used to draw a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum CarModel {
    #[default]
    Ferrari,
    Lamborghini,
    Porsche,
}

impl CarModel {
    pub const ALL: [CarModel; 3] = [CarModel::Ferrari, CarModel::Lamborghini, CarModel::Porsche];

    pub fn name(&self) -> &'static str {
        match self {
            CarModel::Ferrari => "ferrari",
            CarModel::Lamborghini => "lamborghini",
            CarModel::Porsche => "porsche",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Ai,
}

/// Where a vehicle's controls come from each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Driver {
    /// Controls are sampled from the input snapshot
    Player,
    /// Controls are computed by the AI controller
    Ai {
        /// Heading the controller last steered toward
        target_heading: f32,
    },
}

/// A car in the driving simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub position: Position,
    /// Heading in radians; 0 points along +X, -PI/2 along -Y
    pub angle: f32,
    /// Signed speed along the heading, forward positive
    pub speed: f32,
    /// Velocity of the last tick, derived from angle and speed
    pub vel_x: f32,
    pub vel_y: f32,
    pub vel_z: f32,
    /// Boost gauge in `[0, NITRO_MAX]`
    pub nitro: f32,
    pub model: CarModel,
    pub driver: Driver,
    pub width: f32,
    pub length: f32,
}

impl Vehicle {
    fn new(model: CarModel, driver: Driver, position: Position, angle: f32) -> Self {
        Self {
            position,
            angle,
            speed: 0.0,
            vel_x: 0.0,
            vel_y: 0.0,
            vel_z: 0.0,
            nitro: NITRO_MAX,
            model,
            driver,
            width: CAR_WIDTH,
            length: CAR_LENGTH,
        }
    }

    pub fn player(model: CarModel, position: Position, angle: f32) -> Self {
        Self::new(model, Driver::Player, position, angle)
    }

    pub fn ai(model: CarModel, position: Position, angle: f32) -> Self {
        Self::new(
            model,
            Driver::Ai {
                target_heading: angle,
            },
            position,
            angle,
        )
    }

    pub fn role(&self) -> Role {
        match self.driver {
            Driver::Player => Role::Player,
            Driver::Ai { .. } => Role::Ai,
        }
    }

    pub fn is_player(&self) -> bool {
        self.role() == Role::Player
    }

    /// Rotation that turns the upright car sprite to face the heading
    pub fn sprite_rotation(&self) -> f32 {
        self.angle + FRAC_PI_2
    }
}

/// A short-lived visual effect such as drift smoke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Position,
    /// Starts at 1 and fades toward 0
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn smoke(position: Position) -> Self {
        Self {
            position,
            life: 1.0,
            size: SMOKE_SIZE,
        }
    }
}

/// Age every particle by `decay` and drop the ones that have faded out
pub fn decay_particles(particles: &mut Vec<Particle>, decay: f32) {
    for particle in particles.iter_mut() {
        particle.life -= decay;
        particle.size += decay * SMOKE_SIZE;
    }
    particles.retain(|p| p.life > 0.0);
}
