//! Drive statistics for the player's car

use log::info;

use super::audio::speed_kmh;
use super::physics::{Collision, StepReport};
use super::vehicle::Vehicle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveStats {
    pub ticks: u64,
    /// Distance covered along the road, in world units
    pub distance: f32,
    pub top_speed: f32,
    pub offroad_ticks: u64,
    pub boundary_bounces: u32,
    pub obstacle_bounces: u32,
    pub nitro_ticks: u64,
}

impl DriveStats {
    /// Fold one player step into the totals
    pub fn record(&mut self, vehicle: &Vehicle, report: &StepReport) {
        self.ticks += 1;
        self.distance += vehicle.speed.abs();
        self.top_speed = self.top_speed.max(vehicle.speed.abs());
        if !report.on_road {
            self.offroad_ticks += 1;
        }
        if report.boosting {
            self.nitro_ticks += 1;
        }
        match report.collision {
            Some(Collision::Boundary) => self.boundary_bounces += 1,
            Some(Collision::Obstacle) => self.obstacle_bounces += 1,
            None => {}
        }
    }

    /// Share of ticks spent on a road, in percent
    pub fn on_road_percent(&self) -> f32 {
        if self.ticks == 0 {
            return 100.0;
        }
        (self.ticks - self.offroad_ticks) as f32 / self.ticks as f32 * 100.0
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Ticks: {}", self.ticks);
        info!("Distance: {:.0}", self.distance);
        info!("Max speed: {} km/h", speed_kmh(self.top_speed));
        info!("On road: {:.1}%", self.on_road_percent());
        info!("Boundary bounces: {}", self.boundary_bounces);
        info!("Obstacle bounces: {}", self.obstacle_bounces);
        info!("Nitro ticks: {}", self.nitro_ticks);
    }
}
