//! Driving session that ties everything together
//!
//! `SimWorld` is the explicit context passed around instead of process-wide
//! state: it owns the generated map, the vehicles, the camera and the
//! particle list, and runs the frame in a fixed order.

use anyhow::{Context, Result};
use log::info;

use super::ai::AiController;
use super::audio::{speed_kmh, EngineSoundHook};
use super::camera::Camera;
use super::config::{SimConfig, ViewMode, AI_SPAWN_GAP, SMOKE_DECAY};
use super::draw::DrawList;
use super::generator::WorldGenerator;
use super::input::{ControlInput, KeyState};
use super::map::{SceneryKind, WorldMap};
use super::physics::VehicleSimulator;
use super::render::Renderer;
use super::stats::DriveStats;
use super::types::{Position, Viewport};
use super::vehicle::{decay_particles, CarModel, Driver, Particle, Vehicle};

/// The running session. The player is always `vehicles[0]`.
pub struct SimWorld {
    pub config: SimConfig,
    pub map: WorldMap,
    pub vehicles: Vec<Vehicle>,
    pub camera: Camera,
    pub particles: Vec<Particle>,
    /// Simulation ticks run so far
    pub ticks: u64,
    pub stats: DriveStats,
    simulator: VehicleSimulator,
    ai: AiController,
    renderer: Renderer,
}

impl SimWorld {
    /// Validate `config`, generate a world and spawn the cars
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;
        let map = WorldGenerator::new(config.world.clone()).generate();
        Ok(Self::with_map(config, map))
    }

    /// Start a session on an already built map
    pub fn with_map(config: SimConfig, map: WorldMap) -> Self {
        let vehicles = spawn_vehicles(&config);
        let camera = match config.camera.mode {
            ViewMode::TopDown => Camera::centered_on(&vehicles[0].position, Viewport::default()),
            ViewMode::Perspective => Camera::behind(&vehicles[0].position, &config.camera),
        };

        info!(
            "Session ready: {} opponents, {:?} view, {:?} AI",
            vehicles.len() - 1,
            config.camera.mode,
            config.ai.mode
        );

        Self {
            simulator: VehicleSimulator::new(config.tuning.clone()),
            ai: AiController::new(config.ai.clone(), config.tuning.max_speed),
            renderer: Renderer::new(config.camera.clone()),
            config,
            map,
            vehicles,
            camera,
            particles: Vec::new(),
            ticks: 0,
            stats: DriveStats::default(),
        }
    }

    pub fn player(&self) -> &Vehicle {
        &self.vehicles[0]
    }

    /// One simulation step for every vehicle, player first.
    ///
    /// AI cars read the other vehicles' current state, so cars stepped earlier
    /// in the tick are seen at their new positions.
    pub fn tick(&mut self, keys: &KeyState, hook: &mut dyn EngineSoundHook) {
        let player_control = ControlInput::from(*keys);
        if keys.horn {
            hook.sound_horn();
        }

        for i in 0..self.vehicles.len() {
            let control = match self.vehicles[i].driver {
                Driver::Player => player_control,
                Driver::Ai { .. } => {
                    let others = self
                        .vehicles
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, v)| v);
                    let decision = self.ai.compute_control(&self.vehicles[i], &self.map, others);
                    if let Driver::Ai { target_heading } = &mut self.vehicles[i].driver {
                        *target_heading = decision.target_heading;
                    }
                    decision.control
                }
            };

            let report =
                self.simulator
                    .step(&mut self.vehicles[i], control, &self.map, &mut self.particles);

            if self.vehicles[i].is_player() {
                hook.notify_engine_state(report.engine);
                self.stats.record(&self.vehicles[i], &report);
            }
        }

        self.ticks += 1;
    }

    pub fn update_camera(&mut self, viewport: Viewport) {
        let target = self.vehicles[0].position;
        self.camera.update(&target, viewport, &self.config.camera);
    }

    pub fn render(&self, viewport: Viewport) -> DrawList {
        self.renderer.render(
            &self.map,
            &self.vehicles,
            &self.particles,
            &self.camera,
            viewport,
        )
    }

    /// Input, simulation, camera, render; then fade out old particles
    pub fn frame(
        &mut self,
        keys: &KeyState,
        viewport: Viewport,
        hook: &mut dyn EngineSoundHook,
    ) -> DrawList {
        self.tick(keys, hook);
        self.update_camera(viewport);
        let list = self.render(viewport);
        decay_particles(&mut self.particles, SMOKE_DECAY);
        list
    }

    /// Print a summary of the session state
    pub fn print_summary(&self) {
        let player = self.player();
        println!("=== Drive Summary ===");
        println!("Ticks: {}", self.ticks);
        println!(
            "Roads: {}, Water bodies: {}, Trees: {}, Buildings: {}",
            self.map.roads.len(),
            self.map.waters.len(),
            self.map.tree_count(),
            self.map.building_count()
        );
        println!(
            "Player: position=({:.0}, {:.0}), heading={:.2}, speed={} km/h, nitro={:.0}",
            player.position.x,
            player.position.y,
            player.angle,
            speed_kmh(player.speed),
            player.nitro
        );
        for (i, car) in self.vehicles.iter().enumerate().skip(1) {
            println!(
                "  AI {} ({}): position=({:.0}, {:.0}), speed={} km/h",
                i,
                car.model.name(),
                car.position.x,
                car.position.y,
                speed_kmh(car.speed)
            );
        }
        println!("Particles: {}", self.particles.len());
    }

    /// Draw an ASCII map of the area around the player in the terminal
    pub fn draw_map(&self, cols: usize, rows: usize, cell: f32) {
        println!("\n=== World Map ===");
        println!("Legend: P=Player, A=AI, #=Road, ~=Water, ^=Tree, B=Building");
        println!();
        for line in self.map_lines(cols, rows, cell) {
            println!("{}", line);
        }
        println!();
    }

    /// Rows of the terminal map, `cell` world units per character
    pub fn map_lines(&self, cols: usize, rows: usize, cell: f32) -> Vec<String> {
        if cols == 0 || rows == 0 {
            return Vec::new();
        }
        let center = self.player().position;
        let min_x = center.x - cols as f32 * cell / 2.0;
        let min_y = center.y - rows as f32 * cell / 2.0;

        let mut grid = vec![vec![' '; cols]; rows];

        let to_grid = |p: &Position| -> Option<(usize, usize)> {
            let col = ((p.x - min_x) / cell).floor();
            let row = ((p.y - min_y) / cell).floor();
            if col < 0.0 || row < 0.0 || col >= cols as f32 || row >= rows as f32 {
                None
            } else {
                Some((row as usize, col as usize))
            }
        };

        // Roads
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, c) in line.iter_mut().enumerate() {
                let x = min_x + (col as f32 + 0.5) * cell;
                let y = min_y + (row as f32 + 0.5) * cell;
                if self.map.is_on_road(x, y) {
                    *c = '#';
                }
            }
        }

        for water in &self.map.waters {
            for point in &water.points {
                if let Some((row, col)) = to_grid(point) {
                    grid[row][col] = '~';
                }
            }
        }

        for scenery in &self.map.scenery {
            if let Some((row, col)) = to_grid(&scenery.position) {
                grid[row][col] = match scenery.kind {
                    SceneryKind::Tree => '^',
                    SceneryKind::Building => 'B',
                };
            }
        }

        // Player last so it is never hidden
        for vehicle in self.vehicles.iter().rev() {
            if let Some((row, col)) = to_grid(&vehicle.position) {
                grid[row][col] = if vehicle.is_player() { 'P' } else { 'A' };
            }
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

/// Player at the origin heading up the map, opponents queued ahead in the
/// right-hand lane
fn spawn_vehicles(config: &SimConfig) -> Vec<Vehicle> {
    let heading = config.ai.default_heading;
    let mut vehicles = vec![Vehicle::player(
        config.car,
        Position::ground(0.0, 0.0),
        heading,
    )];

    for i in 0..config.ai.opponents {
        let model = CarModel::ALL[(i + 1) % CarModel::ALL.len()];
        let position = Position::ground(config.ai.lane_offset, -((i + 1) as f32) * AI_SPAWN_GAP);
        vehicles.push(Vehicle::ai(model, position, heading));
    }
    vehicles
}
