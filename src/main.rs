use anyhow::{ensure, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use drift_sim::simulation::{
    self, AiMode, CarModel, ExclusionMode, KeyState, LoggingEngineHook, RoadLayout, SimConfig,
    SimWorld, ViewMode, Viewport,
};

#[derive(Parser)]
#[command(name = "drift_sim")]
#[command(about = "Arcade driving simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Seed for world generation; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value = "grid")]
    layout: RoadLayout,

    /// How strictly water, trees and buildings keep clear of roads
    #[arg(long, value_enum, default_value = "full")]
    exclusion: ExclusionMode,

    #[arg(long, value_enum, default_value = "top-down")]
    view: ViewMode,

    /// The player's car
    #[arg(long, value_enum, default_value = "ferrari")]
    car: CarModel,

    #[arg(long, default_value_t = simulation::OPPONENT_COUNT)]
    opponents: usize,

    /// Opponent speed scale in (0, 1]
    #[arg(long, default_value_t = simulation::DIFFICULTY)]
    difficulty: f32,

    #[arg(long, value_enum, default_value = "elaborated")]
    ai_mode: AiMode,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    height: f32,

    /// Print an ASCII map around the player with every report
    #[arg(long)]
    map: bool,

    /// Ticks between progress reports in headless mode
    #[arg(long, default_value = "60")]
    report_every: u64,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig {
            car: self.car,
            ..SimConfig::default()
        };
        config.world.seed = self.seed;
        config.world.layout = self.layout;
        config.world.exclusion = self.exclusion;
        config.camera.mode = self.view;
        config.ai.mode = self.ai_mode;
        config.ai.opponents = self.opponents;
        config.ai.difficulty = self.difficulty;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.ui {
        // Bevy installs its own logger
        env_logger::Builder::from_env(Env::default().default_filter_or("warn,drift_sim=info"))
            .init();
    }

    let config = cli.config();
    config.validate().context("Invalid command line options")?;
    ensure!(
        cli.width > 0.0 && cli.height > 0.0,
        "viewport must be positive, got {}x{}",
        cli.width,
        cli.height
    );
    let viewport = Viewport::new(cli.width, cli.height);

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, viewport);
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    } else {
        run_headless(&cli, config, viewport)?;
    }
    Ok(())
}

/// Scripted driver for headless runs: full throttle with periodic nitro
/// bursts and short steering pulses in both directions
fn scripted_keys(tick: u64) -> KeyState {
    let phase = tick % 240;
    KeyState {
        accelerate: true,
        boost: tick % 300 < 60,
        steer_right: (200..215).contains(&phase),
        steer_left: (215..230).contains(&phase),
        horn: tick % 600 == 0,
        ..KeyState::default()
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: SimConfig, viewport: Viewport) -> Result<()> {
    println!("Running driving simulation in headless mode...");
    println!(
        "Ticks: {}, Layout: {:?}, View: {:?}, Seed: {}",
        cli.ticks,
        config.world.layout,
        config.camera.mode,
        config
            .world
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    println!();

    let mut world = SimWorld::new(config)?;
    let mut engine = LoggingEngineHook::default();
    let report_every = cli.report_every.max(1);

    println!("Initial state:");
    world.print_summary();
    if cli.map {
        world.draw_map(60, 30, 200.0);
    }
    println!();

    let mut commands = 0;
    for tick in 1..=cli.ticks {
        let keys = scripted_keys(tick);
        commands = world.frame(&keys, viewport, &mut engine).len();

        if tick % report_every == 0 && tick < cli.ticks {
            println!("--- After tick {} ({} draw commands) ---", tick, commands);
            world.print_summary();
            if cli.map {
                world.draw_map(60, 30, 200.0);
            }
            println!();
        }
    }

    info!(
        "Engine notifications: {}, horn blasts: {}, last frame: {} draw commands",
        engine.notifications, engine.horns, commands
    );
    world.stats.log_summary();

    println!("=== Final State ===");
    world.print_summary();
    if cli.map {
        world.draw_map(60, 30, 200.0);
    }
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SimConfig, viewport: Viewport) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Drift Sim UI...");
    println!();
    println!("Controls:");
    println!("  W/Up        - Accelerate");
    println!("  S/Down      - Brake / reverse");
    println!("  A/D, Left/Right - Steer");
    println!("  Space       - Nitro");
    println!("  H           - Horn");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,drift_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Drift Sim".into(),
                        resolution: (viewport.width as u32, viewport.height as u32).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(drift_sim::ui::DriftSimUIPlugin { config, viewport })
        .run();
}
