//! Airlock headless runner.
//!
//! Builds a two-room ship, fills it with bot-controlled astronauts, starts a
//! game from the main menu and runs the simulation at a fixed frame rate until
//! the crew escapes, the hull gives out, or time runs out. A JSON report of
//! the session is printed to stdout.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --astronauts 6 --difficulty hard --seed 42
//! RUST_LOG=debug cargo run -- --duration 30
//! ```

use std::path::PathBuf;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec3;
use log::{info, warn};
use serde::Serialize;

use airlock::components::botpilot::BotPilot;
use airlock::components::device::DeviceKind;
use airlock::events::astronaut::{AstronautDespawned, AstronautDied, AstronautWhacked};
use airlock::events::gamestate::{GameStartedEvent, StageEntered};
use airlock::events::menu::{MenuButton, MenuButtonEvent, SetDifficultyEvent};
use airlock::game::{spawn_airlock, spawn_astronaut, spawn_device, spawn_room, spawn_vent_switch};
use airlock::resources::camera::CameraView;
use airlock::resources::difficulty::{Difficulty, DifficultySettings};
use airlock::resources::gameconfig::GameConfig;
use airlock::resources::gamestate::GameStage;
use airlock::resources::ship::{EscapePod, ShipHealth};
use airlock::resources::simrng::SimRng;
use airlock::resources::spawncounter::SpawnCounter;
use airlock::resources::worldtime::WorldTime;
use airlock::simulation::Simulation;

/// Airlock headless session runner
#[derive(Parser)]
#[command(version, about = "Runs a bot-controlled Airlock session and prints a JSON report.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of astronauts to spawn.
    #[arg(long, default_value_t = 4)]
    astronauts: usize,

    /// Difficulty picked in the menu: easy, med or hard.
    #[arg(long)]
    difficulty: Option<String>,

    /// Seed for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many simulated seconds.
    #[arg(long, default_value_t = 180.0)]
    duration: f32,

    /// Frames per simulated second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Start the audio backend thread.
    #[arg(long)]
    audio: bool,
}

#[derive(Serialize, Debug, Clone)]
struct LogEntry {
    time: f32,
    event: String,
}

/// Everything worth reporting, collected by observers.
#[derive(Resource, Default, Debug)]
struct SessionLog {
    entries: Vec<LogEntry>,
    deaths: u32,
    despawns: u32,
    whacks: u32,
    ejecting_whacks: u32,
}

impl SessionLog {
    fn push(&mut self, time: f32, event: String) {
        self.entries.push(LogEntry { time, event });
    }
}

#[derive(Serialize)]
struct SessionReport {
    outcome: GameStage,
    difficulty: Difficulty,
    simulated_seconds: f32,
    /// Remaining hull, 0 to 1.
    hull: f32,
    escape_pod_launched: bool,
    astronauts_spawned: u64,
    deaths: u32,
    despawns: u32,
    whacks: u32,
    ejecting_whacks: u32,
    events: Vec<LogEntry>,
}

fn log_died(trigger: On<AstronautDied>, time: Res<WorldTime>, mut log: ResMut<SessionLog>) {
    log.deaths += 1;
    log.push(time.elapsed, format!("{:?} died", trigger.event().astronaut));
}

fn log_despawned(
    trigger: On<AstronautDespawned>,
    time: Res<WorldTime>,
    mut log: ResMut<SessionLog>,
) {
    log.despawns += 1;
    log.push(time.elapsed, format!("{:?} despawned", trigger.event().astronaut));
}

fn log_whacked(trigger: On<AstronautWhacked>, time: Res<WorldTime>, mut log: ResMut<SessionLog>) {
    let event = trigger.event();
    log.whacks += 1;
    if event.ejected {
        log.ejecting_whacks += 1;
    }
    log.push(
        time.elapsed,
        format!(
            "{:?} whacked {:?}{}",
            event.attacker,
            event.victim,
            if event.ejected { " into space" } else { "" }
        ),
    );
}

fn log_stage(trigger: On<StageEntered>, time: Res<WorldTime>, mut log: ResMut<SessionLog>) {
    log.push(
        time.elapsed,
        format!("entered {}", trigger.event().stage.name()),
    );
}

fn log_game_started(
    _trigger: On<GameStartedEvent>,
    time: Res<WorldTime>,
    mut log: ResMut<SessionLog>,
) {
    log.push(time.elapsed, "game started".to_string());
}

/// Bridge with the escape pod launcher, cargo bay behind a vent switch.
fn build_ship(sim: &mut Simulation, astronauts: usize) {
    let world = &mut sim.world;
    let bridge_center = Vec3::ZERO;
    let cargo_center = Vec3::new(12.0, 0.0, 0.0);
    let room_half = Vec3::new(6.0, 2.0, 6.0);

    spawn_room(world, "bridge", bridge_center, room_half);
    let cargo_bay = spawn_room(world, "cargo_bay", cargo_center, room_half);
    let airlock = spawn_airlock(world, cargo_bay);
    let device_half = Vec3::new(1.0, 2.0, 1.0);
    spawn_vent_switch(world, Vec3::new(5.0, 0.0, 4.0), device_half, airlock);
    spawn_device(
        world,
        DeviceKind::EscapePodLauncher,
        Vec3::new(-4.0, 0.0, -4.0),
        device_half,
        false,
    );
    spawn_device(
        world,
        DeviceKind::Console,
        Vec3::new(-4.0, 0.0, 4.0),
        device_half,
        false,
    );

    world.insert_resource(CameraView::from_center(
        Vec3::new(6.0, 0.0, 0.0),
        Vec3::new(20.0, 10.0, 14.0),
    ));

    for i in 0..astronauts {
        let home = if i % 2 == 0 { bridge_center } else { cargo_center };
        let offset = Vec3::new((i as f32 * 1.7) % 4.0 - 2.0, 0.0, (i as f32 * 2.3) % 4.0 - 2.0);
        let astronaut = spawn_astronaut(world, home + offset);
        world
            .entity_mut(astronaut)
            .insert(BotPilot::new(1.5, 0.6, home, 5.0));
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    // The session always goes through the menu.
    config.initial_stage = GameStage::MainMenu;

    let rng = match cli.seed {
        Some(seed) => SimRng::with_seed(seed),
        None => SimRng::default(),
    };
    let mut sim = Simulation::with_rng(config, rng);
    if cli.audio {
        sim.start_audio();
    }

    sim.world.init_resource::<SessionLog>();
    sim.world.spawn(Observer::new(log_died));
    sim.world.spawn(Observer::new(log_despawned));
    sim.world.spawn(Observer::new(log_whacked));
    sim.world.spawn(Observer::new(log_stage));
    sim.world.spawn(Observer::new(log_game_started));
    sim.world.flush();

    sim.setup();
    build_ship(&mut sim, cli.astronauts);

    if let Some(name) = cli.difficulty {
        sim.world.trigger(SetDifficultyEvent { name });
    }
    sim.world.trigger(MenuButtonEvent {
        button: MenuButton::NewGame,
    });
    sim.world.flush();

    let dt = 1.0 / cli.fps.max(1) as f32;
    info!("Running for up to {:.0}s at {} fps", cli.duration, cli.fps);
    while sim.world.resource::<WorldTime>().elapsed < cli.duration && !sim.quit_requested() {
        sim.advance(dt);
        if sim.stage().is_final() {
            break;
        }
    }

    let world = &mut sim.world;
    let log = world.remove_resource::<SessionLog>().unwrap_or_default();
    let report = SessionReport {
        outcome: world
            .resource::<airlock::resources::gamestate::GameState>()
            .get(),
        difficulty: world.resource::<DifficultySettings>().level,
        simulated_seconds: world.resource::<WorldTime>().elapsed,
        hull: world.resource::<ShipHealth>().fraction(),
        escape_pod_launched: world.resource::<EscapePod>().is_launched(),
        astronauts_spawned: world.resource::<SpawnCounter>().issued(),
        deaths: log.deaths,
        despawns: log.despawns,
        whacks: log.whacks,
        ejecting_whacks: log.ejecting_whacks,
        events: log.entries,
    };
    info!("Session over: {:?}", report.outcome);

    let json = serde_json::to_string_pretty(&report);
    sim.shutdown();

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize report: {e}");
            std::process::exit(1);
        }
    }
}
