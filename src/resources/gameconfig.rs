//! Game configuration resource.
//!
//! Settings loaded from an INI configuration file. Every value has a safe
//! default, so a missing or partial file still yields a playable setup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [game]
//! initial_stage = main_menu
//! difficulty = med
//!
//! [astronaut]
//! acceleration = 10
//! max_speed = 1
//! attack_cooldown = 1
//! can_stun = true
//! eject_lift = 0.2
//!
//! [ship]
//! max_health = 100
//!
//! [simulation]
//! fixed_step = 0.02
//! time_scale = 1.0
//!
//! [audio]
//! ; set a cue to `none` to mute it
//! hit = hit_sfx
//! death = none
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::astronaut::AstronautTuning;
use crate::resources::difficulty::Difficulty;
use crate::resources::gamestate::GameStage;
use crate::resources::ship::DEFAULT_MAX_HEALTH;
use crate::resources::soundbanks::{SoundBanks, SoundCue};
use crate::resources::worldtime::DEFAULT_FIXED_DELTA;

/// Default safe values for startup
const DEFAULT_INITIAL_STAGE: GameStage = GameStage::MainMenu;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Stage entered by setup.
    pub initial_stage: GameStage,
    pub difficulty: Difficulty,
    /// Tuning applied to newly spawned astronauts.
    pub astronaut: AstronautTuning,
    pub ship_max_health: f32,
    /// Fixed physics step in seconds.
    pub fixed_step: f32,
    pub time_scale: f32,
    pub sound_banks: SoundBanks,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            initial_stage: DEFAULT_INITIAL_STAGE,
            difficulty: Difficulty::default(),
            astronaut: AstronautTuning::default(),
            ship_max_health: DEFAULT_MAX_HEALTH,
            fixed_step: DEFAULT_FIXED_DELTA,
            time_scale: DEFAULT_TIME_SCALE,
            sound_banks: SoundBanks::standard(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values; invalid values
    /// are reported and skipped. Returns an error if the file cannot be read.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [game] section
        if let Some(name) = config.get("game", "initial_stage") {
            match GameStage::from_name(&name) {
                Some(stage) => self.initial_stage = stage,
                None => warn!("Unknown initial_stage '{}', keeping {:?}", name, self.initial_stage),
            }
        }
        if let Some(name) = config.get("game", "difficulty") {
            match Difficulty::from_name(name.trim()) {
                Some(level) => self.difficulty = level,
                None => warn!("Unknown difficulty '{}', keeping {:?}", name, self.difficulty),
            }
        }

        // [astronaut] section
        if let Some(value) = positive_float(config, "astronaut", "acceleration") {
            self.astronaut.acceleration = value;
        }
        if let Some(value) = positive_float(config, "astronaut", "max_speed") {
            self.astronaut.max_speed = value;
        }
        if let Some(value) = non_negative_float(config, "astronaut", "attack_cooldown") {
            self.astronaut.attack_cooldown = value;
        }
        if let Some(value) = non_negative_float(config, "astronaut", "eject_lift") {
            self.astronaut.eject_lift = value;
        }
        if let Some(can_stun) = config.getbool("astronaut", "can_stun").ok().flatten() {
            self.astronaut.can_stun = can_stun;
        }

        // [ship] section
        if let Some(value) = positive_float(config, "ship", "max_health") {
            self.ship_max_health = value;
        }

        // [simulation] section
        if let Some(value) = positive_float(config, "simulation", "fixed_step") {
            self.fixed_step = value;
        }
        if let Some(value) = positive_float(config, "simulation", "time_scale") {
            self.time_scale = value;
        }

        // [audio] section
        for cue in SoundCue::ALL {
            if let Some(id) = config.get("audio", cue.key()) {
                let id = id.trim();
                if id.is_empty() || id.eq_ignore_ascii_case("none") {
                    self.sound_banks.unassign(cue);
                } else {
                    self.sound_banks.assign(cue, id);
                }
            }
        }

        info!(
            "Loaded config: stage={:?}, difficulty={:?}, fixed_step={}, time_scale={}",
            self.initial_stage, self.difficulty, self.fixed_step, self.time_scale
        );
    }
}

fn float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    match config.getfloat(section, key) {
        Ok(value) => value.map(|v| v as f32),
        Err(e) => {
            warn!("Invalid [{}] {}: {}", section, key, e);
            None
        }
    }
}

fn positive_float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    let value = float(config, section, key)?;
    if value > 0.0 && value.is_finite() {
        Some(value)
    } else {
        warn!("[{}] {} must be positive, got {}", section, key, value);
        None
    }
}

fn non_negative_float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    let value = float(config, section, key)?;
    if value >= 0.0 && value.is_finite() {
        Some(value)
    } else {
        warn!("[{}] {} must not be negative, got {}", section, key, value);
        None
    }
}
