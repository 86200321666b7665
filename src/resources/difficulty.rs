//! Difficulty presets.
//!
//! The menu exposes three literal difficulty names: `"easy"`, `"med"` and
//! `"hard"`. Anything else is ignored. A preset controls how fast the hull
//! decays during a game and how long the escape pod needs once launched.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Med,
    Hard,
}

impl Difficulty {
    /// Match one of the literal menu names. No trimming or case folding.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "med" => Some(Difficulty::Med),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Med => "med",
            Difficulty::Hard => "hard",
        }
    }
}

/// Active difficulty and the tuning values derived from it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DifficultySettings {
    pub level: Difficulty,
    /// Hull points lost per second while a game is running.
    pub hull_decay_per_second: f32,
    /// Seconds the escape pod must run before the crew has escaped.
    pub escape_duration: f32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self::preset(Difficulty::default())
    }
}

impl DifficultySettings {
    pub fn preset(level: Difficulty) -> Self {
        let (hull_decay_per_second, escape_duration) = match level {
            Difficulty::Easy => (0.5, 30.0),
            Difficulty::Med => (1.0, 45.0),
            Difficulty::Hard => (2.0, 60.0),
        };
        Self {
            level,
            hull_decay_per_second,
            escape_duration,
        }
    }

    pub fn set_easy(&mut self) {
        *self = Self::preset(Difficulty::Easy);
    }

    pub fn set_med(&mut self) {
        *self = Self::preset(Difficulty::Med);
    }

    pub fn set_hard(&mut self) {
        *self = Self::preset(Difficulty::Hard);
    }

    /// Apply a difficulty by its menu name. Unknown names leave the settings
    /// untouched. Returns whether a preset was applied.
    pub fn set_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_name(name) {
            Some(Difficulty::Easy) => self.set_easy(),
            Some(Difficulty::Med) => self.set_med(),
            Some(Difficulty::Hard) => self.set_hard(),
            None => {
                debug!("Ignoring unknown difficulty '{}'", name);
                return false;
            }
        }
        info!("Difficulty set to {}", self.level.name());
        true
    }
}
