//! High-level game stage resources.
//!
//! These resources track the authoritative current stage of the game and any
//! pending transition requested by systems. See
//! `crate::events::gamestate::observe_game_stage_change` for how a transition
//! is applied and how the exit/enter hooks are invoked.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

/// Discrete top-level modes the game can be in.
///
/// [`GameStage::Invalid`] is the value before setup runs; it is never entered
/// again once a real stage has been set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStage {
    #[default]
    Invalid,
    MainMenu,
    Game,
    WinGame,
    LoseGame,
}

impl GameStage {
    /// Parse a stage name as written in `config.ini`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "main_menu" | "menu" => Some(GameStage::MainMenu),
            "game" => Some(GameStage::Game),
            "win_game" | "win" => Some(GameStage::WinGame),
            "lose_game" | "lose" => Some(GameStage::LoseGame),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameStage::Invalid => "invalid",
            GameStage::MainMenu => "main_menu",
            GameStage::Game => "game",
            GameStage::WinGame => "win_game",
            GameStage::LoseGame => "lose_game",
        }
    }

    /// Win and lose screens have no automatic way out.
    pub fn is_final(&self) -> bool {
        matches!(self, GameStage::WinGame | GameStage::LoseGame)
    }
}

/// Representation of a requested next stage.
///
/// Use [`NextGameStage::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStages::Unchanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStages {
    #[default]
    Unchanged,
    Pending(GameStage),
}

/// Authoritative current game stage.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStage,
}

impl GameState {
    /// Create a new state initialized to [`GameStage::Invalid`].
    pub fn new() -> Self {
        GameState {
            current: GameStage::Invalid,
        }
    }
    pub fn get(&self) -> GameStage {
        self.current
    }
    /// Overwrite the current stage without running any hooks.
    ///
    /// Prefer requesting transitions via [`NextGameStage`] so exit/enter side
    /// effects run.
    pub fn set(&mut self, stage: GameStage) {
        self.current = stage;
    }
}

/// Intent to change to a new game stage.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameStage {
    next: NextGameStages,
}

impl NextGameStage {
    pub fn new() -> Self {
        NextGameStage {
            next: NextGameStages::Unchanged,
        }
    }

    pub fn get(&self) -> NextGameStages {
        self.next
    }

    /// Request a transition to `next`. The last request before the observer
    /// runs wins.
    pub fn set(&mut self, next: GameStage) {
        self.next = NextGameStages::Pending(next);
        // `check_pending_stage` turns this into a GameStageChangedEvent.
    }

    pub fn reset(&mut self) {
        self.next = NextGameStages::Unchanged;
    }
}

/// Set by the main menu's quit button; the driver loop polls it.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct QuitRequested(pub bool);
