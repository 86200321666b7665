//! Main menu buttons and the difficulty selector.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::resources::difficulty::DifficultySettings;
use crate::resources::gamestate::{GameStage, NextGameStage, QuitRequested};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    NewGame,
    Instructions,
    Settings,
    Quit,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButtonEvent {
    pub button: MenuButton,
}

/// Difficulty picked by name: `"easy"`, `"med"` or `"hard"`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SetDifficultyEvent {
    pub name: String,
}

/// New game requests the Game stage; quit raises [`QuitRequested`] for the
/// driver loop. The other buttons only open screens the host draws.
pub fn observe_menu_button(
    trigger: On<MenuButtonEvent>,
    mut next_stage: ResMut<NextGameStage>,
    mut quit: ResMut<QuitRequested>,
) {
    match trigger.event().button {
        MenuButton::NewGame => {
            info!("New game requested");
            next_stage.set(GameStage::Game);
        }
        MenuButton::Instructions | MenuButton::Settings => {
            debug!("Menu button {:?} pressed", trigger.event().button);
        }
        MenuButton::Quit => {
            info!("Quit requested");
            quit.0 = true;
        }
    }
}

pub fn observe_set_difficulty(
    trigger: On<SetDifficultyEvent>,
    mut difficulty: ResMut<DifficultySettings>,
) {
    difficulty.set_difficulty(&trigger.event().name);
}
