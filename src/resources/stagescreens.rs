//! Entities spawned by the stage controller that must be torn down again
//! when the stage is left.

use bevy_ecs::prelude::{Entity, Resource};

use crate::resources::gamestate::GameStage;

/// One UI screen per stage, present only while that stage is active.
#[derive(Resource, Debug, Clone, Default)]
pub struct StageScreens {
    pub main_menu_ui: Option<Entity>,
    pub game_ui: Option<Entity>,
    pub win_game_ui: Option<Entity>,
    pub lose_game_ui: Option<Entity>,
}

impl StageScreens {
    pub fn slot_mut(&mut self, stage: GameStage) -> Option<&mut Option<Entity>> {
        match stage {
            GameStage::Invalid => None,
            GameStage::MainMenu => Some(&mut self.main_menu_ui),
            GameStage::Game => Some(&mut self.game_ui),
            GameStage::WinGame => Some(&mut self.win_game_ui),
            GameStage::LoseGame => Some(&mut self.lose_game_ui),
        }
    }

    pub fn get(&self, stage: GameStage) -> Option<Entity> {
        match stage {
            GameStage::Invalid => None,
            GameStage::MainMenu => self.main_menu_ui,
            GameStage::Game => self.game_ui,
            GameStage::WinGame => self.win_game_ui,
            GameStage::LoseGame => self.lose_game_ui,
        }
    }
}
