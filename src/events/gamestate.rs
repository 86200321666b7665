//! Game stage transition events and the observer that applies them.
//!
//! Systems request a change of [`GameStage`] by updating [`NextGameStage`].
//! Emitting a [`GameStageChangedEvent`] then triggers
//! [`observe_game_stage_change`], which runs the exit hooks of the current
//! stage, the enter hooks of the new one, and finally commits the new stage
//! to [`GameState`].
//!
//! Hooks per stage:
//!
//! | Stage | on exit | on enter |
//! |---|---|---|
//! | MainMenu | fade out menu loop; despawn UI | spawn UI; fade in menu loop |
//! | Game | fade out game loop; stop hull decay; pop game camera; despawn UI | fade in game loop; spawn UI; restore hull; push game camera; [`GameStartedEvent`] |
//! | WinGame / LoseGame | despawn UI | alert; ship explosion; spawn UI |
//!
//! [`StageExited`] and [`StageEntered`] are triggered right after the
//! respective hooks.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, info, warn};

use crate::components::screen::{ShipExplosion, UiScreen};
use crate::components::visibility::Visible;
use crate::events::audio::AudioCmd;
use crate::resources::camera::{CameraController, CameraStack};
use crate::resources::difficulty::DifficultySettings;
use crate::resources::gamestate::NextGameStages::{Pending, Unchanged};
use crate::resources::gamestate::{GameStage, GameState, NextGameStage};
use crate::resources::ship::{EscapePod, ShipHealth};
use crate::resources::soundbanks::{SoundBanks, SoundCue};
use crate::resources::stagescreens::StageScreens;

const MENU_MUSIC_FADE_OUT: f32 = 0.5;
const MENU_MUSIC_FADE_IN: f32 = 3.0;
const GAME_MUSIC_FADE: f32 = 1.0;

/// Apply the transition pending in [`NextGameStage`], if any.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStageChangedEvent {}

/// Exit hooks of `stage` have run.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageExited {
    pub stage: GameStage,
}

/// Enter hooks of `stage` have run.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEntered {
    pub stage: GameStage,
}

/// A new game has just begun.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStartedEvent {}

/// Everything the stage hooks touch. Optional collaborators are skipped when
/// absent.
#[derive(SystemParam)]
pub struct StageHookContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub audio: MessageWriter<'w, AudioCmd>,
    pub sound_banks: Option<Res<'w, SoundBanks>>,
    pub screens: ResMut<'w, StageScreens>,
    pub camera: ResMut<'w, CameraStack>,
    pub ship: Option<ResMut<'w, ShipHealth>>,
    pub escape_pod: Option<ResMut<'w, EscapePod>>,
    pub difficulty: Option<Res<'w, DifficultySettings>>,
}

impl StageHookContext<'_, '_> {
    fn send(&mut self, cmd: impl FnOnce(&SoundBanks) -> Option<AudioCmd>) {
        if let Some(cmd) = self.sound_banks.as_deref().and_then(cmd) {
            self.audio.write(cmd);
        }
    }

    fn spawn_ui(&mut self, stage: GameStage) {
        let entity = self
            .commands
            .spawn((UiScreen { stage }, Visible(true)))
            .id();
        if let Some(slot) = self.screens.slot_mut(stage) {
            if let Some(stale) = slot.replace(entity) {
                self.commands.entity(stale).try_despawn();
            }
        }
    }

    fn despawn_ui(&mut self, stage: GameStage) {
        if let Some(entity) = self.screens.slot_mut(stage).and_then(Option::take) {
            self.commands.entity(entity).try_despawn();
        }
    }

    fn on_stage_exit(&mut self, stage: GameStage) {
        match stage {
            GameStage::Invalid => debug!("Exited Invalid stage"),
            GameStage::MainMenu => {
                self.send(|b| b.fade_out(SoundCue::MusicMenuLoop, MENU_MUSIC_FADE_OUT));
                self.despawn_ui(stage);
            }
            GameStage::Game => {
                self.send(|b| b.fade_out(SoundCue::MusicGameLoop, GAME_MUSIC_FADE));
                if let Some(ship) = self.ship.as_deref_mut() {
                    ship.on_completed_game();
                }
                self.camera.pop(CameraController::Game);
                self.despawn_ui(stage);
            }
            GameStage::WinGame | GameStage::LoseGame => self.despawn_ui(stage),
        }
        self.commands.trigger(StageExited { stage });
    }

    fn on_stage_enter(&mut self, stage: GameStage) {
        match stage {
            GameStage::Invalid => debug!("Entered Invalid stage"),
            GameStage::MainMenu => {
                self.spawn_ui(stage);
                self.send(|b| b.fade_in(SoundCue::MusicMenuLoop, MENU_MUSIC_FADE_IN));
            }
            GameStage::Game => {
                self.send(|b| b.fade_in(SoundCue::MusicGameLoop, GAME_MUSIC_FADE));
                self.spawn_ui(stage);
                if let Some(ship) = self.ship.as_deref_mut() {
                    ship.on_started_game();
                }
                if let Some(pod) = self.escape_pod.as_deref_mut() {
                    pod.reset();
                    if let Some(difficulty) = self.difficulty.as_deref() {
                        pod.escape_duration = difficulty.escape_duration;
                    }
                }
                self.camera.push(CameraController::Game);
                self.commands.trigger(GameStartedEvent {});
            }
            GameStage::WinGame | GameStage::LoseGame => {
                let alert = if stage == GameStage::WinGame {
                    SoundCue::WinAlert
                } else {
                    SoundCue::LoseAlert
                };
                self.send(|b| b.fx(alert));
                self.commands.spawn((ShipExplosion, Visible(true)));
                self.spawn_ui(stage);
            }
        }
        self.commands.trigger(StageEntered { stage });
    }
}

/// Observer that applies a pending game stage transition.
///
/// - Reads the request from [`NextGameStage`] and clears it.
/// - A request for the current stage, or for [`GameStage::Invalid`], runs
///   no hooks.
/// - Otherwise runs exit hooks for the old stage, then enter hooks for the
///   new one, then stores the new stage in [`GameState`].
pub fn observe_game_stage_change(
    _trigger: On<GameStageChangedEvent>,
    next_game_stage: Option<ResMut<NextGameStage>>,
    game_state: Option<ResMut<GameState>>,
    mut ctx: StageHookContext,
) {
    debug!("GameStageChangedEvent triggered");

    let (Some(mut next_game_stage), Some(mut game_state)) = (next_game_stage, game_state) else {
        warn!("GameState or NextGameStage missing in observe_game_stage_change");
        return;
    };

    let new_stage = match next_game_stage.get() {
        Pending(stage) => stage,
        Unchanged => {
            debug!("No stage change pending.");
            return;
        }
    };
    next_game_stage.reset();

    let old_stage = game_state.get();
    if new_stage == old_stage {
        debug!("Already in {:?}, ignoring", new_stage);
        return;
    }
    if new_stage == GameStage::Invalid {
        warn!("Refusing to re-enter the Invalid stage");
        return;
    }

    info!("Transitioning from {:?} to {:?}", old_stage, new_stage);
    ctx.on_stage_exit(old_stage);
    ctx.on_stage_enter(new_stage);
    game_state.set(new_stage);
}

/// Request `stage` and apply it immediately, outside of any schedule.
pub fn set_game_stage(world: &mut World, stage: GameStage) {
    world.resource_mut::<NextGameStage>().set(stage);
    world.trigger(GameStageChangedEvent {});
    world.flush();
}
