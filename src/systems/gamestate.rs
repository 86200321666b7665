//! Stage flow systems: turn pending requests into transitions and decide when
//! a running game is won or lost.

use bevy_ecs::prelude::*;
use log::info;

use crate::events::gamestate::GameStageChangedEvent;
use crate::resources::gamestate::{GameStage, GameState, NextGameStage, NextGameStages};
use crate::resources::ship::{EscapePod, ShipHealth};

pub fn check_pending_stage(mut commands: Commands, next_stage: Res<NextGameStage>) {
    if let NextGameStages::Pending(_new_stage) = next_stage.get() {
        commands.trigger(GameStageChangedEvent {});
    }
}

pub fn stage_is_game(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStage::Game)
}

/// Outcome of a running game given the ship's collaborators.
///
/// A missing [`ShipHealth`] counts as an intact hull; a missing
/// [`EscapePod`] means the crew cannot escape.
pub fn evaluate_outcome(ship: Option<&ShipHealth>, escape_pod: Option<&EscapePod>) -> GameStage {
    if ship.is_some_and(|ship| !ship.is_ship_alive()) {
        GameStage::LoseGame
    } else if escape_pod.is_some_and(EscapePod::has_escape_duration_elapsed) {
        GameStage::WinGame
    } else {
        GameStage::Game
    }
}

/// Request WinGame or LoseGame once the outcome is decided. Run only while
/// the stage is Game.
pub fn evaluate_win_lose(
    ship: Option<Res<ShipHealth>>,
    escape_pod: Option<Res<EscapePod>>,
    mut next_stage: ResMut<NextGameStage>,
) {
    let outcome = evaluate_outcome(ship.as_deref(), escape_pod.as_deref());
    if outcome != GameStage::Game {
        info!("Game decided: {:?}", outcome);
        next_stage.set(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_ship_loses_even_after_escape() {
        let mut ship = ShipHealth::new(10.0);
        ship.apply_damage(10.0);
        let mut pod = EscapePod::new(0.0);
        pod.launch();
        assert_eq!(evaluate_outcome(Some(&ship), Some(&pod)), GameStage::LoseGame);
    }

    #[test]
    fn escaped_crew_wins() {
        let ship = ShipHealth::new(10.0);
        let mut pod = EscapePod::new(1.0);
        pod.launch();
        pod.advance(1.0);
        assert_eq!(evaluate_outcome(Some(&ship), Some(&pod)), GameStage::WinGame);
    }

    #[test]
    fn undecided_game_keeps_going() {
        let ship = ShipHealth::new(10.0);
        let pod = EscapePod::new(1.0);
        assert_eq!(evaluate_outcome(Some(&ship), Some(&pod)), GameStage::Game);
        assert_eq!(evaluate_outcome(Some(&ship), None), GameStage::Game);
        assert_eq!(evaluate_outcome(None, None), GameStage::Game);
    }
}
