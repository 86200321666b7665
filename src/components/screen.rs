//! Marker entities spawned by the stage controller.
//!
//! The renderer decides what these look like; the simulation only owns their
//! lifetime.

use bevy_ecs::prelude::Component;

use crate::resources::gamestate::GameStage;

/// Root of the UI shown while `stage` is active.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiScreen {
    pub stage: GameStage,
}

/// The ship blowing up behind the win/lose screen.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ShipExplosion;
