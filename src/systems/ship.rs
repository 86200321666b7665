//! Ship-wide timers: hull decay and the escape pod countdown.

use bevy_ecs::prelude::*;

use crate::resources::difficulty::DifficultySettings;
use crate::resources::ship::{EscapePod, ShipHealth};
use crate::resources::worldtime::WorldTime;

/// Wear the hull down at the difficulty's rate while a game is tracked.
pub fn ship_decay_system(
    time: Res<WorldTime>,
    difficulty: Res<DifficultySettings>,
    ship: Option<ResMut<ShipHealth>>,
) {
    let Some(mut ship) = ship else {
        return;
    };
    if ship.is_tracking() {
        ship.apply_damage(difficulty.hull_decay_per_second * time.delta);
    }
}

pub fn escape_pod_system(time: Res<WorldTime>, escape_pod: Option<ResMut<EscapePod>>) {
    if let Some(mut pod) = escape_pod {
        pod.advance(time.delta);
    }
}
