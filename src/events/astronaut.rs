//! Notifications emitted by astronauts.
//!
//! Nothing in the crate needs to react to these; they exist for the host
//! (score keeping, UI, the runner's session log) and for tests.

use bevy_ecs::prelude::*;

/// The ejection impulse has been applied. Fired at most once per astronaut.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstronautDied {
    pub astronaut: Entity,
}

/// The fade-out finished and the astronaut has been removed from the world.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstronautDespawned {
    pub astronaut: Entity,
}

/// An accepted interaction press.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPerformed {
    pub astronaut: Entity,
}

/// `attacker` hit `victim`. `ejected` is set when the hit also sent the
/// victim out of the ship.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstronautWhacked {
    pub attacker: Entity,
    pub victim: Entity,
    pub ejected: bool,
}
