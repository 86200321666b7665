//! Interactable devices: levers, vent switches, airlocks and the escape pod
//! launcher.
//!
//! An astronaut standing in a device's trigger volume forwards its
//! interaction press to it as a
//! [`DeviceInteractionEvent`](crate::events::interaction::DeviceInteractionEvent).
//! The device observers in [`crate::events::interaction`] do the rest.

use bevy_ecs::prelude::{Component, Entity};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Two-state toggle; a [`VentSwitch`] on the same entity drives an airlock.
    Lever,
    VentSwitch,
    EscapePodLauncher,
    /// Decorative; counts presses and nothing else.
    Console,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractableDevice {
    pub kind: DeviceKind,
    /// Whether using this device empties the user's battery.
    pub drains_battery: bool,
    /// Number of presses received so far.
    pub interactions: u32,
}

impl InteractableDevice {
    pub fn new(kind: DeviceKind, drains_battery: bool) -> Self {
        Self {
            kind,
            drains_battery,
            interactions: 0,
        }
    }

    pub fn drains_battery_on_interaction(&self) -> bool {
        self.drains_battery
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeverState {
    #[default]
    TurnedOff,
    TurnedOn,
}

impl LeverState {
    pub fn toggled(self) -> Self {
        match self {
            LeverState::TurnedOff => LeverState::TurnedOn,
            LeverState::TurnedOn => LeverState::TurnedOff,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lever {
    pub state: LeverState,
}

impl Lever {
    pub fn new(state: LeverState) -> Self {
        Self { state }
    }

    /// Flip the lever and return the new state.
    pub fn toggle(&mut self) -> LeverState {
        self.state = self.state.toggled();
        debug!("Lever now {:?}", self.state);
        self.state
    }
}

/// Lever that opens an airlock while turned on.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VentSwitch {
    /// Entity whose rotation shows the handle position.
    pub handle_pivot: Option<Entity>,
    pub airlock: Option<Entity>,
}

impl VentSwitch {
    /// Yaw of the handle pivot for a lever state, in degrees.
    pub fn handle_yaw_degrees(state: LeverState) -> f32 {
        match state {
            LeverState::TurnedOff => 45.0,
            LeverState::TurnedOn => -45.0,
        }
    }

    pub fn airlock_state_for(state: LeverState) -> AirlockState {
        match state {
            LeverState::TurnedOff => AirlockState::Closed,
            _ => AirlockState::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AirlockState {
    #[default]
    Closed,
    Open,
}

/// Outer door of a room. While open, everyone in `room` is sucked out.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Airlock {
    pub state: AirlockState,
    pub room: Option<Entity>,
}

impl Airlock {
    pub fn new(room: Option<Entity>) -> Self {
        Self {
            state: AirlockState::Closed,
            room,
        }
    }

    pub fn set_airlock_state(&mut self, state: AirlockState) {
        if self.state != state {
            debug!("Airlock {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    pub fn is_open(&self) -> bool {
        self.state == AirlockState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lever_toggles_between_two_states() {
        let mut lever = Lever::default();
        assert_eq!(lever.state, LeverState::TurnedOff);
        assert_eq!(lever.toggle(), LeverState::TurnedOn);
        assert_eq!(lever.toggle(), LeverState::TurnedOff);
    }

    #[test]
    fn vent_switch_maps_lever_state() {
        assert_eq!(VentSwitch::handle_yaw_degrees(LeverState::TurnedOff), 45.0);
        assert_eq!(VentSwitch::handle_yaw_degrees(LeverState::TurnedOn), -45.0);
        assert_eq!(
            VentSwitch::airlock_state_for(LeverState::TurnedOff),
            AirlockState::Closed
        );
        assert_eq!(
            VentSwitch::airlock_state_for(LeverState::TurnedOn),
            AirlockState::Open
        );
    }
}
