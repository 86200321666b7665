//! Trigger volume crossings and the observer that keeps
//! [`RoomInhabitant`] up to date.
//!
//! A physics host emits [`TriggerCrossed`] from its own trigger callbacks; the
//! headless driver emits them from
//! [`trigger_volume_system`](crate::systems::trigger::trigger_volume_system).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::device::InteractableDevice;
use crate::components::room::Room;
use crate::components::roominhabitant::RoomInhabitant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    Enter,
    Exit,
}

/// `inhabitant` crossed the boundary of `volume`, a room or a device.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerCrossed {
    pub inhabitant: Entity,
    pub volume: Entity,
    pub crossing: Crossing,
}

/// Forward a crossing to the inhabitant's room and/or device slot.
///
/// Volumes that are neither a [`Room`] nor an [`InteractableDevice`] are
/// ignored, as are entities without a [`RoomInhabitant`].
pub fn observe_trigger_crossed(
    trigger: On<TriggerCrossed>,
    mut inhabitants: Query<&mut RoomInhabitant>,
    rooms: Query<(), With<Room>>,
    devices: Query<(), With<InteractableDevice>>,
) {
    let TriggerCrossed {
        inhabitant,
        volume,
        crossing,
    } = *trigger.event();
    let Ok(mut room_inhabitant) = inhabitants.get_mut(inhabitant) else {
        return;
    };

    if rooms.contains(volume) {
        debug!("{:?} {:?} room {:?}", inhabitant, crossing, volume);
        match crossing {
            Crossing::Enter => room_inhabitant.on_room_entered(volume),
            Crossing::Exit => room_inhabitant.on_room_exited(volume),
        }
    }
    if devices.contains(volume) {
        debug!("{:?} {:?} device {:?}", inhabitant, crossing, volume);
        match crossing {
            Crossing::Enter => room_inhabitant.on_interaction_entered(volume),
            Crossing::Exit => room_inhabitant.on_interaction_exited(volume),
        }
    }
}
