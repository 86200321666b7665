//! Headless trigger volumes.
//!
//! Without a physics host nobody reports trigger crossings, so
//! [`trigger_volume_system`] compares each inhabitant's position with every
//! [`TriggerVolume`] and emits [`TriggerCrossed`] for the differences since the
//! last pass. New volumes are entered before old ones are exited, so moving
//! between two touching rooms never leaves a gap.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::components::room::{TriggerContacts, TriggerVolume};
use crate::components::transform::WorldTransform;
use crate::events::trigger::{Crossing, TriggerCrossed};

pub fn trigger_volume_system(
    mut commands: Commands,
    mut inhabitants: Query<(Entity, &WorldTransform, &mut TriggerContacts)>,
    volumes: Query<(Entity, &WorldTransform, &TriggerVolume)>,
) {
    for (inhabitant, transform, mut contacts) in inhabitants.iter_mut() {
        let inside: SmallVec<[Entity; 4]> = volumes
            .iter()
            .filter(|(volume, _, _)| *volume != inhabitant)
            .filter(|(_, center, trigger)| trigger.contains(center.position, transform.position))
            .map(|(volume, _, _)| volume)
            .collect();

        for volume in inside.iter().filter(|v| !contacts.volumes.contains(*v)) {
            commands.trigger(TriggerCrossed {
                inhabitant,
                volume: *volume,
                crossing: Crossing::Enter,
            });
        }
        for volume in contacts.volumes.iter().filter(|v| !inside.contains(*v)) {
            commands.trigger(TriggerCrossed {
                inhabitant,
                volume: *volume,
                crossing: Crossing::Exit,
            });
        }

        if contacts.volumes != inside {
            contacts.volumes = inside;
        }
    }
}
