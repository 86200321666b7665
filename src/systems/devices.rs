//! Vent switches and airlocks.
//!
//! A vent switch shows its lever state on its handle pivot and opens its
//! airlock while turned on. An open airlock sucks everyone in its room out
//! into space.

use bevy_ecs::prelude::*;
use glam::Quat;
use log::info;

use crate::components::device::{Airlock, Lever, LeverState, VentSwitch};
use crate::components::roominhabitant::RoomInhabitant;
use crate::components::transform::WorldTransform;

pub type PivotQuery<'w, 's> = Query<'w, 's, &'static mut WorldTransform>;
pub type AirlockQuery<'w, 's> = Query<'w, 's, &'static mut Airlock>;

/// Rotate the handle pivot and set the airlock for `state`. Missing
/// references are skipped.
pub fn apply_vent_switch(
    state: LeverState,
    switch: &VentSwitch,
    pivots: &mut PivotQuery,
    airlocks: &mut AirlockQuery,
) {
    if let Some(pivot) = switch.handle_pivot
        && let Ok(mut transform) = pivots.get_mut(pivot)
    {
        let yaw = VentSwitch::handle_yaw_degrees(state).to_radians();
        transform.rotation = Quat::from_rotation_y(yaw);
    }
    if let Some(airlock) = switch.airlock
        && let Ok(mut airlock) = airlocks.get_mut(airlock)
    {
        airlock.set_airlock_state(VentSwitch::airlock_state_for(state));
    }
}

/// Bring freshly spawned vent switches in line with their lever.
pub fn vent_switch_init_system(
    switches: Query<(&Lever, &VentSwitch), Added<VentSwitch>>,
    mut pivots: PivotQuery,
    mut airlocks: AirlockQuery,
) {
    for (lever, switch) in switches.iter() {
        apply_vent_switch(lever.state, switch, &mut pivots, &mut airlocks);
    }
}

pub fn airlock_vent_system(
    airlocks: Query<&Airlock>,
    mut inhabitants: Query<(Entity, &mut RoomInhabitant)>,
) {
    for airlock in airlocks.iter().filter(|airlock| airlock.is_open()) {
        let Some(room) = airlock.room else {
            continue;
        };
        for (entity, mut inhabitant) in inhabitants.iter_mut() {
            if inhabitant.room() == Some(room) && !inhabitant.is_being_sucked_into_space() {
                info!("{:?} is vented through the airlock", entity);
                inhabitant.notify_sucked_into_space();
            }
        }
    }
}
