//! Astronaut side of the fixed-rate physics step.
//!
//! - [`hull_contact_system`] decides whether a body is touching the ship
//! - [`astronaut_physics_step`] turns intent into thrust, or lifts an ejected
//!   body clear of the hull
//!
//! Both run before [`movement_step`](crate::systems::movement::movement_step).

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::astronaut::Astronaut;
use crate::components::rigidbody::RigidBody;
use crate::components::room::{Room, TriggerContacts};
use crate::components::roominhabitant::RoomInhabitant;
use crate::resources::worldtime::WorldTime;

pub const THRUST_FORCE: &str = "thrust";
pub const EJECT_LIFT_FORCE: &str = "eject_lift";

/// A body still overlapping any room volume is in contact with the hull.
pub fn hull_contact_system(
    mut bodies: Query<(&mut RigidBody, &TriggerContacts)>,
    rooms: Query<(), With<Room>>,
) {
    for (mut body, contacts) in bodies.iter_mut() {
        let touching = contacts.volumes.iter().any(|volume| rooms.contains(*volume));
        if body.in_contact != touching {
            body.in_contact = touching;
        }
    }
}

/// Thrust for one fixed step. `acceleration` is tuned per step, so it is
/// scaled by the step length the same way the ejection lift already is.
pub fn thrust_acceleration(
    move_vector: Vec3,
    acceleration: f32,
    stunned: bool,
    fixed_delta: f32,
) -> Vec3 {
    if stunned {
        Vec3::ZERO
    } else {
        move_vector * acceleration * fixed_delta
    }
}

pub fn astronaut_physics_step(
    time: Res<WorldTime>,
    mut query: Query<(&Astronaut, &RoomInhabitant, &mut RigidBody)>,
) {
    for (astro, inhabitant, mut body) in query.iter_mut() {
        if inhabitant.is_being_sucked_into_space() {
            body.max_speed = None;
            body.set_force_enabled(THRUST_FORCE, false);
            if body.in_contact {
                body.relax_constraints();
                body.add_force(EJECT_LIFT_FORCE, Vec3::Y * astro.tuning.eject_lift);
            } else {
                body.set_force_enabled(EJECT_LIFT_FORCE, false);
            }
        } else {
            let thrust = thrust_acceleration(
                astro.move_vector(),
                astro.tuning.acceleration,
                astro.is_stunned(),
                time.fixed_delta,
            );
            body.add_force(THRUST_FORCE, thrust);
            body.max_speed = Some(astro.tuning.max_speed);
            body.clamp_speed();
        }
    }
}
