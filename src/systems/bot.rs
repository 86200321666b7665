//! Bot controller.
//!
//! Translates each [`BotPilot`] into movement intent on its
//! [`Astronaut`] and, now and then, an interaction press. Stands in for the
//! gamepad layer when the simulation runs headless.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::astronaut::Astronaut;
use crate::components::botpilot::BotPilot;
use crate::components::transform::WorldTransform;
use crate::events::interaction::InteractionPressedEvent;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;

/// Chance that a retarget picks standing still over a new direction.
const IDLE_CHANCE: f32 = 0.2;

pub fn bot_pilot_system(
    time: Res<WorldTime>,
    mut rng: ResMut<SimRng>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut BotPilot, &mut Astronaut, &WorldTransform)>,
) {
    let dt = time.delta;
    for (entity, mut pilot, mut astro, transform) in query.iter_mut() {
        if astro.is_dead() {
            continue;
        }

        pilot.retarget_timer -= dt;
        let to_home = (pilot.home - transform.position).with_y(0.0);
        if to_home.length() > pilot.leash {
            pilot.heading = to_home.normalize_or_zero();
            pilot.retarget_timer = pilot.retarget_interval;
        } else if pilot.retarget_timer <= 0.0 {
            pilot.retarget_timer = pilot.retarget_interval;
            pilot.heading = if rng.0.f32() < IDLE_CHANCE {
                Vec3::ZERO
            } else {
                let angle = rng.0.f32() * std::f32::consts::TAU;
                Vec3::new(angle.cos(), 0.0, angle.sin())
            };
        }
        astro.set_move_vector(pilot.heading);

        if rng.0.f32() < pilot.press_rate * dt {
            commands.trigger(InteractionPressedEvent { astronaut: entity });
        }
    }
}
