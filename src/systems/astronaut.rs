//! Per-frame astronaut behaviour.
//!
//! [`astronaut_update`] runs once per variable-rate tick for every astronaut:
//!
//! 1. turn to face the direction of travel
//! 2. bank the visual root into sideways movement
//! 3. classify and blend the idle animation state
//! 4. drive the ejection sequence (see [`DeathSequence`])
//! 5. show the stun effect while stunned
//! 6. count down the attack cooldown and stun timers
//!
//! An astronaut that starts fading out skips steps 5 and 6 from then on;
//! [`death_fade_system`] shrinks it and finally removes it.

use bevy_ecs::prelude::*;
use glam::{Mat3, Quat, Vec3};
use log::info;

use crate::components::astronaut::{
    AnimatorFeed, Astronaut, AstronautParts, DeathSequence, EJECTION_DEATH_SECONDS,
    EJECTION_DESPAWN_SECONDS, EJECTION_LAUNCH_SPEED, EJECTION_TUMBLE, FADE_OUT_SECONDS,
    MOVING_THRESHOLD_SQ,
};
use crate::components::rigidbody::RigidBody;
use crate::components::roominhabitant::RoomInhabitant;
use crate::components::transform::WorldTransform;
use crate::components::visibility::Visible;
use crate::events::astronaut::{AstronautDespawned, AstronautDied};
use crate::events::audio::AudioCmd;
use crate::resources::camera::CameraView;
use crate::resources::simrng::SimRng;
use crate::resources::soundbanks::{SoundBanks, SoundCue};
use crate::resources::worldtime::WorldTime;

const FACING_SMOOTHING: f32 = 0.25;
const ROLL_SMOOTHING: f32 = 0.5;
const IDLE_BLEND_SMOOTHING: f32 = 0.25;
const DAMP_RATE: f32 = 5.0;
const ROLL_DEGREES: f32 = 90.0;
const ROLL_INTENT_THRESHOLD: f32 = 0.1;

/// Frame-rate independent approach of `a` toward `b`. `smoothing` is the
/// fraction of the gap left after one unit of `dt`.
pub fn damp(a: f32, b: f32, smoothing: f32, dt: f32) -> f32 {
    a + (b - a) * (1.0 - smoothing.powf(dt))
}

pub fn damp_quat(a: Quat, b: Quat, smoothing: f32, dt: f32) -> Quat {
    a.slerp(b, 1.0 - smoothing.powf(dt))
}

/// Rotation whose forward (-Z) points along `forward`, keeping `up` as close
/// to vertical as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let back = -forward.normalize_or_zero();
    if back == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let right = up.cross(back).try_normalize().unwrap_or(Vec3::X);
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// Target bank angle for a movement intent, in degrees.
pub fn roll_target(move_vector: Vec3, stunned: bool, ejected: bool) -> f32 {
    if stunned || ejected || move_vector.x.abs() <= ROLL_INTENT_THRESHOLD {
        0.0
    } else {
        -ROLL_DEGREES * move_vector.x.signum()
    }
}

fn set_visible(parts: &mut Query<&mut Visible, Without<Astronaut>>, entity: Entity, visible: bool) {
    if let Ok(mut flag) = parts.get_mut(entity)
        && flag.0 != visible
    {
        flag.0 = visible;
    }
}

type AgentQueryData = (
    Entity,
    &'static mut Astronaut,
    &'static mut AnimatorFeed,
    &'static RoomInhabitant,
    &'static mut RigidBody,
    &'static mut WorldTransform,
    Option<&'static AstronautParts>,
);

pub fn astronaut_update(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut astronauts: Query<AgentQueryData>,
    mut parts: Query<&mut Visible, Without<Astronaut>>,
    camera_view: Option<Res<CameraView>>,
    sound_banks: Option<Res<SoundBanks>>,
    mut rng: ResMut<SimRng>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let dt = time.delta;
    let rate = dt * DAMP_RATE;

    for (entity, mut astro, mut feed, inhabitant, mut body, mut transform, astro_parts) in
        astronauts.iter_mut()
    {
        let ejected = inhabitant.is_being_sucked_into_space();
        let stunned = astro.is_stunned();

        // Orientation
        if body.velocity.length_squared() > MOVING_THRESHOLD_SQ && !stunned {
            let desired = look_rotation(body.velocity, Vec3::Y);
            transform.rotation = damp_quat(transform.rotation, desired, FACING_SMOOTHING, rate);
        }

        // Roll
        let target_roll = roll_target(astro.move_vector(), stunned, ejected);
        astro.roll_degrees = damp(astro.roll_degrees, target_roll, ROLL_SMOOTHING, rate);

        // Idle state
        astro.idle_state = astro.classify_idle(ejected);
        astro.idle_blend = damp(
            astro.idle_blend,
            astro.idle_state.blend_target(),
            IDLE_BLEND_SMOOTHING,
            rate,
        );
        feed.idle_state = astro.idle_blend;

        // Ejection
        if ejected {
            if astro.death == DeathSequence::Alive {
                if let Some(p) = astro_parts {
                    for hidden in p.hide_on_die.iter() {
                        set_visible(&mut parts, *hidden, false);
                    }
                    for shown in p.show_on_die.iter() {
                        set_visible(&mut parts, *shown, true);
                    }
                }
                astro.death = DeathSequence::Ejecting;
            }

            astro.death_timer += dt;
            if !astro.is_dead()
                && (inhabitant.room().is_none() || astro.death_timer > EJECTION_DEATH_SECONDS)
            {
                body.add_velocity_change(Vec3::Y * EJECTION_LAUNCH_SPEED);
                body.add_angular_velocity_change(rng.on_unit_sphere() * EJECTION_TUMBLE);
                astro.death = DeathSequence::Dead;
                if let Some(cmd) = sound_banks.as_deref().and_then(|b| b.fx(SoundCue::Death)) {
                    audio.write(cmd);
                }
                info!("{:?} died in space", entity);
                commands.trigger(AstronautDied { astronaut: entity });
            }

            if astro.is_fading_out() {
                continue;
            }
            if astro.death == DeathSequence::Dead {
                let out_of_view = camera_view
                    .as_deref()
                    .is_some_and(|view| !view.contains(transform.position));
                if out_of_view || astro.death_timer > EJECTION_DESPAWN_SECONDS {
                    astro.death = DeathSequence::FadingOut {
                        elapsed: 0.0,
                        start_scale: transform.scale,
                    };
                    continue;
                }
            }
        }

        // Stun effect
        if let Some(stun_fx) = astro_parts.and_then(|p| p.stun_fx) {
            set_visible(&mut parts, stun_fx, astro.is_stunned());
        }

        // Timers
        if !ejected {
            astro.attack_cooldown_timer -= dt;
        }
        if let Some(exclamation) = astro_parts.and_then(|p| p.exclamation) {
            set_visible(&mut parts, exclamation, astro.attack_cooldown_timer > 0.0);
        }
        astro.stun_timer -= dt;
    }
}

/// Shrink fading astronauts toward zero and remove them (with their parts)
/// once the fade is over.
pub fn death_fade_system(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut astronauts: Query<(
        Entity,
        &mut Astronaut,
        &mut WorldTransform,
        Option<&AstronautParts>,
    )>,
) {
    for (entity, mut astro, mut transform, parts) in astronauts.iter_mut() {
        let DeathSequence::FadingOut {
            elapsed,
            start_scale,
        } = astro.death
        else {
            continue;
        };

        if elapsed >= FADE_OUT_SECONDS {
            if let Some(parts) = parts {
                for part in parts.all() {
                    commands.entity(part).try_despawn();
                }
            }
            commands.entity(entity).try_despawn();
            info!("{:?} despawned", entity);
            commands.trigger(AstronautDespawned { astronaut: entity });
            continue;
        }

        let t = elapsed / FADE_OUT_SECONDS;
        transform.scale = start_scale.lerp(Vec3::ZERO, t);
        astro.death = DeathSequence::FadingOut {
            elapsed: elapsed + time.delta,
            start_scale,
        };
    }
}
