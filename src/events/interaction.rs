//! Interaction presses and device activation.
//!
//! An astronaut pressing its action button emits an
//! [`InteractionPressedEvent`]. If the press is accepted
//! ([`Astronaut::can_interact`]) the observer:
//!
//! 1. restarts the attack cooldown and plays the attack emote
//! 2. spawns the attack effect
//! 3. forwards the press to the device the astronaut stands at, draining its
//!    battery if the device asks for it
//! 4. tries to whack the nearest astronaut within [`WHACK_RADIUS`]
//!
//! Devices react through [`observe_device_interaction`]; levers then announce
//! their new state with [`LeverStateChangedEvent`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::astronaut::{
    ATTACK_FX_SECONDS, AnimatorFeed, Astronaut, AstronautEmote, SpawnOrder, WHACK_KNOCKBACK,
    WHACK_RADIUS, WHACK_STUN_SECONDS,
};
use crate::components::battery::Battery;
use crate::components::device::{DeviceKind, InteractableDevice, Lever, LeverState, VentSwitch};
use crate::components::rigidbody::RigidBody;
use crate::components::roominhabitant::RoomInhabitant;
use crate::components::transform::WorldTransform;
use crate::components::ttl::Ttl;
use crate::components::vfx::{EffectKind, VisualEffect};
use crate::components::visibility::Visible;
use crate::events::astronaut::{AstronautWhacked, AttackPerformed};
use crate::events::audio::AudioCmd;
use crate::resources::ship::EscapePod;
use crate::resources::soundbanks::{SoundBanks, SoundCue};
use crate::systems::devices::{AirlockQuery, PivotQuery, apply_vent_switch};

/// The action button of `astronaut` was pressed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPressedEvent {
    pub astronaut: Entity,
}

/// `user` activated `device`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInteractionEvent {
    pub device: Entity,
    pub user: Entity,
}

/// A lever (or vent switch) changed position.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeverStateChangedEvent {
    pub lever: Entity,
    pub state: LeverState,
}

type AstronautQueryData = (
    Entity,
    &'static mut Astronaut,
    &'static mut AnimatorFeed,
    &'static mut RoomInhabitant,
    &'static mut RigidBody,
    &'static WorldTransform,
    &'static SpawnOrder,
    Option<&'static mut Battery>,
);

/// Pick the astronaut to whack: the nearest one on the XZ plane strictly
/// within [`WHACK_RADIUS`], ties going to the earliest spawned.
pub fn select_whack_target(
    attacker: Entity,
    attacker_position: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3, SpawnOrder)>,
) -> Option<Entity> {
    candidates
        .into_iter()
        .filter(|(entity, _, _)| *entity != attacker)
        .filter_map(|(entity, position, order)| {
            let planar = (position - attacker_position).with_y(0.0);
            let distance = planar.length();
            (distance < WHACK_RADIUS).then_some((distance, order, entity))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, _, entity)| entity)
}

pub fn observe_interaction_pressed(
    trigger: On<InteractionPressedEvent>,
    mut commands: Commands,
    mut astronauts: Query<AstronautQueryData>,
    devices: Query<&InteractableDevice>,
    sound_banks: Option<Res<SoundBanks>>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let attacker = trigger.event().astronaut;

    // Accept the press and talk to the device.
    let (attacker_position, can_stun) = {
        let Ok((_, mut astro, mut feed, inhabitant, _, transform, _, battery)) =
            astronauts.get_mut(attacker)
        else {
            return;
        };
        if !astro.can_interact(inhabitant.is_being_sucked_into_space()) {
            debug!("Press from {:?} rejected", attacker);
            return;
        }
        astro.attack_cooldown_timer = astro.tuning.attack_cooldown;
        feed.play_emote(AstronautEmote::Attack);

        commands.spawn((
            VisualEffect {
                kind: EffectKind::Attack,
            },
            *transform,
            Visible(true),
            Ttl::new(ATTACK_FX_SECONDS),
        ));
        commands.trigger(AttackPerformed {
            astronaut: attacker,
        });

        if let Some(device) = inhabitant.current_device() {
            commands.trigger(DeviceInteractionEvent {
                device,
                user: attacker,
            });
            let drains = devices
                .get(device)
                .map(InteractableDevice::drains_battery_on_interaction)
                .unwrap_or(false);
            if drains && let Some(mut battery) = battery {
                battery.drain_charge();
            }
        }
        (transform.position, astro.tuning.can_stun)
    };

    if !can_stun {
        return;
    }

    let candidates = astronauts
        .iter()
        .map(|(entity, _, _, _, _, transform, order, _)| (entity, transform.position, *order));
    let Some(victim) = select_whack_target(attacker, attacker_position, candidates) else {
        return;
    };

    if let Some(cmd) = sound_banks.as_deref().and_then(|b| b.fx(SoundCue::Hit)) {
        audio.write(cmd);
    }

    // The attacker's charge turns the hit into an ejection.
    let ejected = match astronauts.get_mut(attacker) {
        Ok((_, _, _, _, _, _, _, Some(mut battery))) if battery.has_charge() => {
            battery.drain_charge();
            true
        }
        _ => false,
    };

    if let Ok((_, mut astro, mut feed, mut inhabitant, mut body, transform, _, _)) =
        astronauts.get_mut(victim)
    {
        let away = (transform.position - attacker_position).normalize_or_zero();
        body.add_velocity_change(away * WHACK_KNOCKBACK);
        feed.play_emote(AstronautEmote::HitReact);
        astro.stun(WHACK_STUN_SECONDS);
        if ejected {
            inhabitant.notify_sucked_into_space();
        }
    }

    info!(
        "{:?} whacked {:?}{}",
        attacker,
        victim,
        if ejected { " into space" } else { "" }
    );
    commands.trigger(AstronautWhacked {
        attacker,
        victim,
        ejected,
    });
}

/// Apply a device activation.
///
/// Levers and vent switches flip and announce their new state; the escape pod
/// launcher starts the escape timer; consoles only count the press.
pub fn observe_device_interaction(
    trigger: On<DeviceInteractionEvent>,
    mut commands: Commands,
    mut devices: Query<(&mut InteractableDevice, Option<&mut Lever>)>,
    escape_pod: Option<ResMut<EscapePod>>,
) {
    let DeviceInteractionEvent { device, user } = *trigger.event();
    let Ok((mut interactable, lever)) = devices.get_mut(device) else {
        debug!("{:?} pressed on a missing device {:?}", user, device);
        return;
    };
    interactable.interactions += 1;

    match interactable.kind {
        DeviceKind::Lever | DeviceKind::VentSwitch => {
            if let Some(mut lever) = lever {
                let state = lever.toggle();
                commands.trigger(LeverStateChangedEvent {
                    lever: device,
                    state,
                });
            }
        }
        DeviceKind::EscapePodLauncher => match escape_pod {
            Some(mut pod) => {
                pod.launch();
            }
            None => debug!("No escape pod on this ship"),
        },
        DeviceKind::Console => debug!("{:?} used console {:?}", user, device),
    }
}

/// Keep a vent switch's handle and airlock in line with its lever.
pub fn observe_lever_state_changed(
    trigger: On<LeverStateChangedEvent>,
    switches: Query<&VentSwitch>,
    mut pivots: PivotQuery,
    mut airlocks: AirlockQuery,
) {
    let LeverStateChangedEvent { lever, state } = *trigger.event();
    if let Ok(switch) = switches.get(lever) {
        apply_vent_switch(state, switch, &mut pivots, &mut airlocks);
    }
}
