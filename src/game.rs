//! World construction: resources, observers and the entity spawners.
//!
//! [`init_world`] prepares an empty [`World`] and [`setup`] enters the first
//! stage. The `spawn_*` functions build the ship's entities; they are what a
//! level loader (or a test) calls.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::name::Name;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::astronaut::{
    AnimatorFeed, Astronaut, AstronautParts, HeadVariant, SPAWN_FX_SECONDS,
};
use crate::components::battery::Battery;
use crate::components::device::{Airlock, DeviceKind, InteractableDevice, Lever, VentSwitch};
use crate::components::rigidbody::RigidBody;
use crate::components::room::{Room, TriggerContacts, TriggerVolume};
use crate::components::roominhabitant::RoomInhabitant;
use crate::components::transform::WorldTransform;
use crate::components::ttl::Ttl;
use crate::components::vfx::{EffectKind, VisualEffect};
use crate::components::visibility::Visible;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::gamestate::{observe_game_stage_change, set_game_stage};
use crate::events::interaction::{
    observe_device_interaction, observe_interaction_pressed, observe_lever_state_changed,
};
use crate::events::menu::{observe_menu_button, observe_set_difficulty};
use crate::events::trigger::observe_trigger_crossed;
use crate::resources::camera::{CameraController, CameraStack};
use crate::resources::difficulty::DifficultySettings;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, NextGameStage, QuitRequested};
use crate::resources::ship::{EscapePod, ShipHealth};
use crate::resources::simrng::SimRng;
use crate::resources::spawncounter::SpawnCounter;
use crate::resources::stagescreens::StageScreens;
use crate::resources::worldtime::WorldTime;

/// Number of interchangeable head models.
pub const HEAD_VARIANTS: usize = 4;

/// Insert every resource and observer the simulation needs.
pub fn init_world(world: &mut World, config: GameConfig, rng: SimRng) {
    let difficulty = DifficultySettings::preset(config.difficulty);

    world.insert_resource(
        WorldTime::default()
            .with_time_scale(config.time_scale)
            .with_fixed_delta(config.fixed_step),
    );
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameStage::new());
    world.insert_resource(QuitRequested::default());
    world.insert_resource(ShipHealth::new(config.ship_max_health));
    world.insert_resource(EscapePod::new(difficulty.escape_duration));
    world.insert_resource(difficulty);
    world.insert_resource(CameraStack::new());
    world.insert_resource(StageScreens::default());
    world.insert_resource(config.sound_banks.clone());
    world.insert_resource(SpawnCounter::default());
    world.insert_resource(rng);
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();
    world.insert_resource(config);

    world.spawn(Observer::new(observe_game_stage_change));
    world.spawn(Observer::new(observe_interaction_pressed));
    world.spawn(Observer::new(observe_device_interaction));
    world.spawn(Observer::new(observe_lever_state_changed));
    world.spawn(Observer::new(observe_trigger_crossed));
    world.spawn(Observer::new(observe_menu_button));
    world.spawn(Observer::new(observe_set_difficulty));
    // Ensure the observers are registered before anything triggers events.
    world.flush();
}

/// Push the base camera and enter the configured initial stage.
pub fn setup(world: &mut World) {
    world
        .resource_mut::<CameraStack>()
        .push(CameraController::Menu);
    let initial_stage = world.resource::<GameConfig>().initial_stage;
    info!("Setting up, initial stage {:?}", initial_stage);
    set_game_stage(world, initial_stage);
}

fn spawn_part(world: &mut World, parent: Entity, name: &'static str, visible: bool) -> Entity {
    world
        .spawn((Name::new(name), Visible(visible), ChildOf(parent)))
        .id()
}

/// Spawn an astronaut with a charged battery, a random head and its spawn
/// effect. Tuning comes from [`GameConfig`] when present.
pub fn spawn_astronaut(world: &mut World, position: Vec3) -> Entity {
    let tuning = world
        .get_resource::<GameConfig>()
        .map(|config| config.astronaut)
        .unwrap_or_default();
    let order = world.resource_mut::<SpawnCounter>().next();
    let head = world.resource_mut::<SimRng>().index(HEAD_VARIANTS);
    let transform = WorldTransform::from_position(position);

    let astronaut = world
        .spawn((
            Astronaut::new(tuning),
            AnimatorFeed::default(),
            RoomInhabitant::new(),
            RigidBody::new(),
            transform,
            TriggerContacts::default(),
            order,
            HeadVariant(head),
            Battery::default(),
            Visible(true),
        ))
        .id();

    let mut parts = AstronautParts::default();
    parts
        .hide_on_die
        .push(spawn_part(world, astronaut, "helmet_light", true));
    parts
        .show_on_die
        .push(spawn_part(world, astronaut, "panic_face", false));
    parts.stun_fx = Some(spawn_part(world, astronaut, "stun_fx", false));
    parts.exclamation = Some(spawn_part(world, astronaut, "exclamation", false));
    parts.head = Some(spawn_part(world, astronaut, "head", true));
    world.entity_mut(astronaut).insert(parts);

    world.spawn((
        VisualEffect {
            kind: EffectKind::Spawn,
        },
        transform,
        Visible(true),
        Ttl::new(SPAWN_FX_SECONDS),
    ));

    debug!(
        "Spawned astronaut {:?} (order {}, head {}) at {}",
        astronaut, order.0, head, position
    );
    astronaut
}

pub fn spawn_room(
    world: &mut World,
    name: impl Into<String>,
    center: Vec3,
    half_extents: Vec3,
) -> Entity {
    world
        .spawn((
            Room { name: name.into() },
            WorldTransform::from_position(center),
            TriggerVolume::new(half_extents),
        ))
        .id()
}

/// Spawn a device with its interaction volume. Levers also get their
/// [`Lever`] state.
pub fn spawn_device(
    world: &mut World,
    kind: DeviceKind,
    position: Vec3,
    half_extents: Vec3,
    drains_battery: bool,
) -> Entity {
    let mut device = world.spawn((
        InteractableDevice::new(kind, drains_battery),
        WorldTransform::from_position(position),
        TriggerVolume::new(half_extents),
        Visible(true),
    ));
    if matches!(kind, DeviceKind::Lever | DeviceKind::VentSwitch) {
        device.insert(Lever::default());
    }
    device.id()
}

pub fn spawn_airlock(world: &mut World, room: Entity) -> Entity {
    world
        .spawn((Airlock::new(Some(room)), Visible(true)))
        .id()
}

/// Spawn a vent switch wired to `airlock`, with a handle pivot child. The
/// handle and airlock are synced on the next update.
pub fn spawn_vent_switch(
    world: &mut World,
    position: Vec3,
    half_extents: Vec3,
    airlock: Entity,
) -> Entity {
    let switch = spawn_device(
        world,
        DeviceKind::VentSwitch,
        position,
        half_extents,
        true,
    );
    let pivot = world
        .spawn((
            Name::new("handle_pivot"),
            WorldTransform::from_position(position),
            ChildOf(switch),
        ))
        .id();
    world.entity_mut(switch).insert(VentSwitch {
        handle_pivot: Some(pivot),
        airlock: Some(airlock),
    });
    switch
}
