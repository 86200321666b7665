//! Astronaut tick integration tests: presses, whacks, ejection, devices and
//! trigger volumes, run through the full simulation schedules.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use airlock::components::astronaut::{
    AnimatorFeed, Astronaut, AstronautEmote, AstronautParts, DeathSequence, WHACK_KNOCKBACK,
};
use airlock::components::battery::Battery;
use airlock::components::device::{
    Airlock, AirlockState, DeviceKind, InteractableDevice, Lever, LeverState,
};
use airlock::components::rigidbody::{Constraints, RigidBody};
use airlock::components::roominhabitant::RoomInhabitant;
use airlock::components::transform::WorldTransform;
use airlock::components::visibility::Visible;
use airlock::events::astronaut::{AstronautDespawned, AstronautDied, AstronautWhacked};
use airlock::events::interaction::InteractionPressedEvent;
use airlock::game::{spawn_airlock, spawn_astronaut, spawn_device, spawn_room, spawn_vent_switch};
use airlock::resources::camera::CameraView;
use airlock::resources::gameconfig::GameConfig;
use airlock::resources::gamestate::GameStage;
use airlock::resources::ship::EscapePod;
use airlock::resources::simrng::SimRng;
use airlock::simulation::Simulation;
use airlock::systems::physics::{EJECT_LIFT_FORCE, THRUST_FORCE};

const DT: f32 = 0.25;
const EPSILON: f32 = 1e-4;

#[derive(Resource, Default, Debug)]
struct Tally {
    died: Vec<Entity>,
    despawned: Vec<Entity>,
    whacks: Vec<AstronautWhacked>,
}

fn count_died(trigger: On<AstronautDied>, mut tally: ResMut<Tally>) {
    tally.died.push(trigger.event().astronaut);
}

fn count_despawned(trigger: On<AstronautDespawned>, mut tally: ResMut<Tally>) {
    tally.despawned.push(trigger.event().astronaut);
}

fn count_whacked(trigger: On<AstronautWhacked>, mut tally: ResMut<Tally>) {
    tally.whacks.push(*trigger.event());
}

fn make_sim() -> Simulation {
    let mut config = GameConfig::new();
    config.initial_stage = GameStage::MainMenu;
    let mut sim = Simulation::with_rng(config, SimRng::with_seed(11));
    sim.world.init_resource::<Tally>();
    sim.world.spawn(Observer::new(count_died));
    sim.world.spawn(Observer::new(count_despawned));
    sim.world.spawn(Observer::new(count_whacked));
    sim.world.flush();
    sim.setup();
    sim
}

fn press(sim: &mut Simulation, astronaut: Entity) {
    sim.world.trigger(InteractionPressedEvent { astronaut });
    sim.world.flush();
}

fn tick(sim: &mut Simulation, frames: usize) {
    for _ in 0..frames {
        sim.advance(DT);
    }
}

fn emote_plays(sim: &Simulation, astronaut: Entity) -> u32 {
    sim.world
        .get::<AnimatorFeed>(astronaut)
        .map(|feed| feed.emote_plays)
        .unwrap_or(0)
}

fn sucked(sim: &Simulation, astronaut: Entity) -> bool {
    sim.world
        .get::<RoomInhabitant>(astronaut)
        .is_some_and(RoomInhabitant::is_being_sucked_into_space)
}

fn tally(sim: &Simulation) -> &Tally {
    sim.world.resource::<Tally>()
}

#[test]
fn press_is_rejected_until_cooldown_runs_out() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);

    press(&mut sim, a);
    assert_eq!(emote_plays(&sim, a), 1);
    assert!(sim.world.get::<Astronaut>(a).unwrap().attack_cooldown_timer > 0.0);

    press(&mut sim, a);
    assert_eq!(emote_plays(&sim, a), 1, "press during cooldown");

    tick(&mut sim, 3);
    press(&mut sim, a);
    assert_eq!(emote_plays(&sim, a), 1, "cooldown not over after 0.75s");

    tick(&mut sim, 1);
    press(&mut sim, a);
    assert_eq!(emote_plays(&sim, a), 2);
    assert_eq!(
        sim.world.get::<AnimatorFeed>(a).unwrap().emote,
        Some(AstronautEmote::Attack)
    );
}

#[test]
fn exclamation_shows_while_cooling_down() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let exclamation = sim
        .world
        .get::<AstronautParts>(a)
        .and_then(|parts| parts.exclamation)
        .unwrap();

    press(&mut sim, a);
    tick(&mut sim, 1);
    assert!(sim.world.get::<Visible>(exclamation).unwrap().0);

    tick(&mut sim, 4);
    assert!(!sim.world.get::<Visible>(exclamation).unwrap().0);
}

#[test]
fn whack_without_charge_stuns_and_knocks_back() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let b = spawn_astronaut(&mut sim.world, Vec3::new(1.0, 0.0, 0.0));
    let far = spawn_astronaut(&mut sim.world, Vec3::new(0.0, 0.0, 2.0));
    sim.world.entity_mut(a).insert(Battery::empty(1.0));

    press(&mut sim, a);

    let victim = sim.world.get::<Astronaut>(b).unwrap();
    assert!(victim.is_stunned());
    let velocity = sim.world.get::<RigidBody>(b).unwrap().velocity;
    assert!((velocity - Vec3::X * WHACK_KNOCKBACK).length() < EPSILON);
    assert_eq!(
        sim.world.get::<AnimatorFeed>(b).unwrap().emote,
        Some(AstronautEmote::HitReact)
    );
    assert!(!sucked(&sim, b));

    assert!(!sim.world.get::<Astronaut>(far).unwrap().is_stunned());
    assert!(!sim.world.get::<Astronaut>(a).unwrap().is_stunned());

    let whacks = &tally(&sim).whacks;
    assert_eq!(whacks.len(), 1);
    assert_eq!(whacks[0].attacker, a);
    assert_eq!(whacks[0].victim, b);
    assert!(!whacks[0].ejected);
}

#[test]
fn stunned_astronaut_cannot_press() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let b = spawn_astronaut(&mut sim.world, Vec3::new(1.0, 0.0, 0.0));
    sim.world.entity_mut(a).insert(Battery::empty(1.0));

    press(&mut sim, a);
    press(&mut sim, b);

    assert_eq!(emote_plays(&sim, b), 1, "only the hit reaction played");
    assert_eq!(tally(&sim).whacks.len(), 1);
}

#[test]
fn charged_whack_ejects_and_drains_attacker() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let b = spawn_astronaut(&mut sim.world, Vec3::new(0.0, 0.0, -1.5));
    assert!(sim.world.get::<Battery>(a).unwrap().has_charge());

    press(&mut sim, a);

    assert!(sucked(&sim, b));
    assert!(!sim.world.get::<Battery>(a).unwrap().has_charge());
    assert!(tally(&sim).whacks[0].ejected);
}

#[test]
fn ejected_astronaut_dies_once_and_fades_out() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let b = spawn_astronaut(&mut sim.world, Vec3::new(1.0, 0.0, 0.0));
    let parts: Vec<Entity> = sim.world.get::<AstronautParts>(b).unwrap().all().collect();

    press(&mut sim, a);
    // Outside any room, death is immediate.
    tick(&mut sim, 1);

    assert_eq!(tally(&sim).died, vec![b]);
    let astro = sim.world.get::<Astronaut>(b).unwrap();
    assert!(astro.is_dead());
    assert_eq!(astro.idle_state, airlock::components::astronaut::AstronautIdle::Panic);
    assert!(sim.world.get::<RigidBody>(b).unwrap().velocity.y > 0.0);

    // Ejected astronauts never interact again.
    press(&mut sim, b);
    assert_eq!(tally(&sim).whacks.len(), 1);

    let mut gone = false;
    for _ in 0..60 {
        tick(&mut sim, 1);
        if sim.world.get_entity(b).is_err() {
            gone = true;
            break;
        }
        assert!(sucked(&sim, b));
    }

    assert!(gone, "dead astronaut should despawn after the fade");
    assert_eq!(tally(&sim).died, vec![b]);
    assert_eq!(tally(&sim).despawned, vec![b]);
    for part in parts {
        assert!(sim.world.get_entity(part).is_err());
    }
    assert!(sim.world.get_entity(a).is_ok());
}

#[test]
fn dead_astronaut_out_of_view_fades_right_away() {
    let mut sim = make_sim();
    sim.world
        .insert_resource(CameraView::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let b = spawn_astronaut(&mut sim.world, Vec3::new(1.0, 0.0, 0.0));

    press(&mut sim, a);
    tick(&mut sim, 1);
    assert!(matches!(
        sim.world.get::<Astronaut>(b).unwrap().death,
        DeathSequence::FadingOut { .. }
    ));

    tick(&mut sim, 6);
    assert!(sim.world.get_entity(b).is_err());
    assert_eq!(tally(&sim).despawned, vec![b]);
}

#[test]
fn death_hides_and_shows_parts() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    let b = spawn_astronaut(&mut sim.world, Vec3::new(1.0, 0.0, 0.0));
    let parts = sim.world.get::<AstronautParts>(b).unwrap().clone();

    press(&mut sim, a);
    tick(&mut sim, 1);

    for hidden in parts.hide_on_die.iter() {
        assert!(!sim.world.get::<Visible>(*hidden).unwrap().0);
    }
    for shown in parts.show_on_die.iter() {
        assert!(sim.world.get::<Visible>(*shown).unwrap().0);
    }
}

#[test]
fn trigger_volumes_track_room_and_device() {
    let mut sim = make_sim();
    let room = spawn_room(
        &mut sim.world,
        "bridge",
        Vec3::ZERO,
        Vec3::new(4.0, 2.0, 4.0),
    );
    let console = spawn_device(
        &mut sim.world,
        DeviceKind::Console,
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::ONE,
        false,
    );
    let a = spawn_astronaut(&mut sim.world, Vec3::new(2.0, 0.0, 0.0));

    tick(&mut sim, 1);
    let inhabitant = sim.world.get::<RoomInhabitant>(a).unwrap();
    assert_eq!(inhabitant.room(), Some(room));
    assert_eq!(inhabitant.current_device(), Some(console));

    press(&mut sim, a);
    assert_eq!(
        sim.world.get::<InteractableDevice>(console).unwrap().interactions,
        1
    );

    sim.world.get_mut::<WorldTransform>(a).unwrap().position = Vec3::new(-2.0, 0.0, 0.0);
    tick(&mut sim, 1);
    let inhabitant = sim.world.get::<RoomInhabitant>(a).unwrap();
    assert_eq!(inhabitant.room(), Some(room));
    assert_eq!(inhabitant.current_device(), None);

    sim.world.get_mut::<WorldTransform>(a).unwrap().position = Vec3::new(20.0, 0.0, 0.0);
    tick(&mut sim, 1);
    assert_eq!(sim.world.get::<RoomInhabitant>(a).unwrap().room(), None);
}

#[test]
fn vent_switch_opens_airlock_and_vents_the_room() {
    let mut sim = make_sim();
    let bay = spawn_room(
        &mut sim.world,
        "cargo_bay",
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(3.0, 2.0, 3.0),
    );
    let airlock = spawn_airlock(&mut sim.world, bay);
    let switch = spawn_vent_switch(
        &mut sim.world,
        Vec3::new(10.0, 0.0, 2.0),
        Vec3::ONE,
        airlock,
    );
    let a = spawn_astronaut(&mut sim.world, Vec3::new(10.0, 0.0, 2.0));
    let b = spawn_astronaut(&mut sim.world, Vec3::new(10.0, 0.0, -2.0));
    let outside = spawn_astronaut(&mut sim.world, Vec3::new(0.0, 0.0, 0.0));

    tick(&mut sim, 1);
    assert!(!sim.world.get::<Airlock>(airlock).unwrap().is_open());
    assert_eq!(
        sim.world.get::<RoomInhabitant>(a).unwrap().current_device(),
        Some(switch)
    );

    press(&mut sim, a);
    assert_eq!(
        sim.world.get::<Lever>(switch).unwrap().state,
        LeverState::TurnedOn
    );
    assert!(sim.world.get::<Airlock>(airlock).unwrap().is_open());
    assert!(!sim.world.get::<Battery>(a).unwrap().has_charge());
    assert!(tally(&sim).whacks.is_empty(), "nobody within reach");

    let pivot = sim
        .world
        .get::<airlock::components::device::VentSwitch>(switch)
        .and_then(|vent| vent.handle_pivot)
        .unwrap();
    let rotation = sim.world.get::<WorldTransform>(pivot).unwrap().rotation;
    assert!(rotation.angle_between(Quat::from_rotation_y((-45.0f32).to_radians())) < EPSILON);

    tick(&mut sim, 1);
    assert!(sucked(&sim, a));
    assert!(sucked(&sim, b));
    assert!(!sucked(&sim, outside));
}

#[test]
fn escape_pod_launcher_starts_countdown() {
    let mut sim = make_sim();
    spawn_room(&mut sim.world, "bridge", Vec3::ZERO, Vec3::new(4.0, 2.0, 4.0));
    let launcher = spawn_device(
        &mut sim.world,
        DeviceKind::EscapePodLauncher,
        Vec3::new(-2.0, 0.0, -2.0),
        Vec3::ONE,
        false,
    );
    let a = spawn_astronaut(&mut sim.world, Vec3::new(-2.0, 0.0, -2.0));

    tick(&mut sim, 1);
    assert!(!sim.world.resource::<EscapePod>().is_launched());

    press(&mut sim, a);

    assert!(sim.world.resource::<EscapePod>().is_launched());
    assert_eq!(
        sim.world.get::<InteractableDevice>(launcher).unwrap().interactions,
        1
    );
    assert!(sim.world.get::<Battery>(a).unwrap().has_charge());
}

#[test]
fn thrust_moves_on_the_floor_plane_within_max_speed() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    sim.world
        .get_mut::<Astronaut>(a)
        .unwrap()
        .set_move_vector(Vec3::new(3.0, 1.0, 0.0));

    tick(&mut sim, 8);

    let astro = sim.world.get::<Astronaut>(a).unwrap();
    let tuning = astro.tuning;
    assert!(astro.move_vector().length() <= 1.0 + EPSILON);

    // 8 frames of 8 capped fixed steps, 0.004 of speed gained per step.
    let body = sim.world.get::<RigidBody>(a).unwrap();
    assert!(body.velocity.x > 0.2 && body.velocity.x < 0.3, "{:?}", body.velocity);
    assert!(body.velocity.length() <= tuning.max_speed + EPSILON);
    assert_eq!(body.velocity.y, 0.0);
    assert_eq!(body.max_speed, Some(tuning.max_speed));

    let transform = sim.world.get::<WorldTransform>(a).unwrap();
    assert!(transform.position.x > 0.1 && transform.position.x < 0.5);
    assert_eq!(transform.position.y, 0.0);
}

#[test]
fn full_thrust_settles_at_max_speed() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    sim.world
        .get_mut::<Astronaut>(a)
        .unwrap()
        .set_move_vector(Vec3::X);

    // 0.004 per step needs 250 steps to reach 1.0.
    tick(&mut sim, 40);

    let max_speed = sim.world.get::<Astronaut>(a).unwrap().tuning.max_speed;
    let speed = sim.world.get::<RigidBody>(a).unwrap().velocity.length();
    assert!((speed - max_speed).abs() < EPSILON, "speed {}", speed);
}

/// A tall room whose airlock is already open, watched by a huge camera.
fn vented_room(sim: &mut Simulation) -> Entity {
    let room = spawn_room(
        &mut sim.world,
        "vented",
        Vec3::ZERO,
        Vec3::new(10.0, 50.0, 10.0),
    );
    let airlock = spawn_airlock(&mut sim.world, room);
    sim.world
        .get_mut::<Airlock>(airlock)
        .unwrap()
        .set_airlock_state(AirlockState::Open);
    sim.world
        .insert_resource(CameraView::from_center(Vec3::ZERO, Vec3::splat(1000.0)));
    room
}

fn death(sim: &Simulation, astronaut: Entity) -> DeathSequence {
    sim.world.get::<Astronaut>(astronaut).unwrap().death
}

#[test]
fn vented_astronaut_dies_after_five_seconds_in_the_room() {
    let mut sim = make_sim();
    let room = vented_room(&mut sim);
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);

    tick(&mut sim, 1);
    assert!(sucked(&sim, a));
    assert_eq!(sim.world.get::<RoomInhabitant>(a).unwrap().room(), Some(room));
    assert_eq!(death(&sim, a), DeathSequence::Ejecting);

    // Exactly 5s on the death timer is not enough.
    tick(&mut sim, 19);
    assert!(!sim.world.get::<Astronaut>(a).unwrap().is_dead());
    assert!(tally(&sim).died.is_empty());
    assert_eq!(sim.world.get::<RoomInhabitant>(a).unwrap().room(), Some(room));

    tick(&mut sim, 1);
    assert!(sim.world.get::<Astronaut>(a).unwrap().is_dead());
    assert_eq!(tally(&sim).died, vec![a]);
}

#[test]
fn dead_astronaut_in_view_fades_after_ten_seconds() {
    let mut sim = make_sim();
    vented_room(&mut sim);
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);

    tick(&mut sim, 21);
    assert_eq!(death(&sim, a), DeathSequence::Dead);

    // Timer reaches exactly 10s at frame 40.
    tick(&mut sim, 19);
    assert_eq!(death(&sim, a), DeathSequence::Dead);
    assert!(tally(&sim).despawned.is_empty());

    tick(&mut sim, 1);
    assert!(matches!(death(&sim, a), DeathSequence::FadingOut { .. }));

    tick(&mut sim, 6);
    assert!(sim.world.get_entity(a).is_err());
    assert_eq!(tally(&sim).died, vec![a]);
    assert_eq!(tally(&sim).despawned, vec![a]);
}

#[test]
fn ejected_body_touching_the_hull_is_lifted_free() {
    let mut sim = make_sim();
    vented_room(&mut sim);
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    sim.world
        .get_mut::<Astronaut>(a)
        .unwrap()
        .set_move_vector(Vec3::X);

    tick(&mut sim, 2);

    let body = sim.world.get::<RigidBody>(a).unwrap();
    assert!(body.in_contact);
    assert_eq!(body.constraints, Constraints::free());
    assert!(body.forces[EJECT_LIFT_FORCE].enabled);
    assert!(!body.forces[THRUST_FORCE].enabled);
    assert_eq!(body.max_speed, None);
    assert!(body.velocity.y > 0.0);
    assert!(sim.world.get::<WorldTransform>(a).unwrap().position.y > 0.0);
}

#[test]
fn ejected_body_off_the_hull_drifts_unclamped() {
    let mut sim = make_sim();
    let a = spawn_astronaut(&mut sim.world, Vec3::ZERO);
    sim.world
        .get_mut::<RoomInhabitant>(a)
        .unwrap()
        .notify_sucked_into_space();
    {
        let mut body = sim.world.get_mut::<RigidBody>(a).unwrap();
        body.add_force(EJECT_LIFT_FORCE, Vec3::Y);
        body.velocity = Vec3::new(5.0, 0.0, 0.0);
    }

    tick(&mut sim, 1);

    let max_speed = sim.world.get::<Astronaut>(a).unwrap().tuning.max_speed;
    let body = sim.world.get::<RigidBody>(a).unwrap();
    assert!(!body.in_contact);
    assert!(!body.forces[EJECT_LIFT_FORCE].enabled);
    assert_eq!(body.max_speed, None);
    assert!((body.velocity.x - 5.0).abs() < EPSILON);
    assert!(body.velocity.x > max_speed);
}
