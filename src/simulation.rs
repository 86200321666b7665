//! The simulation context: an owned world plus its two schedules.
//!
//! [`Simulation::advance`] is the frame loop body. It updates
//! [`WorldTime`], runs the fixed-rate physics schedule as many times as the
//! accumulated time allows (capped per frame), then runs the variable-rate
//! update schedule once.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::game;
use crate::resources::audio::AudioBridge;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStage, GameState, QuitRequested};
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::astronaut::{astronaut_update, death_fade_system};
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_audio_cmds, update_audio_messages,
};
use crate::systems::bot::bot_pilot_system;
use crate::systems::devices::{airlock_vent_system, vent_switch_init_system};
use crate::systems::gamestate::{check_pending_stage, evaluate_win_lose, stage_is_game};
use crate::systems::movement::movement_step;
use crate::systems::physics::{astronaut_physics_step, hull_contact_system};
use crate::systems::ship::{escape_pod_system, ship_decay_system};
use crate::systems::time::update_world_time;
use crate::systems::trigger::trigger_volume_system;
use crate::systems::ttl::ttl_system;

/// Fixed steps run per frame at most; the rest of a long frame is dropped.
pub const MAX_FIXED_STEPS_PER_FRAME: u32 = 8;

/// Fixed-rate schedule: contacts, astronaut forces, integration.
pub fn build_fixed_schedule() -> Schedule {
    let mut fixed = Schedule::default();
    fixed.add_systems((hull_contact_system, astronaut_physics_step, movement_step).chain());
    fixed
}

/// Variable-rate schedule, run once per frame.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            bot_pilot_system,
            trigger_volume_system,
            vent_switch_init_system,
            airlock_vent_system,
            astronaut_update,
            death_fade_system,
            ttl_system,
            ship_decay_system.run_if(stage_is_game),
            escape_pod_system.run_if(stage_is_game),
            evaluate_win_lose.run_if(stage_is_game),
            check_pending_stage,
        )
            .chain(),
    );
    update.add_systems(
        // audio systems must be together, after anything that plays sounds
        (
            update_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_audio_messages,
        )
            .chain()
            .after(check_pending_stage),
    );
    update
}

pub struct Simulation {
    pub world: World,
    update: Schedule,
    fixed_update: Schedule,
    accumulator: f32,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SimRng::default())
    }

    pub fn with_rng(config: GameConfig, rng: SimRng) -> Self {
        let mut world = World::new();
        game::init_world(&mut world, config, rng);
        Self {
            world,
            update: build_update_schedule(),
            fixed_update: build_fixed_schedule(),
            accumulator: 0.0,
        }
    }

    /// Enter the configured initial stage.
    pub fn setup(&mut self) {
        game::setup(&mut self.world);
    }

    /// Start the audio backend thread. Without it audio commands are dropped.
    pub fn start_audio(&mut self) {
        if self.world.contains_resource::<AudioBridge>() {
            return;
        }
        self.world.insert_resource(AudioBridge::spawn());
    }

    /// Advance the simulation by `dt` unscaled seconds.
    pub fn advance(&mut self, dt: f32) {
        let scaled_dt = update_world_time(&mut self.world, dt.max(0.0));
        let fixed_delta = self.world.resource::<WorldTime>().fixed_delta;

        self.accumulator += scaled_dt;
        let mut steps = 0;
        while self.accumulator >= fixed_delta && steps < MAX_FIXED_STEPS_PER_FRAME {
            self.fixed_update.run(&mut self.world);
            self.accumulator -= fixed_delta;
            steps += 1;
        }
        if self.accumulator >= fixed_delta {
            warn!(
                "Dropping {:.3}s of physics after {} fixed steps",
                self.accumulator, steps
            );
            self.accumulator %= fixed_delta;
        }

        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn stage(&self) -> GameStage {
        self.world.resource::<GameState>().get()
    }

    pub fn quit_requested(&self) -> bool {
        self.world.resource::<QuitRequested>().0
    }

    /// Stop the audio backend, if it was started.
    pub fn shutdown(&mut self) {
        debug!("Shutting down simulation");
        if let Some(bridge) = self.world.remove_resource::<AudioBridge>() {
            let unread = bridge.shutdown();
            debug!("Audio stopped with {} unread replies", unread.len());
        }
    }
}
