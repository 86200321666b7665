//! Autonomous input for astronauts nobody is controlling.
//!
//! The headless runner has no input devices, so it attaches a [`BotPilot`] to
//! each astronaut. [`crate::systems::bot::bot_pilot_system`] turns it into
//! movement intent and interaction presses, the same data a gamepad layer
//! would feed in.

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BotPilot {
    /// Current wander direction, applied as movement intent.
    pub heading: Vec3,
    /// Seconds until a new heading is picked.
    pub retarget_timer: f32,
    /// Seconds between heading changes.
    pub retarget_interval: f32,
    /// Probability of pressing interact, per second.
    pub press_rate: f32,
    /// Point the bot drifts back to once it strays further than `leash`.
    pub home: Vec3,
    pub leash: f32,
}

impl Default for BotPilot {
    fn default() -> Self {
        Self::new(1.5, 0.5, Vec3::ZERO, f32::INFINITY)
    }
}

impl BotPilot {
    pub fn new(retarget_interval: f32, press_rate: f32, home: Vec3, leash: f32) -> Self {
        Self {
            heading: Vec3::ZERO,
            retarget_timer: 0.0,
            retarget_interval: retarget_interval.max(0.0),
            press_rate: press_rate.max(0.0),
            home,
            leash: leash.max(0.0),
        }
    }
}
