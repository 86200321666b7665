//! Ship-wide collaborators read by the win/lose evaluator.
//!
//! - [`ShipHealth`] – hull points; the crew loses when they reach zero
//! - [`EscapePod`] – optional; the crew wins once it has run long enough

use bevy_ecs::prelude::Resource;
use log::info;

pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

/// Hull integrity of the ship.
///
/// Decay is only applied while a game is running; the stage controller calls
/// [`ShipHealth::on_started_game`] and [`ShipHealth::on_completed_game`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ShipHealth {
    health: f32,
    max_health: f32,
    tracking: bool,
}

impl Default for ShipHealth {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH)
    }
}

impl ShipHealth {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            tracking: false,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    /// Remaining hull as a fraction of the maximum, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    pub fn is_ship_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Whether hull decay is currently being applied.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn apply_damage(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let was_alive = self.is_ship_alive();
        self.health = (self.health - amount).max(0.0);
        if was_alive && !self.is_ship_alive() {
            info!("Ship hull breached");
        }
    }

    pub fn on_started_game(&mut self) {
        self.health = self.max_health;
        self.tracking = true;
    }

    /// Stop applying decay. Health is kept for the result screens.
    pub fn on_completed_game(&mut self) {
        self.tracking = false;
    }
}

/// Escape pod. Launching it starts a timer; the crew has escaped once the
/// timer reaches `escape_duration`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EscapePod {
    pub escape_duration: f32,
    elapsed: Option<f32>,
}

impl EscapePod {
    pub fn new(escape_duration: f32) -> Self {
        Self {
            escape_duration,
            elapsed: None,
        }
    }

    /// Start the escape timer. Launching twice keeps the first timer.
    pub fn launch(&mut self) -> bool {
        if self.elapsed.is_some() {
            return false;
        }
        info!("Escape pod launched ({:.1}s to escape)", self.escape_duration);
        self.elapsed = Some(0.0);
        true
    }

    pub fn is_launched(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn elapsed(&self) -> Option<f32> {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(elapsed) = self.elapsed.as_mut() {
            *elapsed += dt;
        }
    }

    pub fn has_escape_duration_elapsed(&self) -> bool {
        self.elapsed
            .map(|elapsed| elapsed >= self.escape_duration)
            .unwrap_or(false)
    }

    /// Back on the launch pad, as at the start of a game.
    pub fn reset(&mut self) {
        self.elapsed = None;
    }
}
