//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores linear and angular velocity plus named
//! acceleration forces. Each force can be individually enabled/disabled, so
//! gameplay can toggle thrust or the ejection lift independently.
//!
//! [`Constraints`] restrict what the integrator may change. Astronauts walk on
//! the deck with vertical motion and rotation frozen; once ejected the
//! constraints are relaxed and the body drifts freely.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec3,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Degrees of freedom locked by the integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraints {
    pub freeze_position_y: bool,
    pub freeze_rotation: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self::locked()
    }
}

impl Constraints {
    /// Walking on the deck: no vertical motion, no tumbling.
    pub fn locked() -> Self {
        Self {
            freeze_position_y: true,
            freeze_rotation: true,
        }
    }

    pub fn free() -> Self {
        Self {
            freeze_position_y: false,
            freeze_rotation: false,
        }
    }
}

/// Kinematic body storing velocity and multiple named acceleration forces.
///
/// Updated by gameplay/physics systems and consumed by
/// [`movement_step`](crate::systems::movement::movement_step) to update
/// [`WorldTransform`](super::transform::WorldTransform).
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Angular velocity as a scaled axis, radians per second.
    pub angular_velocity: Vec3,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    pub constraints: Constraints,
    /// Touching level geometry this step. Written by the contact system.
    pub in_contact: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest, with no forces and locked constraints.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            forces: FxHashMap::default(),
            max_speed: None,
            constraints: Constraints::locked(),
            in_contact: false,
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .fold(Vec3::ZERO, |total, force| total + force.value)
    }

    /// Instant change of velocity, ignoring mass.
    pub fn add_velocity_change(&mut self, delta: Vec3) {
        self.velocity += delta;
    }

    /// Instant change of angular velocity, ignoring inertia.
    pub fn add_angular_velocity_change(&mut self, delta: Vec3) {
        self.angular_velocity += delta;
    }

    /// Let the body move vertically and tumble.
    pub fn relax_constraints(&mut self) {
        self.constraints = Constraints::free();
    }

    /// Clamp velocity to `max_speed`, if set.
    pub fn clamp_speed(&mut self) {
        if let Some(max_speed) = self.max_speed {
            self.velocity = self.velocity.clamp_length_max(max_speed.max(0.0));
        }
    }
}
