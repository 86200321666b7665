//! Astronaut character components.
//!
//! An astronaut entity carries:
//! - [`Astronaut`] – movement intent, timers, tuning and the death sequence
//! - [`AnimatorFeed`] – parameters handed to the external animation system
//! - [`AstronautParts`] – child objects whose visibility the agent toggles
//! - [`SpawnOrder`] – registration order, used to break whack ties
//! - [`HeadVariant`] – which head model was picked at spawn
//!
//! The per-tick behaviour lives in [`crate::systems::astronaut`], the fixed
//! step in [`crate::systems::physics`] and the interaction press in
//! [`crate::events::interaction`].

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use smallvec::SmallVec;

/// Planar distance within which a press whacks another astronaut.
pub const WHACK_RADIUS: f32 = 2.5;
/// Velocity change applied to a whacked astronaut, away from the attacker.
pub const WHACK_KNOCKBACK: f32 = 10.0;
/// Stun applied to a whacked astronaut, in seconds.
pub const WHACK_STUN_SECONDS: f32 = 5.0;
/// An ejected astronaut still inside the ship dies after this long.
pub const EJECTION_DEATH_SECONDS: f32 = 5.0;
/// A dead astronaut still in view is removed after this long.
pub const EJECTION_DESPAWN_SECONDS: f32 = 10.0;
/// Upward velocity change applied on death.
pub const EJECTION_LAUNCH_SPEED: f32 = 5.0;
/// Magnitude of the random angular velocity change applied on death.
pub const EJECTION_TUMBLE: f32 = 1.0;
/// Length of the shrink-and-remove fade.
pub const FADE_OUT_SECONDS: f32 = 1.0;
/// Lifetime of the attack effect.
pub const ATTACK_FX_SECONDS: f32 = 3.0;
/// Lifetime of the spawn effect.
pub const SPAWN_FX_SECONDS: f32 = 10.0;

/// Squared speed / intent below which an astronaut counts as standing still.
pub const MOVING_THRESHOLD_SQ: f32 = 0.01;

/// Idle animation states, in blend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AstronautIdle {
    #[default]
    Idle = 0,
    Move,
    Stunned,
    Panic,
}

impl AstronautIdle {
    /// Target value for the animator's idle blend parameter.
    pub fn blend_target(self) -> f32 {
        self as u8 as f32
    }
}

/// One-shot emotes played on the upper body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstronautEmote {
    Attack = 0,
    HitReact,
}

/// Where an astronaut is on its way out of the ship.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DeathSequence {
    #[default]
    Alive,
    /// Being sucked out; the hide/show swap has been done.
    Ejecting,
    /// Launch impulse applied and death announced.
    Dead,
    /// Shrinking toward zero before removal.
    FadingOut { elapsed: f32, start_scale: Vec3 },
}

/// Per-astronaut tuning, usually copied from the game config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AstronautTuning {
    /// Thrust at full intent, applied per fixed step (scaled by the step).
    pub acceleration: f32,
    pub max_speed: f32,
    /// Seconds between accepted interaction presses.
    pub attack_cooldown: f32,
    /// Whether a press also tries to whack a nearby astronaut.
    pub can_stun: bool,
    /// Upward acceleration that helps an ejected body clear the hull.
    pub eject_lift: f32,
}

impl Default for AstronautTuning {
    fn default() -> Self {
        Self {
            acceleration: 10.0,
            max_speed: 1.0,
            attack_cooldown: 1.0,
            can_stun: true,
            eject_lift: 0.2,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Astronaut {
    move_vector: Vec3,
    /// Smoothed banking angle of the visual root, in degrees.
    pub roll_degrees: f32,
    pub idle_blend: f32,
    pub idle_state: AstronautIdle,
    pub stun_timer: f32,
    pub attack_cooldown_timer: f32,
    pub death_timer: f32,
    pub death: DeathSequence,
    pub tuning: AstronautTuning,
}

impl Default for Astronaut {
    fn default() -> Self {
        Self::new(AstronautTuning::default())
    }
}

impl Astronaut {
    pub fn new(tuning: AstronautTuning) -> Self {
        Self {
            move_vector: Vec3::ZERO,
            roll_degrees: 0.0,
            idle_blend: 0.0,
            idle_state: AstronautIdle::Idle,
            stun_timer: 0.0,
            attack_cooldown_timer: 0.0,
            death_timer: 0.0,
            death: DeathSequence::Alive,
            tuning,
        }
    }

    /// Latest movement intent, never longer than 1.
    pub fn move_vector(&self) -> Vec3 {
        self.move_vector
    }

    /// Store a movement intent, clamped to unit length.
    pub fn set_move_vector(&mut self, value: Vec3) {
        self.move_vector = value.clamp_length_max(1.0);
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    /// True once the launch impulse has been applied, for good.
    pub fn is_dead(&self) -> bool {
        matches!(
            self.death,
            DeathSequence::Dead | DeathSequence::FadingOut { .. }
        )
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self.death, DeathSequence::FadingOut { .. })
    }

    /// Whether an interaction press would be accepted right now.
    pub fn can_interact(&self, ejected: bool) -> bool {
        self.attack_cooldown_timer <= 0.0 && !ejected && !self.is_stunned()
    }

    pub fn stun(&mut self, seconds: f32) {
        self.stun_timer = seconds;
    }

    /// Classify the idle animation state. Panic wins over stun, stun over
    /// movement.
    pub fn classify_idle(&self, ejected: bool) -> AstronautIdle {
        if ejected {
            AstronautIdle::Panic
        } else if self.is_stunned() {
            AstronautIdle::Stunned
        } else if self.move_vector.length_squared() > MOVING_THRESHOLD_SQ {
            AstronautIdle::Move
        } else {
            AstronautIdle::Idle
        }
    }
}

/// Parameters read by the external animator.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimatorFeed {
    /// Blended idle state, between 0 (idle) and 3 (panic).
    pub idle_state: f32,
    /// Last emote started.
    pub emote: Option<AstronautEmote>,
    /// Incremented each time an emote is (re)started from its first frame.
    pub emote_plays: u32,
}

impl AnimatorFeed {
    pub fn play_emote(&mut self, emote: AstronautEmote) {
        self.emote = Some(emote);
        self.emote_plays += 1;
    }
}

/// Child objects of an astronaut whose visibility the agent drives.
#[derive(Component, Debug, Clone, Default)]
pub struct AstronautParts {
    /// Hidden once the astronaut starts being ejected (helmet light, tool...).
    pub hide_on_die: SmallVec<[Entity; 4]>,
    /// Shown once the astronaut starts being ejected (panic face...).
    pub show_on_die: SmallVec<[Entity; 4]>,
    /// Visible while stunned.
    pub stun_fx: Option<Entity>,
    /// Visible while the attack is cooling down.
    pub exclamation: Option<Entity>,
    pub head: Option<Entity>,
}

impl AstronautParts {
    /// Every part entity, for cleanup when the astronaut is removed.
    pub fn all(&self) -> impl Iterator<Item = Entity> + '_ {
        self.hide_on_die
            .iter()
            .chain(self.show_on_die.iter())
            .copied()
            .chain(self.stun_fx)
            .chain(self.exclamation)
            .chain(self.head)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadVariant(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_vector_is_clamped_to_unit_length() {
        let mut astro = Astronaut::default();
        astro.set_move_vector(Vec3::new(10.0, 0.0, 10.0));
        let v = astro.move_vector();
        assert!((v.length() - 1.0).abs() < 1e-5);
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!((v - expected).length() < 1e-5);
    }

    #[test]
    fn short_move_vector_is_kept() {
        let mut astro = Astronaut::default();
        astro.set_move_vector(Vec3::new(0.3, 0.0, -0.4));
        assert_eq!(astro.move_vector(), Vec3::new(0.3, 0.0, -0.4));
    }

    #[test]
    fn idle_classification_priority() {
        let mut astro = Astronaut::default();
        assert_eq!(astro.classify_idle(false), AstronautIdle::Idle);
        astro.set_move_vector(Vec3::X);
        assert_eq!(astro.classify_idle(false), AstronautIdle::Move);
        astro.stun(1.0);
        assert_eq!(astro.classify_idle(false), AstronautIdle::Stunned);
        assert_eq!(astro.classify_idle(true), AstronautIdle::Panic);
    }

    #[test]
    fn tiny_intent_counts_as_idle() {
        let mut astro = Astronaut::default();
        astro.set_move_vector(Vec3::new(0.05, 0.0, 0.05));
        assert_eq!(astro.classify_idle(false), AstronautIdle::Idle);
    }

    #[test]
    fn interaction_gating() {
        let mut astro = Astronaut::default();
        assert!(astro.can_interact(false));
        assert!(!astro.can_interact(true));
        astro.attack_cooldown_timer = 0.5;
        assert!(!astro.can_interact(false));
        astro.attack_cooldown_timer = 0.0;
        astro.stun(2.0);
        assert!(!astro.can_interact(false));
    }

    #[test]
    fn dead_covers_fading_out() {
        let mut astro = Astronaut::default();
        assert!(!astro.is_dead());
        astro.death = DeathSequence::Ejecting;
        assert!(!astro.is_dead());
        astro.death = DeathSequence::Dead;
        assert!(astro.is_dead());
        astro.death = DeathSequence::FadingOut {
            elapsed: 0.0,
            start_scale: Vec3::ONE,
        };
        assert!(astro.is_dead());
        assert!(astro.is_fading_out());
    }

    #[test]
    fn idle_blend_targets_follow_enum_order() {
        assert_eq!(AstronautIdle::Idle.blend_target(), 0.0);
        assert_eq!(AstronautIdle::Move.blend_target(), 1.0);
        assert_eq!(AstronautIdle::Stunned.blend_target(), 2.0);
        assert_eq!(AstronautIdle::Panic.blend_target(), 3.0);
    }
}
