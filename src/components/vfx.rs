use bevy_ecs::prelude::Component;

/// Short-lived visual effects spawned by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Swing burst in front of an attacking astronaut.
    Attack,
    /// Teleport shimmer where an astronaut appeared.
    Spawn,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualEffect {
    pub kind: EffectKind,
}
