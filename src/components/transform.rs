use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// World-space pose of an entity. Read by the renderer, written by movement.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl WorldTransform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Facing direction, -Z rotated by `rotation`.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}
