//! Rooms and the axis-aligned trigger volumes that detect who is inside.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use smallvec::SmallVec;

/// A bounded interior area of the ship. Needs a [`TriggerVolume`] to be
/// entered.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
}

/// Box centred on the entity's [`WorldTransform`](super::transform::WorldTransform)
/// position. Rooms and devices both carry one.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TriggerVolume {
    pub half_extents: Vec3,
}

impl TriggerVolume {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents: half_extents.abs(),
        }
    }

    /// Inclusive containment test for a volume centred at `center`.
    pub fn contains(&self, center: Vec3, point: Vec3) -> bool {
        let d = (point - center).abs();
        d.cmple(self.half_extents).all()
    }
}

/// Volumes an entity was inside of at the end of the last trigger pass.
#[derive(Component, Debug, Clone, Default)]
pub struct TriggerContacts {
    pub volumes: SmallVec<[Entity; 4]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_contains_its_faces() {
        let volume = TriggerVolume::new(Vec3::new(2.0, 1.0, -2.0));
        let center = Vec3::new(10.0, 0.0, 0.0);
        assert!(volume.contains(center, Vec3::new(12.0, 1.0, -2.0)));
        assert!(volume.contains(center, center));
        assert!(!volume.contains(center, Vec3::new(7.9, 0.0, 0.0)));
    }
}
