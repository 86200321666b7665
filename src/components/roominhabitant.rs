//! Which room and device an entity is currently inside of.
//!
//! Trigger volumes report crossings through
//! [`TriggerCrossed`](crate::events::trigger::TriggerCrossed); the observer
//! forwards them here. Entering always wins, exiting only clears the slot if
//! it still points at the volume being left, so overlapping volumes hand over
//! cleanly whatever order the crossings arrive in.

use bevy_ecs::prelude::{Component, Entity};
use log::debug;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomInhabitant {
    room: Option<Entity>,
    device: Option<Entity>,
    sucked_into_space: bool,
}

impl RoomInhabitant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room(&self) -> Option<Entity> {
        self.room
    }

    pub fn current_device(&self) -> Option<Entity> {
        self.device
    }

    pub fn is_being_sucked_into_space(&self) -> bool {
        self.sucked_into_space
    }

    pub fn on_room_entered(&mut self, room: Entity) {
        self.room = Some(room);
    }

    pub fn on_room_exited(&mut self, room: Entity) {
        if self.room == Some(room) {
            self.room = None;
        }
    }

    pub fn on_interaction_entered(&mut self, device: Entity) {
        self.device = Some(device);
    }

    pub fn on_interaction_exited(&mut self, device: Entity) {
        if self.device == Some(device) {
            self.device = None;
        }
    }

    /// Start the ejection. There is no way back.
    pub fn notify_sucked_into_space(&mut self) {
        if !self.sucked_into_space {
            debug!("Inhabitant is being sucked into space");
        }
        self.sucked_into_space = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_is_last_writer_wins() {
        let mut world = bevy_ecs::world::World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut inhabitant = RoomInhabitant::new();
        inhabitant.on_room_entered(a);
        inhabitant.on_room_entered(b);
        assert_eq!(inhabitant.room(), Some(b));
    }

    #[test]
    fn exiting_a_stale_room_keeps_the_current_one() {
        let mut world = bevy_ecs::world::World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut inhabitant = RoomInhabitant::new();
        inhabitant.on_room_entered(a);
        inhabitant.on_room_entered(b);
        inhabitant.on_room_exited(a);
        assert_eq!(inhabitant.room(), Some(b));
        inhabitant.on_room_exited(b);
        assert_eq!(inhabitant.room(), None);
    }

    #[test]
    fn device_slot_follows_the_same_rules() {
        let mut world = bevy_ecs::world::World::new();
        let lever = world.spawn_empty().id();
        let console = world.spawn_empty().id();

        let mut inhabitant = RoomInhabitant::new();
        inhabitant.on_interaction_entered(lever);
        inhabitant.on_interaction_exited(console);
        assert_eq!(inhabitant.current_device(), Some(lever));
        inhabitant.on_interaction_exited(lever);
        assert_eq!(inhabitant.current_device(), None);
    }

    #[test]
    fn sucked_into_space_never_reverts() {
        let mut world = bevy_ecs::world::World::new();
        let room = world.spawn_empty().id();

        let mut inhabitant = RoomInhabitant::new();
        inhabitant.notify_sucked_into_space();
        inhabitant.notify_sucked_into_space();
        inhabitant.on_room_entered(room);
        inhabitant.on_room_exited(room);
        assert!(inhabitant.is_being_sucked_into_space());
    }
}
