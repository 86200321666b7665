//! Registration order for astronauts.
//!
//! Whack targeting breaks distance ties by who was registered first, so every
//! astronaut gets a [`SpawnOrder`] from this counter when spawned.

use bevy_ecs::prelude::Resource;

use crate::components::astronaut::SpawnOrder;

#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnCounter {
    next: u64,
}

impl SpawnCounter {
    pub fn next(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next);
        self.next += 1;
        order
    }

    /// Number of astronauts registered so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
