//! Shared random source for gameplay randomness (death tumble, head variants).
//!
//! Seed it to make a session reproducible.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use glam::Vec3;

#[derive(Resource, Debug)]
pub struct SimRng(pub Rng);

impl Default for SimRng {
    fn default() -> Self {
        SimRng(Rng::new())
    }
}

impl SimRng {
    pub fn with_seed(seed: u64) -> Self {
        SimRng(Rng::with_seed(seed))
    }

    /// Uniformly distributed direction on the unit sphere.
    pub fn on_unit_sphere(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(
                self.0.f32() * 2.0 - 1.0,
                self.0.f32() * 2.0 - 1.0,
                self.0.f32() * 2.0 - 1.0,
            );
            let len_sq = v.length_squared();
            if len_sq > 1e-4 && len_sq <= 1.0 {
                return v / len_sq.sqrt();
            }
        }
    }

    /// Index in `0..len`, or 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0.usize(..len)
    }
}
