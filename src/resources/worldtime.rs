use bevy_ecs::prelude::Resource;

/// Default fixed physics step, in seconds.
pub const DEFAULT_FIXED_DELTA: f32 = 0.02;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    /// Scaled delta of the current variable-rate tick.
    pub delta: f32,
    pub time_scale: f32,
    /// Step used by the fixed-rate physics schedule.
    pub fixed_delta: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            fixed_delta: DEFAULT_FIXED_DELTA,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }
}
