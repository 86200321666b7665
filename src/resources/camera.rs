//! Camera controller stack and the visible region of the main camera.
//!
//! The renderer owns the actual cameras. The simulation only decides which
//! controller is active (the top of [`CameraStack`]) and needs to know whether
//! a point is still on screen, which [`CameraView`] answers.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use glam::Vec3;
use log::{debug, warn};

/// Deepest the controller stack is allowed to grow.
pub const MAX_CAMERA_CONTROLLERS: usize = 8;

/// Camera behaviours the game pushes onto the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraController {
    /// Slow orbit around the ship behind the main menu.
    Menu,
    /// Follows the crew during a game.
    Game,
}

/// Stack of camera controllers; the top one drives the main camera.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraStack {
    controllers: ArrayVec<CameraController, MAX_CAMERA_CONTROLLERS>,
}

impl CameraStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a controller on top. Returns false when the stack is full.
    pub fn push(&mut self, controller: CameraController) -> bool {
        if self.controllers.try_push(controller).is_err() {
            warn!("Camera stack full, dropping {:?}", controller);
            return false;
        }
        debug!("Camera controller pushed: {:?}", controller);
        true
    }

    /// Remove the top-most occurrence of `controller`, wherever it sits.
    pub fn pop(&mut self, controller: CameraController) -> bool {
        let Some(index) = self.controllers.iter().rposition(|c| *c == controller) else {
            debug!("Camera controller {:?} not on the stack", controller);
            return false;
        };
        self.controllers.remove(index);
        debug!("Camera controller popped: {:?}", controller);
        true
    }

    pub fn active(&self) -> Option<CameraController> {
        self.controllers.last().copied()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// World-space box the main camera currently sees.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub min: Vec3,
    pub max: Vec3,
}

impl CameraView {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self::new(center - half, center + half)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
