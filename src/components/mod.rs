//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulated ship. Components hold data; the behaviour lives in
//! [`crate::systems`] and the observers in [`crate::events`].
//!
//! Submodules overview:
//! - [`astronaut`] – per-character state, animator feed and part references
//! - [`battery`] – depletable charge gating ejection whacks
//! - [`botpilot`] – autonomous movement/press input for the headless runner
//! - [`device`] – interactable devices: lever, vent switch, airlock, pod launcher
//! - [`rigidbody`] – kinematic body with named forces and constraints
//! - [`room`] – rooms, trigger volumes and per-entity trigger contacts
//! - [`roominhabitant`] – current room/device and the ejection flag
//! - [`screen`] – stage UI markers and the ship explosion
//! - [`transform`] – world-space position, rotation and scale
//! - [`ttl`] – time-to-live for short-lived effects
//! - [`vfx`] – visual effect markers
//! - [`visibility`] – draw/hide flag for the renderer

pub mod astronaut;
pub mod battery;
pub mod botpilot;
pub mod device;
pub mod rigidbody;
pub mod room;
pub mod roominhabitant;
pub mod screen;
pub mod transform;
pub mod ttl;
pub mod vfx;
pub mod visibility;
