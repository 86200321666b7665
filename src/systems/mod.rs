//! Simulation systems.
//!
//! This module groups all ECS systems that advance the simulation. Observers
//! for discrete events live next to their events in [`crate::events`].
//!
//! Submodules overview
//! - [`astronaut`] – per-frame astronaut agent and the death fade
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`bot`] – autonomous input for headless sessions
//! - [`devices`] – vent switches, airlocks and venting rooms
//! - [`gamestate`] – pending stage transitions and the win/lose evaluator
//! - [`movement`] – fixed-step integration of rigid bodies
//! - [`physics`] – astronaut thrust, speed clamp, ejection lift and hull contact
//! - [`ship`] – hull decay and the escape pod countdown
//! - [`time`] – update simulation time and delta
//! - [`trigger`] – headless trigger volume crossings
//! - [`ttl`] – despawn entities whose time-to-live ran out

pub mod astronaut;
pub mod audio;
pub mod bot;
pub mod devices;
pub mod gamestate;
pub mod movement;
pub mod physics;
pub mod ship;
pub mod time;
pub mod trigger;
pub mod ttl;
