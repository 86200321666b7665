//! Airlock library.
//!
//! Headless simulation of a small arcade game: astronauts run around a
//! spaceship, whack each other, pull levers that open airlocks, and get
//! ejected into space while the ship's stage flow decides whether the crew
//! escaped or went down with it.
//!
//! The crate exposes its ECS components, resources, systems, and events so a
//! host (renderer, audio device, input layer) or an integration test can drive
//! the world directly. [`simulation::Simulation`] bundles the world with its
//! schedules for callers that only want to advance time.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod simulation;
pub mod systems;
