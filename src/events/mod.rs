//! Event types and observers.
//!
//! This module groups the domain events exchanged across systems and the
//! observers that react to them. Events let the host (input layer, physics,
//! UI) talk to the simulation without reaching into its components.
//!
//! Submodules:
//! - [`astronaut`] – deaths, despawns, attacks and whacks
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – stage transition request and hook notifications
//! - [`interaction`] – interaction presses, device activation, lever changes
//! - [`menu`] – main menu buttons and difficulty selection
//! - [`trigger`] – room/device trigger volume crossings
pub mod astronaut;
pub mod audio;
pub mod gamestate;
pub mod interaction;
pub mod menu;
pub mod trigger;
