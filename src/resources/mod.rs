//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the simulation world.
//! Each submodule documents the semantics and intended usage of its
//! resource(s).
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `camera` – camera controller stack and the visible world region
//! - `difficulty` – difficulty presets and the active settings
//! - `gameconfig` – INI-backed configuration with safe defaults
//! - `gamestate` – authoritative and pending game stage, quit flag
//! - `ship` – hull health and the escape pod
//! - `simrng` – seedable random source
//! - `soundbanks` – sound cue to audio id lookup
//! - `spawncounter` – astronaut registration order
//! - `stagescreens` – UI entities owned by the stage controller
//! - `worldtime` – simulation time, delta and fixed step
pub mod audio;
pub mod camera;
pub mod difficulty;
pub mod gameconfig;
pub mod gamestate;
pub mod ship;
pub mod simrng;
pub mod soundbanks;
pub mod spawncounter;
pub mod stagescreens;
pub mod worldtime;
