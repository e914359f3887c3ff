//! Headless orefall runner.
//!
//! Wires the simulation engine to a fixed-rate game loop thread and drives
//! it with a scripted player.

pub mod autoplay;
pub mod game_loop;
pub mod options;
pub mod state;

pub use orefall_core as core;
