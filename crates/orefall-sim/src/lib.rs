//! Simulation engine for orefall.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces `SimSnapshot`s for whatever is presenting the game.

pub mod engine;
pub mod queue;
pub mod rng;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use orefall_core as core;

#[cfg(test)]
mod tests;
