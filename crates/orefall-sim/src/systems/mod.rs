//! Per-tick systems.
//!
//! Systems are plain functions over the world and the records they need.
//! Structural changes go through the `MutationQueue`; component values are
//! written in place.

pub mod cleanup;
pub mod combat;
pub mod cooldown;
pub mod dot;
pub mod minerals;
pub mod mining;
pub mod movement;
pub mod run_clock;
pub mod skills;
pub mod snapshot;
pub mod spawner;
