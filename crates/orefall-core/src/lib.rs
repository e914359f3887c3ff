//! Core types and definitions for orefall.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, shared records, input, commands, events, snapshot views
//! and constants. It has no dependency on the ECS or any I/O.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod records;
pub mod state;
pub mod types;
