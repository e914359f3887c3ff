//! Read-only view of the simulation, built after each tick for display.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub paused: bool,
    pub run_timer: f32,
    pub run_duration: f32,
    pub credits: u64,
    pub level: u32,
    pub asteroids: Vec<AsteroidView>,
    pub minerals: Vec<MineralView>,
    pub skills: Vec<SkillView>,
    pub overcharge_remaining: f32,
    pub combo: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub id: u64,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub health_fraction: f32,
    pub resource_tier: u8,
    pub burning: bool,
    /// Seconds since the last mining hit, for hit flash.
    pub since_hit: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineralView {
    pub id: u64,
    pub position: Vec2,
    pub resource_tier: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillView {
    pub unlocked: bool,
    pub cooldown_remaining: f32,
    pub cooldown_fraction: f32,
}
