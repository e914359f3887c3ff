//! Notifications emitted by the simulation for rendering and audio.
//!
//! Buffers are append-only during a tick. The consumer drains them after
//! each tick; nothing in the core ever reads them back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CHAIN_EVENT_POSITIONS;
use crate::enums::{DamageCategory, SkillSlot};
use crate::types::Rgba;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub position: Vec2,
    pub amount: f32,
    pub category: DamageCategory,
    pub color: Rgba,
}

impl DamageEvent {
    pub fn new(position: Vec2, amount: f32, category: DamageCategory) -> Self {
        Self {
            position,
            amount,
            category,
            color: category.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructionEvent {
    pub position: Vec2,
    pub scale: f32,
    pub resource_tier: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEvent {
    pub skill: SkillSlot,
    pub origin: Vec2,
    pub target: Vec2,
    /// First `chain_count` entries are valid.
    pub chain_positions: [Vec2; MAX_CHAIN_EVENT_POSITIONS],
    pub chain_count: u8,
    pub radius: f32,
}

impl SkillEvent {
    pub fn new(skill: SkillSlot, origin: Vec2, target: Vec2, radius: f32) -> Self {
        Self {
            skill,
            origin,
            target,
            chain_positions: [Vec2::ZERO; MAX_CHAIN_EVENT_POSITIONS],
            chain_count: 0,
            radius,
        }
    }

    /// Record chain hop positions; anything past the fixed capacity is dropped.
    pub fn with_chain(mut self, positions: &[Vec2]) -> Self {
        let n = positions.len().min(MAX_CHAIN_EVENT_POSITIONS);
        self.chain_positions[..n].copy_from_slice(&positions[..n]);
        self.chain_count = n as u8;
        self
    }

    pub fn chain(&self) -> &[Vec2] {
        &self.chain_positions[..self.chain_count as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEvent {
    pub resource_tier: u8,
    pub credit_value: u64,
    pub position: Vec2,
}

/// All notification buffers for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameEvents {
    pub damage: Vec<DamageEvent>,
    pub destruction: Vec<DestructionEvent>,
    pub skills: Vec<SkillEvent>,
    pub collection: Vec<CollectionEvent>,
}

impl FrameEvents {
    pub fn is_empty(&self) -> bool {
        self.damage.is_empty()
            && self.destruction.is_empty()
            && self.skills.is_empty()
            && self.collection.is_empty()
    }

    pub fn clear(&mut self) {
        self.damage.clear();
        self.destruction.clear();
        self.skills.clear();
        self.collection.clear();
    }
}
