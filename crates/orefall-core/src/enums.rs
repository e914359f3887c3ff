//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::Rgba;

/// Top-level game phase held in `GameState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Asteroids spawn, drift and can be mined.
    Playing,
    /// Run timer expired; remaining minerals are still pulled in.
    Collecting,
    /// Run finished and banked.
    GameOver,
    /// Spending credits on the upgrade graph between runs.
    #[default]
    Upgrading,
}

/// The four activatable skills. The discriminant is the slot index used by
/// cooldown, unlock and input arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillSlot {
    LaserBurst = 0,
    ChainLightning = 1,
    EmpPulse = 2,
    Overcharge = 3,
}

impl SkillSlot {
    pub const ALL: [SkillSlot; 4] = [
        SkillSlot::LaserBurst,
        SkillSlot::ChainLightning,
        SkillSlot::EmpPulse,
        SkillSlot::Overcharge,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Damage notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCategory {
    Normal,
    Critical,
    Dot,
    Skill,
}

impl DamageCategory {
    /// Display color for floating damage numbers.
    pub fn color(self) -> Rgba {
        match self {
            DamageCategory::Normal => Rgba::WHITE,
            DamageCategory::Critical => Rgba::YELLOW,
            DamageCategory::Dot => Rgba::ORANGE,
            DamageCategory::Skill => Rgba::CYAN,
        }
    }
}

/// Ore carried by an asteroid, indexed by `ResourceTier::index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OreKind {
    Iron = 0,
    Copper = 1,
    Cobalt = 2,
    Iridium = 3,
}

impl OreKind {
    pub const ALL: [OreKind; 4] = [OreKind::Iron, OreKind::Copper, OreKind::Cobalt, OreKind::Iridium];

    /// Unknown indices clamp to the highest tier.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index as usize).min(Self::ALL.len() - 1)]
    }

    pub fn health_factor(self) -> f32 {
        match self {
            OreKind::Iron => 1.0,
            OreKind::Copper => 1.5,
            OreKind::Cobalt => 2.25,
            OreKind::Iridium => 3.5,
        }
    }

    /// Credits per mineral before multipliers.
    pub fn credit_value(self) -> u32 {
        match self {
            OreKind::Iron => 1,
            OreKind::Copper => 3,
            OreKind::Cobalt => 7,
            OreKind::Iridium => 16,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            OreKind::Iron => 1.0,
            OreKind::Copper => 1.15,
            OreKind::Cobalt => 1.3,
            OreKind::Iridium => 1.5,
        }
    }

    /// Relative spawn weight at a given level. Rarer ores gain weight as the
    /// level climbs.
    pub fn spawn_weight(self, level: u32) -> f32 {
        let level = level.max(1) as f32 - 1.0;
        match self {
            OreKind::Iron => 60.0,
            OreKind::Copper => 25.0 + 4.0 * level,
            OreKind::Cobalt => 10.0 + 3.0 * level,
            OreKind::Iridium => 2.0 + 2.0 * level,
        }
    }
}
