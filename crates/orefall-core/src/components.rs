//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::OreKind;

/// Marks an entity as an asteroid. Systems that move or damage asteroids
/// filter on this tag so no other population is ever touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid;

/// Marks an entity as a collectible mineral.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mineral;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub max: f32,
    pub current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { max, current: max }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract `amount`, never raising health and never going below zero.
    pub fn apply_damage(&mut self, amount: f32) {
        if amount > 0.0 {
            self.current = (self.current - amount).max(0.0);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Downward drift speed (units per second).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Drift {
    pub speed: f32,
}

/// Rotation rate (radians per second).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spin {
    pub rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTier {
    pub index: u8,
}

impl ResourceTier {
    pub fn ore(self) -> OreKind {
        OreKind::from_index(self.index)
    }
}

impl From<OreKind> for ResourceTier {
    fn from(kind: OreKind) -> Self {
        Self { index: kind as u8 }
    }
}

/// Seconds since this asteroid last took mining damage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageTickTimer {
    pub elapsed: f32,
}

/// Damage-over-time applied by the laser and EMP skills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burning {
    pub damage_per_tick: f32,
    pub tick_interval: f32,
    pub remaining_duration: f32,
    pub tick_accumulator: f32,
}

/// Set once minerals have been dropped for a dead asteroid. Guards against a
/// second drop while the despawn is still queued.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MineralsSpawned;

/// Credits banked when the mineral is collected. Multipliers are applied at
/// creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreditValue(pub u64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PullSpeed {
    pub current: f32,
    pub acceleration: f32,
}
