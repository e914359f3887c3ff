//! The persisted save document.
//!
//! Field names are camelCase on disk. Every field has a default so that
//! documents written by older builds still parse; `migrate` then repairs
//! whatever those defaults could not.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use orefall_core::constants::UNSET_EPSILON;
use orefall_core::records::{DotParams, SharedRecords, SpawnTimer};
use orefall_tree::{PurchaseState, UpgradeGraph};

use crate::migrate::CURRENT_SAVE_VERSION;

/// Upgrade purchases as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TechTreeUnlocks {
    /// Current format: node id to owned flag.
    Keyed(BTreeMap<String, bool>),
    /// Version 2 format, aligned to the node table order.
    Positional(Vec<bool>),
}

impl Default for TechTreeUnlocks {
    fn default() -> Self {
        TechTreeUnlocks::Keyed(BTreeMap::new())
    }
}

impl TechTreeUnlocks {
    pub fn to_state(&self, graph: &UpgradeGraph) -> PurchaseState {
        match self {
            TechTreeUnlocks::Keyed(map) => PurchaseState::from_map(graph, map.clone()),
            TechTreeUnlocks::Positional(flags) => PurchaseState::from_positional(graph, flags),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDot {
    pub damage_per_tick: f32,
    pub tick_interval: f32,
    pub duration: f32,
}

impl From<DotParams> for SaveDot {
    fn from(dot: DotParams) -> Self {
        Self {
            damage_per_tick: dot.damage_per_tick,
            tick_interval: dot.tick_interval,
            duration: dot.duration,
        }
    }
}

impl From<SaveDot> for DotParams {
    fn from(dot: SaveDot) -> Self {
        Self {
            damage_per_tick: dot.damage_per_tick,
            tick_interval: dot.tick_interval,
            duration: dot.duration,
        }
    }
}

/// Flat copy of every tunable stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveStats {
    pub mining_radius: f32,
    pub damage_per_tick: f32,
    pub tick_interval: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub resource_multiplier: f32,
    pub lucky_strike_chance: f32,
    pub run_duration: f32,

    pub laser_damage: f32,
    pub laser_cooldown: f32,
    pub chain_damage: f32,
    pub chain_cooldown: f32,
    pub chain_max_targets: u32,
    pub chain_max_dist: f32,
    pub emp_damage: f32,
    pub emp_cooldown: f32,
    pub emp_radius: f32,

    pub overcharge_cooldown: f32,
    pub overcharge_duration: f32,
    pub overcharge_damage_multiplier: f32,
    pub overcharge_radius_multiplier: f32,

    pub laser_dot: SaveDot,
    pub emp_dot: SaveDot,

    pub combo_mastery_multiplier: f32,
    pub mineral_drop_count: u32,
}

impl Default for SaveStats {
    fn default() -> Self {
        Self::capture(&SharedRecords::bootstrap())
    }
}

impl SaveStats {
    pub fn capture(records: &SharedRecords) -> Self {
        let s = &records.skills;
        Self {
            mining_radius: records.mining.radius,
            damage_per_tick: records.mining.damage_per_tick,
            tick_interval: records.mining.tick_interval,
            crit_chance: records.crit.chance,
            crit_multiplier: records.crit.multiplier,
            resource_multiplier: records.bonus.resource_multiplier,
            lucky_strike_chance: records.bonus.lucky_strike_chance,
            run_duration: records.run.run_duration,
            laser_damage: s.laser_damage,
            laser_cooldown: s.laser_cooldown,
            chain_damage: s.chain_damage,
            chain_cooldown: s.chain_cooldown,
            chain_max_targets: s.chain_max_targets,
            chain_max_dist: s.chain_max_distance,
            emp_damage: s.emp_damage,
            emp_cooldown: s.emp_cooldown,
            emp_radius: s.emp_radius,
            overcharge_cooldown: s.overcharge_cooldown,
            overcharge_duration: s.overcharge_duration,
            overcharge_damage_multiplier: s.overcharge_damage_multiplier,
            overcharge_radius_multiplier: s.overcharge_radius_multiplier,
            laser_dot: s.laser_dot.into(),
            emp_dot: s.emp_dot.into(),
            combo_mastery_multiplier: records.bonus.combo_mastery_multiplier,
            mineral_drop_count: records.bonus.mineral_drop_count_bonus,
        }
    }

    pub fn restore(&self, records: &mut SharedRecords) {
        records.mining.radius = self.mining_radius;
        records.mining.damage_per_tick = self.damage_per_tick;
        records.mining.tick_interval = self.tick_interval;
        records.crit.chance = self.crit_chance;
        records.crit.multiplier = self.crit_multiplier;
        records.bonus.resource_multiplier = self.resource_multiplier;
        records.bonus.lucky_strike_chance = self.lucky_strike_chance;
        records.bonus.combo_mastery_multiplier = self.combo_mastery_multiplier;
        records.bonus.mineral_drop_count_bonus = self.mineral_drop_count;
        records.run.run_duration = self.run_duration;

        let s = &mut records.skills;
        s.laser_damage = self.laser_damage;
        s.laser_cooldown = self.laser_cooldown;
        s.laser_dot = self.laser_dot.into();
        s.chain_damage = self.chain_damage;
        s.chain_cooldown = self.chain_cooldown;
        s.chain_max_targets = self.chain_max_targets;
        s.chain_max_distance = self.chain_max_dist;
        s.emp_damage = self.emp_damage;
        s.emp_cooldown = self.emp_cooldown;
        s.emp_radius = self.emp_radius;
        s.emp_dot = self.emp_dot.into();
        s.overcharge_cooldown = self.overcharge_cooldown;
        s.overcharge_duration = self.overcharge_duration;
        s.overcharge_damage_multiplier = self.overcharge_damage_multiplier;
        s.overcharge_radius_multiplier = self.overcharge_radius_multiplier;
    }

    /// Replace stats that an older build never wrote with their defaults.
    ///
    /// A stat counts as unset when its default is positive and the stored
    /// value is below `UNSET_EPSILON` (zero or negative) or not a number. Stats whose
    /// default is zero, like lucky strike chance, are left alone. Returns
    /// how many fields were filled.
    pub fn fill_unset(&mut self) -> usize {
        let defaults = SaveStats::default();
        let mut filled = 0;
        let mut fill = |value: &mut f32, default: f32| {
            if default > UNSET_EPSILON && (value.is_nan() || *value < UNSET_EPSILON) {
                *value = default;
                filled += 1;
            }
        };

        fill(&mut self.mining_radius, defaults.mining_radius);
        fill(&mut self.damage_per_tick, defaults.damage_per_tick);
        fill(&mut self.tick_interval, defaults.tick_interval);
        fill(&mut self.crit_chance, defaults.crit_chance);
        fill(&mut self.crit_multiplier, defaults.crit_multiplier);
        fill(&mut self.resource_multiplier, defaults.resource_multiplier);
        fill(&mut self.lucky_strike_chance, defaults.lucky_strike_chance);
        fill(&mut self.run_duration, defaults.run_duration);
        fill(&mut self.laser_damage, defaults.laser_damage);
        fill(&mut self.laser_cooldown, defaults.laser_cooldown);
        fill(&mut self.chain_damage, defaults.chain_damage);
        fill(&mut self.chain_cooldown, defaults.chain_cooldown);
        fill(&mut self.chain_max_dist, defaults.chain_max_dist);
        fill(&mut self.emp_damage, defaults.emp_damage);
        fill(&mut self.emp_cooldown, defaults.emp_cooldown);
        fill(&mut self.emp_radius, defaults.emp_radius);
        fill(&mut self.overcharge_cooldown, defaults.overcharge_cooldown);
        fill(&mut self.overcharge_duration, defaults.overcharge_duration);
        fill(
            &mut self.overcharge_damage_multiplier,
            defaults.overcharge_damage_multiplier,
        );
        fill(
            &mut self.overcharge_radius_multiplier,
            defaults.overcharge_radius_multiplier,
        );
        for (dot, default) in [
            (&mut self.laser_dot, defaults.laser_dot),
            (&mut self.emp_dot, defaults.emp_dot),
        ] {
            fill(&mut dot.damage_per_tick, default.damage_per_tick);
            fill(&mut dot.tick_interval, default.tick_interval);
            fill(&mut dot.duration, default.duration);
        }
        fill(
            &mut self.combo_mastery_multiplier,
            defaults.combo_mastery_multiplier,
        );

        if self.chain_max_targets == 0 {
            self.chain_max_targets = defaults.chain_max_targets;
            filled += 1;
        }
        filled
    }
}

fn legacy_version() -> u32 {
    1
}

fn first_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocument {
    /// Documents from before versioning carry no tag and count as version 1.
    #[serde(default = "legacy_version")]
    pub save_version: u32,
    #[serde(default)]
    pub total_credits: u64,
    #[serde(default = "first_level")]
    pub current_level: u32,
    #[serde(default)]
    pub tech_tree_unlocks: TechTreeUnlocks,
    #[serde(default)]
    pub skill_unlocks: [bool; 4],
    #[serde(default)]
    pub stats: SaveStats,
}

impl SaveDocument {
    /// Snapshot the persistent parts of the records and purchase state.
    pub fn capture(records: &SharedRecords, purchases: &PurchaseState) -> Self {
        Self {
            save_version: CURRENT_SAVE_VERSION,
            total_credits: records.game.credits,
            current_level: records.run.current_level,
            tech_tree_unlocks: TechTreeUnlocks::Keyed(purchases.as_map().clone()),
            skill_unlocks: records.unlocks.unlocked,
            stats: SaveStats::capture(records),
        }
    }

    /// Document for a brand-new profile.
    pub fn fresh(graph: &UpgradeGraph) -> Self {
        Self::capture(&SharedRecords::bootstrap(), &PurchaseState::new(graph))
    }

    /// Rebuild records and purchase state from this document.
    pub fn restore(&self, graph: &UpgradeGraph) -> (SharedRecords, PurchaseState) {
        let mut records = SharedRecords::bootstrap();
        self.stats.restore(&mut records);
        records.game.credits = self.total_credits;
        records.run.set_level(self.current_level);
        records.unlocks.unlocked = self.skill_unlocks;
        records.spawn_timer = SpawnTimer::from_run(&records.run);
        (records, self.tech_tree_unlocks.to_state(graph))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
