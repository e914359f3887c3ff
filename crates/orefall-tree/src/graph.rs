//! The upgrade graph: a fixed declarative node table, indexed by id.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orefall_core::constants::TIER_COST_MULTIPLIER;
use orefall_core::enums::SkillSlot;

use crate::effects::UpgradeEffect;
use crate::effects::UpgradeEffect::*;

/// Id of the root node. It is free and always purchased.
pub const ROOT_NODE_ID: &str = "core_drill";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Mining,
    Precision,
    Economy,
    Offense,
    Tactics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeNode {
    /// Stable key used by saves.
    pub id: &'static str,
    pub display_name: &'static str,
    pub branch: Branch,
    pub base_cost: u64,
    /// 1, 2 or 3.
    pub tier: u8,
    pub prerequisites: &'static [&'static str],
    pub effects: &'static [UpgradeEffect],
    /// Layout hint for the upgrade screen.
    pub graph_position: Vec2,
    /// Skill unlocked by buying this node.
    pub skill_slot: Option<SkillSlot>,
}

impl UpgradeNode {
    /// `base_cost × [1, 3, 8][tier − 1]`. Out-of-range tiers clamp.
    pub fn actual_cost(&self) -> u64 {
        let idx = (self.tier.clamp(1, 3) - 1) as usize;
        self.base_cost * TIER_COST_MULTIPLIER[idx]
    }

    pub fn is_root(&self) -> bool {
        self.prerequisites.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
const fn node(
    id: &'static str,
    display_name: &'static str,
    branch: Branch,
    base_cost: u64,
    tier: u8,
    prerequisites: &'static [&'static str],
    effects: &'static [UpgradeEffect],
    position: (f32, f32),
    skill_slot: Option<SkillSlot>,
) -> UpgradeNode {
    UpgradeNode {
        id,
        display_name,
        branch,
        base_cost,
        tier,
        prerequisites,
        effects,
        graph_position: Vec2::new(position.0, position.1),
        skill_slot,
    }
}

use Branch::*;

/// The standard node table. Order is the legacy save index: append only.
#[rustfmt::skip]
pub static STANDARD_NODES: &[UpgradeNode] = &[
    node(ROOT_NODE_ID, "Core Drill", Mining, 0, 1, &[], &[], (0.0, 0.0), None),
    // --- Mining ---
    node("mining_radius_1", "Wide Bore I", Mining, 50, 1, &[ROOT_NODE_ID], &[MiningRadius(0.3)], (-0.5, 1.0), None),
    node("mining_damage_1", "Hardened Bit I", Mining, 60, 1, &[ROOT_NODE_ID], &[MiningDamage(2.0)], (0.5, 1.0), None),
    node("mining_speed_1", "Rapid Cycle I", Mining, 80, 1, &["mining_damage_1"], &[MiningTickInterval(0.02)], (0.5, 2.0), None),
    node("mining_radius_2", "Wide Bore II", Mining, 100, 2, &["mining_radius_1"], &[MiningRadius(0.4)], (-0.5, 2.0), None),
    node("mining_damage_2", "Hardened Bit II", Mining, 120, 2, &["mining_damage_1"], &[MiningDamage(4.0)], (1.0, 2.5), None),
    node("mining_speed_2", "Rapid Cycle II", Mining, 150, 2, &["mining_speed_1", "mining_damage_2"], &[MiningTickInterval(0.03)], (0.5, 3.0), None),
    node("mining_radius_3", "Wide Bore III", Mining, 200, 3, &["mining_radius_2"], &[MiningRadius(0.5)], (-0.5, 3.0), None),
    node("mining_damage_3", "Diamond Bit", Mining, 250, 3, &["mining_damage_2"], &[MiningDamage(8.0), MiningTickInterval(0.02)], (1.0, 3.5), None),
    // --- Precision ---
    node("crit_chance_1", "Fracture Sense I", Precision, 75, 1, &[ROOT_NODE_ID], &[CritChance(0.03)], (2.0, 1.0), None),
    node("crit_mult_1", "Deep Fracture I", Precision, 90, 1, &["crit_chance_1"], &[CritMultiplier(0.25)], (2.5, 2.0), None),
    node("lucky_strike_1", "Lucky Strike I", Precision, 100, 1, &["crit_chance_1"], &[LuckyStrikeChance(0.05)], (1.5, 2.0), None),
    node("crit_chance_2", "Fracture Sense II", Precision, 150, 2, &["crit_chance_1"], &[CritChance(0.05)], (2.0, 2.5), None),
    node("crit_mult_2", "Deep Fracture II", Precision, 180, 2, &["crit_mult_1"], &[CritMultiplier(0.5)], (2.5, 3.0), None),
    node("lucky_strike_2", "Lucky Strike II", Precision, 200, 2, &["lucky_strike_1"], &[LuckyStrikeChance(0.08)], (1.5, 3.0), None),
    node("crit_chance_3", "Fault Line", Precision, 300, 3, &["crit_chance_2", "crit_mult_2"], &[CritChance(0.07), CritMultiplier(0.5)], (2.0, 4.0), None),
    // --- Economy ---
    node("resource_mult_1", "Refinery I", Economy, 80, 1, &[ROOT_NODE_ID], &[ResourceMultiplier(0.1)], (4.0, 1.0), None),
    node("mineral_drop_1", "Scatter Net I", Economy, 100, 1, &["resource_mult_1"], &[MineralDropCount(1)], (4.5, 2.0), None),
    node("run_duration_1", "Extended Shift I", Economy, 70, 1, &[ROOT_NODE_ID], &[RunDuration(10.0)], (3.5, 1.0), None),
    node("resource_mult_2", "Refinery II", Economy, 160, 2, &["resource_mult_1"], &[ResourceMultiplier(0.15)], (4.0, 2.5), None),
    node("combo_mastery_1", "Rhythm Mining", Economy, 140, 2, &["run_duration_1"], &[ComboMastery(0.5)], (3.0, 2.0), None),
    node("run_duration_2", "Extended Shift II", Economy, 150, 2, &["run_duration_1"], &[RunDuration(15.0)], (3.5, 2.5), None),
    node("mineral_drop_2", "Scatter Net II", Economy, 250, 3, &["mineral_drop_1", "resource_mult_2"], &[MineralDropCount(1)], (4.5, 3.5), None),
    node("resource_mult_3", "Refinery III", Economy, 400, 3, &["resource_mult_2"], &[ResourceMultiplier(0.25)], (4.0, 4.0), None),
    // --- Offense: laser and chain ---
    node("unlock_laser", "Laser Burst", Offense, 150, 1, &[ROOT_NODE_ID], &[], (-2.0, 1.0), Some(SkillSlot::LaserBurst)),
    node("laser_damage_1", "Focused Lens", Offense, 120, 1, &["unlock_laser"], &[LaserDamage(20.0)], (-1.5, 2.0), None),
    node("laser_cooldown_1", "Capacitor Bank", Offense, 100, 2, &["unlock_laser"], &[LaserCooldown(1.5)], (-2.5, 2.0), None),
    node("laser_burn_1", "Thermal Lance", Offense, 130, 2, &["laser_damage_1"], &[LaserDotDamage(3.0), LaserDotDuration(1.0)], (-1.5, 3.0), None),
    node("unlock_chain", "Chain Lightning", Offense, 200, 2, &["unlock_laser"], &[], (-2.0, 3.0), Some(SkillSlot::ChainLightning)),
    node("chain_damage_1", "Arc Amplifier", Offense, 150, 2, &["unlock_chain"], &[ChainDamage(15.0)], (-1.5, 4.0), None),
    node("chain_targets_1", "Forked Arc", Offense, 180, 3, &["unlock_chain"], &[ChainMaxTargets(2)], (-2.5, 4.0), None),
    node("chain_range_1", "Long Arc", Offense, 200, 3, &["chain_targets_1"], &[ChainMaxDistance(1.5), ChainCooldown(2.0)], (-2.5, 5.0), None),
    // --- Tactics: EMP and overcharge ---
    node("unlock_emp", "EMP Pulse", Tactics, 180, 1, &[ROOT_NODE_ID], &[], (-4.0, 1.0), Some(SkillSlot::EmpPulse)),
    node("emp_damage_1", "Surge Coils", Tactics, 140, 1, &["unlock_emp"], &[EmpDamage(20.0), EmpDotDamage(2.0)], (-3.5, 2.0), None),
    node("emp_radius_1", "Wide Field", Tactics, 130, 2, &["unlock_emp"], &[EmpRadius(1.0)], (-4.5, 2.0), None),
    node("emp_cooldown_1", "Quick Discharge", Tactics, 150, 2, &["emp_radius_1"], &[EmpCooldown(3.0)], (-4.5, 3.0), None),
    node("unlock_overcharge", "Overcharge", Tactics, 220, 2, &["unlock_emp"], &[], (-4.0, 3.0), Some(SkillSlot::Overcharge)),
    node("overcharge_duration_1", "Sustained Surge", Tactics, 160, 2, &["unlock_overcharge"], &[OverchargeDuration(2.0)], (-3.5, 4.0), None),
    node("overcharge_power_1", "Redline", Tactics, 200, 3, &["unlock_overcharge"], &[OverchargeDamageMultiplier(0.5), OverchargeRadiusMultiplier(0.25)], (-4.5, 4.0), None),
    node("overcharge_cooldown_1", "Heat Sink", Tactics, 220, 3, &["overcharge_duration_1"], &[OverchargeCooldown(4.0)], (-3.5, 5.0), None),
];

/// Structural problems found by [`UpgradeGraph::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("node table is empty")]
    Empty,
    #[error("duplicate node id '{0}'")]
    DuplicateId(&'static str),
    #[error("node '{node}' requires unknown or later node '{prerequisite}'")]
    BadPrerequisite {
        node: &'static str,
        prerequisite: &'static str,
    },
    #[error("expected exactly one root node, found {0}")]
    RootCount(usize),
    #[error("node '{node}' has tier {tier}, expected 1..=3")]
    BadTier { node: &'static str, tier: u8 },
}

/// Immutable graph built once from a node table.
#[derive(Debug)]
pub struct UpgradeGraph {
    nodes: &'static [UpgradeNode],
    index: HashMap<&'static str, usize>,
}

impl UpgradeGraph {
    pub fn new(nodes: &'static [UpgradeNode]) -> Self {
        let index = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        Self { nodes, index }
    }

    /// The shared standard graph, built on first use.
    pub fn standard() -> &'static UpgradeGraph {
        static GRAPH: OnceLock<UpgradeGraph> = OnceLock::new();
        GRAPH.get_or_init(|| UpgradeGraph::new(STANDARD_NODES))
    }

    pub fn nodes(&self) -> &'static [UpgradeNode] {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'static UpgradeNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Node at a legacy positional save index.
    pub fn by_legacy_index(&self, index: usize) -> Option<&'static UpgradeNode> {
        self.nodes.get(index)
    }

    pub fn root(&self) -> Option<&'static UpgradeNode> {
        self.nodes.iter().find(|n| n.is_root())
    }

    pub fn branch(&self, branch: Branch) -> impl Iterator<Item = &'static UpgradeNode> {
        self.nodes.iter().filter(move |n| n.branch == branch)
    }

    /// Check table invariants: unique ids, single root, valid tiers, and
    /// prerequisites that point at earlier nodes (which also rules out cycles).
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::Empty);
        }
        if self.index.len() != self.nodes.len() {
            let mut seen = HashSet::new();
            for n in self.nodes {
                if !seen.insert(n.id) {
                    return Err(GraphError::DuplicateId(n.id));
                }
            }
        }

        let roots = self.nodes.iter().filter(|n| n.is_root()).count();
        if roots != 1 {
            return Err(GraphError::RootCount(roots));
        }

        for (i, n) in self.nodes.iter().enumerate() {
            if !(1..=3).contains(&n.tier) {
                return Err(GraphError::BadTier {
                    node: n.id,
                    tier: n.tier,
                });
            }
            for &prereq in n.prerequisites {
                match self.index.get(prereq) {
                    Some(&j) if j < i => {}
                    _ => {
                        return Err(GraphError::BadPrerequisite {
                            node: n.id,
                            prerequisite: prereq,
                        })
                    }
                }
            }
        }
        Ok(())
    }
}
