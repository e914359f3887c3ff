//! Upgrade effects and the mutation each one performs on the shared records.
//!
//! Every variant maps to exactly one stat on one record. Application cannot
//! fail: by the time an effect runs, the purchase has already been paid for.

use serde::{Deserialize, Serialize};

use orefall_core::constants::{MIN_MINING_TICK_INTERVAL, MIN_SKILL_COOLDOWN};
use orefall_core::records::SharedRecords;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    // --- Mining ---
    MiningRadius(f32),
    MiningDamage(f32),
    /// Seconds removed from the mining tick interval.
    MiningTickInterval(f32),

    // --- Precision ---
    CritChance(f32),
    CritMultiplier(f32),
    LuckyStrikeChance(f32),

    // --- Economy ---
    /// Composes multiplicatively: `mult *= 1 + value`.
    ResourceMultiplier(f32),
    MineralDropCount(u32),
    ComboMastery(f32),
    RunDuration(f32),

    // --- Laser / chain ---
    LaserDamage(f32),
    LaserCooldown(f32),
    LaserDotDamage(f32),
    LaserDotDuration(f32),
    ChainDamage(f32),
    ChainCooldown(f32),
    ChainMaxTargets(u32),
    ChainMaxDistance(f32),

    // --- EMP / overcharge ---
    EmpDamage(f32),
    EmpCooldown(f32),
    EmpRadius(f32),
    EmpDotDamage(f32),
    OverchargeCooldown(f32),
    OverchargeDuration(f32),
    OverchargeDamageMultiplier(f32),
    OverchargeRadiusMultiplier(f32),
}

/// Subtract from a cooldown-like stat without dropping below `floor`.
#[inline]
fn reduce(stat: &mut f32, by: f32, floor: f32) {
    *stat = (*stat - by).max(floor);
}

impl UpgradeEffect {
    /// Apply this effect to the records it targets.
    pub fn apply(self, records: &mut SharedRecords) {
        let skills = &mut records.skills;
        match self {
            UpgradeEffect::MiningRadius(v) => records.mining.radius += v,
            UpgradeEffect::MiningDamage(v) => records.mining.damage_per_tick += v,
            UpgradeEffect::MiningTickInterval(v) => {
                reduce(&mut records.mining.tick_interval, v, MIN_MINING_TICK_INTERVAL)
            }

            UpgradeEffect::CritChance(v) => {
                records.crit.chance = (records.crit.chance + v).min(1.0)
            }
            UpgradeEffect::CritMultiplier(v) => records.crit.multiplier += v,
            UpgradeEffect::LuckyStrikeChance(v) => {
                records.bonus.lucky_strike_chance = (records.bonus.lucky_strike_chance + v).min(1.0)
            }

            UpgradeEffect::ResourceMultiplier(v) => records.bonus.resource_multiplier *= 1.0 + v,
            UpgradeEffect::MineralDropCount(v) => records.bonus.mineral_drop_count_bonus += v,
            UpgradeEffect::ComboMastery(v) => records.bonus.combo_mastery_multiplier += v,
            UpgradeEffect::RunDuration(v) => records.run.run_duration += v,

            UpgradeEffect::LaserDamage(v) => skills.laser_damage += v,
            UpgradeEffect::LaserCooldown(v) => {
                reduce(&mut skills.laser_cooldown, v, MIN_SKILL_COOLDOWN)
            }
            UpgradeEffect::LaserDotDamage(v) => skills.laser_dot.damage_per_tick += v,
            UpgradeEffect::LaserDotDuration(v) => skills.laser_dot.duration += v,
            UpgradeEffect::ChainDamage(v) => skills.chain_damage += v,
            UpgradeEffect::ChainCooldown(v) => {
                reduce(&mut skills.chain_cooldown, v, MIN_SKILL_COOLDOWN)
            }
            UpgradeEffect::ChainMaxTargets(v) => skills.chain_max_targets += v,
            UpgradeEffect::ChainMaxDistance(v) => skills.chain_max_distance += v,

            UpgradeEffect::EmpDamage(v) => skills.emp_damage += v,
            UpgradeEffect::EmpCooldown(v) => reduce(&mut skills.emp_cooldown, v, MIN_SKILL_COOLDOWN),
            UpgradeEffect::EmpRadius(v) => skills.emp_radius += v,
            UpgradeEffect::EmpDotDamage(v) => skills.emp_dot.damage_per_tick += v,
            UpgradeEffect::OverchargeCooldown(v) => {
                reduce(&mut skills.overcharge_cooldown, v, MIN_SKILL_COOLDOWN)
            }
            UpgradeEffect::OverchargeDuration(v) => skills.overcharge_duration += v,
            UpgradeEffect::OverchargeDamageMultiplier(v) => {
                skills.overcharge_damage_multiplier += v
            }
            UpgradeEffect::OverchargeRadiusMultiplier(v) => {
                skills.overcharge_radius_multiplier += v
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orefall_core::constants::*;

    #[test]
    fn resource_multiplier_composes_multiplicatively() {
        let mut records = SharedRecords::bootstrap();
        UpgradeEffect::ResourceMultiplier(0.1).apply(&mut records);
        UpgradeEffect::ResourceMultiplier(0.1).apply(&mut records);
        assert!((records.bonus.resource_multiplier - 1.21).abs() < 1e-5);
    }

    #[test]
    fn cooldown_reduction_floors_at_one_second() {
        let mut records = SharedRecords::bootstrap();
        UpgradeEffect::LaserCooldown(100.0).apply(&mut records);
        assert_eq!(records.skills.laser_cooldown, MIN_SKILL_COOLDOWN);
        UpgradeEffect::EmpCooldown(DEFAULT_EMP_COOLDOWN - 3.0).apply(&mut records);
        assert!((records.skills.emp_cooldown - 3.0).abs() < 1e-5);
    }

    #[test]
    fn tick_interval_reduction_floors() {
        let mut records = SharedRecords::bootstrap();
        UpgradeEffect::MiningTickInterval(0.1).apply(&mut records);
        assert!((records.mining.tick_interval - 0.15).abs() < 1e-6);
        UpgradeEffect::MiningTickInterval(1.0).apply(&mut records);
        assert_eq!(records.mining.tick_interval, MIN_MINING_TICK_INTERVAL);
    }

    #[test]
    fn additive_effects_touch_only_their_stat() {
        let mut records = SharedRecords::bootstrap();
        let before = records.clone();
        UpgradeEffect::ChainMaxTargets(2).apply(&mut records);
        assert_eq!(records.skills.chain_max_targets, DEFAULT_CHAIN_MAX_TARGETS + 2);

        let mut expected = before;
        expected.skills.chain_max_targets += 2;
        assert_eq!(records, expected);
    }

    #[test]
    fn chances_clamp_to_one() {
        let mut records = SharedRecords::bootstrap();
        UpgradeEffect::CritChance(5.0).apply(&mut records);
        UpgradeEffect::LuckyStrikeChance(5.0).apply(&mut records);
        assert_eq!(records.crit.chance, 1.0);
        assert_eq!(records.bonus.lucky_strike_chance, 1.0);
    }
}
