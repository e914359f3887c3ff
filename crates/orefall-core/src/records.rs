//! Shared configuration records.
//!
//! Each record has exactly one live instance, owned by `SharedRecords`.
//! The upgrade engine and run bootstrap are the only writers; every system
//! receives the records it needs by reference.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{GamePhase, SkillSlot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Seconds elapsed in the current run.
    pub run_timer: f32,
    /// Spendable wallet.
    pub credits: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::default(),
            run_timer: 0.0,
            credits: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningConfig {
    pub radius: f32,
    pub damage_per_tick: f32,
    pub tick_interval: f32,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_MINING_RADIUS,
            damage_per_tick: DEFAULT_MINING_DAMAGE,
            tick_interval: DEFAULT_MINING_TICK_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConfig {
    /// Probability in `0..=1`.
    pub chance: f32,
    pub multiplier: f32,
}

impl Default for CritConfig {
    fn default() -> Self {
        Self {
            chance: DEFAULT_CRIT_CHANCE,
            multiplier: DEFAULT_CRIT_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub remaining: f32,
    pub max: f32,
}

impl Cooldown {
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fraction of the cooldown still to run, for display.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            (self.remaining / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCooldown {
    pub slots: [Cooldown; 4],
}

impl SkillCooldown {
    pub fn get(&self, slot: SkillSlot) -> Cooldown {
        self.slots[slot.index()]
    }

    /// Start the cooldown for `slot` at `max` seconds.
    pub fn trigger(&mut self, slot: SkillSlot, max: f32) {
        let cd = &mut self.slots[slot.index()];
        cd.max = max;
        cd.remaining = max;
    }

    /// Decrement every timer by `dt`, floored at zero.
    pub fn tick(&mut self, dt: f32) {
        for cd in &mut self.slots {
            cd.remaining = (cd.remaining - dt).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        for cd in &mut self.slots {
            cd.remaining = 0.0;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUnlock {
    pub unlocked: [bool; 4],
}

impl SkillUnlock {
    pub fn is_unlocked(&self, slot: SkillSlot) -> bool {
        self.unlocked[slot.index()]
    }

    pub fn unlock(&mut self, slot: SkillSlot) {
        self.unlocked[slot.index()] = true;
    }

    pub fn all() -> Self {
        Self { unlocked: [true; 4] }
    }
}

/// Damage-over-time parameters carried by a skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotParams {
    pub damage_per_tick: f32,
    pub tick_interval: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    pub laser_damage: f32,
    pub laser_cooldown: f32,
    pub laser_dot: DotParams,

    pub chain_damage: f32,
    pub chain_cooldown: f32,
    pub chain_max_targets: u32,
    pub chain_max_distance: f32,

    pub emp_damage: f32,
    pub emp_cooldown: f32,
    pub emp_radius: f32,
    pub emp_dot: DotParams,

    pub overcharge_cooldown: f32,
    pub overcharge_duration: f32,
    pub overcharge_damage_multiplier: f32,
    pub overcharge_radius_multiplier: f32,
}

impl SkillStats {
    /// Cooldown length currently configured for `slot`.
    pub fn cooldown(&self, slot: SkillSlot) -> f32 {
        match slot {
            SkillSlot::LaserBurst => self.laser_cooldown,
            SkillSlot::ChainLightning => self.chain_cooldown,
            SkillSlot::EmpPulse => self.emp_cooldown,
            SkillSlot::Overcharge => self.overcharge_cooldown,
        }
    }
}

impl Default for SkillStats {
    fn default() -> Self {
        Self {
            laser_damage: DEFAULT_LASER_DAMAGE,
            laser_cooldown: DEFAULT_LASER_COOLDOWN,
            laser_dot: DotParams {
                damage_per_tick: DEFAULT_LASER_DOT_DAMAGE,
                tick_interval: DEFAULT_LASER_DOT_INTERVAL,
                duration: DEFAULT_LASER_DOT_DURATION,
            },
            chain_damage: DEFAULT_CHAIN_DAMAGE,
            chain_cooldown: DEFAULT_CHAIN_COOLDOWN,
            chain_max_targets: DEFAULT_CHAIN_MAX_TARGETS,
            chain_max_distance: DEFAULT_CHAIN_MAX_DISTANCE,
            emp_damage: DEFAULT_EMP_DAMAGE,
            emp_cooldown: DEFAULT_EMP_COOLDOWN,
            emp_radius: DEFAULT_EMP_RADIUS,
            emp_dot: DotParams {
                damage_per_tick: DEFAULT_EMP_DOT_DAMAGE,
                tick_interval: DEFAULT_EMP_DOT_INTERVAL,
                duration: DEFAULT_EMP_DOT_DURATION,
            },
            overcharge_cooldown: DEFAULT_OVERCHARGE_COOLDOWN,
            overcharge_duration: DEFAULT_OVERCHARGE_DURATION,
            overcharge_damage_multiplier: DEFAULT_OVERCHARGE_DAMAGE_MULTIPLIER,
            overcharge_radius_multiplier: DEFAULT_OVERCHARGE_RADIUS_MULTIPLIER,
        }
    }
}

/// Timed mining buff started by the Overcharge skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverchargeBuff {
    pub remaining_duration: f32,
    pub damage_multiplier: f32,
    pub radius_multiplier: f32,
}

impl OverchargeBuff {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_duration > 0.0
    }

    pub fn activate(&mut self, stats: &SkillStats) {
        self.remaining_duration = stats.overcharge_duration;
        self.damage_multiplier = stats.overcharge_damage_multiplier;
        self.radius_multiplier = stats.overcharge_radius_multiplier;
    }

    /// Decay by `dt`, floored at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining_duration = (self.remaining_duration - dt).max(0.0);
    }

    /// Multipliers to apply this tick: `(damage, radius)`.
    pub fn multipliers(&self) -> (f32, f32) {
        if self.is_active() {
            (self.damage_multiplier, self.radius_multiplier)
        } else {
            (1.0, 1.0)
        }
    }
}

/// Consecutive-kill tracking for the combo credit bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboWindow {
    pub count: u32,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBonus {
    pub resource_multiplier: f32,
    pub lucky_strike_chance: f32,
    pub combo_mastery_multiplier: f32,
    /// Flat number of extra minerals per destroyed asteroid.
    pub mineral_drop_count_bonus: u32,
    pub combo: ComboWindow,
}

impl Default for PlayerBonus {
    fn default() -> Self {
        Self {
            resource_multiplier: DEFAULT_RESOURCE_MULTIPLIER,
            lucky_strike_chance: 0.0,
            combo_mastery_multiplier: DEFAULT_COMBO_MASTERY_MULTIPLIER,
            mineral_drop_count_bonus: 0,
            combo: ComboWindow::default(),
        }
    }
}

impl PlayerBonus {
    /// Register a kill and return the credit multiplier it earns.
    pub fn register_kill(&mut self) -> f32 {
        if self.combo.remaining > 0.0 {
            self.combo.count += 1;
        } else {
            self.combo.count = 1;
        }
        self.combo.remaining = COMBO_WINDOW_SECS;
        let bonus = COMBO_STEP * (self.combo.count - 1) as f32 * self.combo_mastery_multiplier;
        1.0 + bonus.min(COMBO_MAX_BONUS)
    }

    pub fn tick_combo(&mut self, dt: f32) {
        self.combo.remaining = (self.combo.remaining - dt).max(0.0);
        if self.combo.remaining <= 0.0 {
            self.combo.count = 0;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub run_duration: f32,
    pub spawn_interval: f32,
    pub max_active_asteroids: u32,
    pub hp_multiplier: f32,
    pub current_level: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_duration: DEFAULT_RUN_DURATION,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            max_active_asteroids: DEFAULT_MAX_ACTIVE_ASTEROIDS,
            hp_multiplier: 1.0,
            current_level: 1,
        }
    }
}

impl RunConfig {
    /// Set the level and derive the health multiplier from it.
    pub fn set_level(&mut self, level: u32) {
        self.current_level = level.max(1);
        self.hp_multiplier = 1.0 + HP_SCALE_PER_LEVEL * (self.current_level - 1) as f32;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval: f32,
    pub time_until_next: f32,
    pub max_active: u32,
}

impl SpawnTimer {
    pub fn from_run(run: &RunConfig) -> Self {
        Self {
            interval: run.spawn_interval,
            time_until_next: 0.0,
            max_active: run.max_active_asteroids,
        }
    }
}

/// Every shared record, owned in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedRecords {
    pub game: GameState,
    pub mining: MiningConfig,
    pub crit: CritConfig,
    pub cooldowns: SkillCooldown,
    pub unlocks: SkillUnlock,
    pub skills: SkillStats,
    pub overcharge: OverchargeBuff,
    pub bonus: PlayerBonus,
    pub run: RunConfig,
    pub spawn_timer: SpawnTimer,
}

impl SharedRecords {
    /// Default records for a fresh profile.
    pub fn bootstrap() -> Self {
        let run = RunConfig::default();
        Self {
            game: GameState::default(),
            mining: MiningConfig::default(),
            crit: CritConfig::default(),
            cooldowns: SkillCooldown::default(),
            unlocks: SkillUnlock::default(),
            skills: SkillStats::default(),
            overcharge: OverchargeBuff::default(),
            bonus: PlayerBonus::default(),
            spawn_timer: SpawnTimer::from_run(&run),
            run,
        }
    }

    /// Reset per-run state before a new run starts. Tunable stats are kept.
    pub fn reset_for_run(&mut self) {
        self.game.phase = GamePhase::Playing;
        self.game.run_timer = 0.0;
        self.cooldowns.reset();
        self.overcharge.remaining_duration = 0.0;
        self.bonus.combo = ComboWindow::default();
        self.spawn_timer = SpawnTimer::from_run(&self.run);
    }
}
