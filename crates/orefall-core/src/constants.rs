//! Simulation constants and tuning parameters.

use glam::Vec2;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena ---

/// Half-width of the playfield (world units). Asteroids spawn in `-W..W`.
pub const ARENA_HALF_WIDTH: f32 = 8.0;

/// Y coordinate of the top edge where asteroids enter.
pub const ARENA_TOP: f32 = 11.0;

/// Y coordinate past which an asteroid is culled.
pub const ARENA_BOTTOM: f32 = -12.0;

/// Ship position: origin of the laser beam.
pub const SHIP_POSITION: Vec2 = Vec2::new(0.0, -8.0);

/// Point minerals are pulled toward.
pub const COLLECTION_POINT: Vec2 = Vec2::new(0.0, -8.0);

/// Distance from the collection point at which a mineral is banked.
pub const COLLECTION_RADIUS: f32 = 0.5;

// --- Asteroids ---

/// Base health before tier and level scaling.
pub const ASTEROID_BASE_HEALTH: f32 = 40.0;

/// Collision radius of an asteroid at scale 1.0.
pub const ASTEROID_BASE_RADIUS: f32 = 0.5;

/// Drift speed range (units per second, downward).
pub const ASTEROID_DRIFT_MIN: f32 = 0.6;
pub const ASTEROID_DRIFT_MAX: f32 = 1.6;

/// Spin rate range (radians per second, either direction).
pub const ASTEROID_SPIN_MAX: f32 = 1.5;

// --- Run ---

/// Default run length in seconds.
pub const DEFAULT_RUN_DURATION: f32 = 60.0;

/// Default seconds between asteroid spawns.
pub const DEFAULT_SPAWN_INTERVAL: f32 = 0.8;

/// Default live-asteroid cap.
pub const DEFAULT_MAX_ACTIVE_ASTEROIDS: u32 = 24;

/// Health multiplier growth per level above 1.
pub const HP_SCALE_PER_LEVEL: f32 = 0.15;

// --- Mining ---

pub const DEFAULT_MINING_RADIUS: f32 = 2.5;
pub const DEFAULT_MINING_DAMAGE: f32 = 10.0;
pub const DEFAULT_MINING_TICK_INTERVAL: f32 = 0.25;

/// Lowest tick interval upgrades can reach.
pub const MIN_MINING_TICK_INTERVAL: f32 = 0.05;

// --- Crits ---

pub const DEFAULT_CRIT_CHANCE: f32 = 0.05;
pub const DEFAULT_CRIT_MULTIPLIER: f32 = 2.0;

// --- Skills ---

/// Lowest cooldown upgrades can reach (seconds).
pub const MIN_SKILL_COOLDOWN: f32 = 1.0;

/// Half-width of the laser beam.
pub const LASER_BEAM_HALF_WIDTH: f32 = 0.35;

pub const DEFAULT_LASER_DAMAGE: f32 = 50.0;
pub const DEFAULT_LASER_COOLDOWN: f32 = 8.0;
pub const DEFAULT_LASER_DOT_DAMAGE: f32 = 5.0;
pub const DEFAULT_LASER_DOT_INTERVAL: f32 = 0.5;
pub const DEFAULT_LASER_DOT_DURATION: f32 = 3.0;

pub const DEFAULT_CHAIN_DAMAGE: f32 = 30.0;
pub const DEFAULT_CHAIN_COOLDOWN: f32 = 10.0;
pub const DEFAULT_CHAIN_MAX_TARGETS: u32 = 4;
pub const DEFAULT_CHAIN_MAX_DISTANCE: f32 = 5.0;

pub const DEFAULT_EMP_DAMAGE: f32 = 40.0;
pub const DEFAULT_EMP_COOLDOWN: f32 = 15.0;
pub const DEFAULT_EMP_RADIUS: f32 = 4.0;
pub const DEFAULT_EMP_DOT_DAMAGE: f32 = 3.0;
pub const DEFAULT_EMP_DOT_INTERVAL: f32 = 0.5;
pub const DEFAULT_EMP_DOT_DURATION: f32 = 4.0;

pub const DEFAULT_OVERCHARGE_COOLDOWN: f32 = 20.0;
pub const DEFAULT_OVERCHARGE_DURATION: f32 = 5.0;
pub const DEFAULT_OVERCHARGE_DAMAGE_MULTIPLIER: f32 = 2.0;
pub const DEFAULT_OVERCHARGE_RADIUS_MULTIPLIER: f32 = 1.5;

/// Floor for any DoT tick interval, keeps the catch-up loop bounded.
pub const MIN_DOT_TICK_INTERVAL: f32 = 0.01;

/// Skill events carry at most this many chain positions.
pub const MAX_CHAIN_EVENT_POSITIONS: usize = 4;

// --- Minerals ---

/// Minerals per destroyed asteroid, inclusive range.
pub const MINERALS_PER_ASTEROID_MIN: u32 = 2;
pub const MINERALS_PER_ASTEROID_MAX: u32 = 4;

/// Maximum offset from the death position.
pub const MINERAL_SCATTER_RADIUS: f32 = 0.6;

/// Initial pull speed (units per second).
pub const MINERAL_INITIAL_PULL_SPEED: f32 = 1.0;

/// Pull acceleration (units per second squared).
pub const MINERAL_PULL_ACCELERATION: f32 = 6.0;

// --- Economy bonuses ---

pub const DEFAULT_RESOURCE_MULTIPLIER: f32 = 1.0;
pub const DEFAULT_COMBO_MASTERY_MULTIPLIER: f32 = 1.0;

/// Seconds after a kill during which the next kill extends the combo.
pub const COMBO_WINDOW_SECS: f32 = 1.5;

/// Credit bonus per combo step before mastery scaling.
pub const COMBO_STEP: f32 = 0.05;

/// Cap on the combo credit bonus.
pub const COMBO_MAX_BONUS: f32 = 1.0;

// --- Upgrade graph ---

/// Cost multiplier per node tier (tier 1, 2, 3).
pub const TIER_COST_MULTIPLIER: [u64; 3] = [1, 3, 8];

// --- Persistence ---

/// Stats at or below this value are treated as unset during migration.
pub const UNSET_EPSILON: f32 = 1e-4;
