//! Entity spawn factories.
//!
//! Builders are returned for the mutation queue during a tick; the `*_at`
//! helpers spawn straight into a world and are used at setup and in tests.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use orefall_core::components::*;
use orefall_core::constants::*;
use orefall_core::enums::OreKind;
use orefall_core::records::RunConfig;

/// Collision radius of an asteroid with the given transform scale.
#[inline]
pub fn asteroid_radius(scale: f32) -> f32 {
    ASTEROID_BASE_RADIUS * scale
}

/// Pick an ore kind using the level-weighted spawn table.
pub fn roll_ore(rng: &mut ChaCha8Rng, level: u32) -> OreKind {
    let weights = OreKind::ALL.map(|ore| ore.spawn_weight(level));
    match WeightedIndex::new(weights) {
        Ok(dist) => OreKind::ALL[dist.sample(rng)],
        Err(_) => OreKind::Iron,
    }
}

fn asteroid_builder(
    position: Vec2,
    max_health: f32,
    ore: OreKind,
    drift: f32,
    rotation: f32,
    spin: f32,
) -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    builder
        .add(Asteroid)
        .add(Health::new(max_health))
        .add(Transform {
            position,
            rotation,
            scale: ore.scale(),
        })
        .add(Drift { speed: drift })
        .add(Spin { rate: spin })
        .add(ResourceTier::from(ore))
        .add(DamageTickTimer::default());
    builder
}

/// A random asteroid on the top edge, scaled to the current run.
pub fn random_asteroid(rng: &mut ChaCha8Rng, run: &RunConfig) -> EntityBuilder {
    let ore = roll_ore(rng, run.current_level);
    let x = rng.gen_range(-ARENA_HALF_WIDTH..=ARENA_HALF_WIDTH);
    let drift = rng.gen_range(ASTEROID_DRIFT_MIN..=ASTEROID_DRIFT_MAX);
    let spin = rng.gen_range(-ASTEROID_SPIN_MAX..=ASTEROID_SPIN_MAX);
    let rotation = rng.gen_range(0.0..std::f32::consts::TAU);
    let max_health = ASTEROID_BASE_HEALTH * ore.health_factor() * run.hp_multiplier;
    asteroid_builder(Vec2::new(x, ARENA_TOP), max_health, ore, drift, rotation, spin)
}

/// Spawn a motionless asteroid directly into `world`.
pub fn spawn_asteroid_at(world: &mut World, position: Vec2, max_health: f32, ore: OreKind) -> Entity {
    let mut builder = asteroid_builder(position, max_health, ore, 0.0, 0.0, 0.0);
    world.spawn(builder.build())
}

/// A mineral with its credit value already multiplied out.
pub fn mineral_builder(position: Vec2, ore: OreKind, credit_value: u64) -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    builder
        .add(Mineral)
        .add(Transform::at(position))
        .add(ResourceTier::from(ore))
        .add(CreditValue(credit_value))
        .add(PullSpeed {
            current: MINERAL_INITIAL_PULL_SPEED,
            acceleration: MINERAL_PULL_ACCELERATION,
        });
    builder
}

pub fn spawn_mineral_at(world: &mut World, position: Vec2, ore: OreKind, credit_value: u64) -> Entity {
    let mut builder = mineral_builder(position, ore, credit_value);
    world.spawn(builder.build())
}

/// Number of live asteroids.
pub fn asteroid_count(world: &World) -> usize {
    let mut query = world.query::<&Asteroid>();
    query.iter().count()
}

pub fn mineral_count(world: &World) -> usize {
    let mut query = world.query::<&Mineral>();
    query.iter().count()
}
