//! Mineral economy: drops on death, pull toward the ship, collection.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use orefall_core::components::*;
use orefall_core::constants::*;
use orefall_core::events::{CollectionEvent, DestructionEvent, FrameEvents};
use orefall_core::records::{GameState, PlayerBonus};

use crate::queue::MutationQueue;
use crate::world_setup::mineral_builder;

/// Drop minerals for every dead asteroid not yet marked `MineralsSpawned`.
/// The marker is set in the same flush that despawns the asteroid, so a
/// corpse never drops twice.
pub fn spawn_on_death(
    world: &World,
    bonus: &mut PlayerBonus,
    rng: &mut ChaCha8Rng,
    queue: &mut MutationQueue,
    events: &mut FrameEvents,
) {
    let dead: Vec<(Entity, Transform, ResourceTier)> = world
        .query::<(&Asteroid, &Health, &Transform, &ResourceTier, Option<&MineralsSpawned>)>()
        .iter()
        .filter(|(entity, (_, health, _, _, spawned))| {
            health.is_dead() && spawned.is_none() && !queue.is_pending_despawn(*entity)
        })
        .map(|(entity, (_, _, transform, tier, _))| (entity, *transform, *tier))
        .collect();

    for (entity, transform, tier) in dead {
        queue.insert(entity, MineralsSpawned);
        events.destruction.push(DestructionEvent {
            position: transform.position,
            scale: transform.scale,
            resource_tier: tier.index,
        });

        let combo = bonus.register_kill();
        let mut count = rng.gen_range(MINERALS_PER_ASTEROID_MIN..=MINERALS_PER_ASTEROID_MAX)
            + bonus.mineral_drop_count_bonus;
        let lucky = rng.gen::<f32>() < bonus.lucky_strike_chance;
        if lucky {
            count *= 2;
        }

        let ore = tier.ore();
        let value = (ore.credit_value() as f32 * bonus.resource_multiplier * combo)
            .round()
            .max(1.0) as u64;

        for _ in 0..count {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let distance = rng.gen_range(0.0..=MINERAL_SCATTER_RADIUS);
            let offset = Vec2::from_angle(angle) * distance;
            queue.spawn(mineral_builder(transform.position + offset, ore, value));
        }
        trace!(?entity, count, value, lucky, combo, "minerals dropped");
    }
}

/// Accelerate each mineral and move it toward the collection point without
/// overshooting.
pub fn pull(world: &mut World, dt: f32) {
    for (_entity, (_mineral, transform, speed)) in
        world.query_mut::<(&Mineral, &mut Transform, &mut PullSpeed)>()
    {
        speed.current += speed.acceleration * dt;
        let to_target = COLLECTION_POINT - transform.position;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            continue;
        }
        let step = (speed.current * dt).min(distance);
        transform.position += to_target / distance * step;
    }
}

/// Bank every mineral that has reached the collection point.
pub fn collect(
    world: &World,
    game: &mut GameState,
    queue: &mut MutationQueue,
    events: &mut FrameEvents,
) {
    let radius_sq = COLLECTION_RADIUS * COLLECTION_RADIUS;
    for (entity, (_mineral, transform, tier, value)) in world
        .query::<(&Mineral, &Transform, &ResourceTier, &CreditValue)>()
        .iter()
    {
        if queue.is_pending_despawn(entity)
            || transform.position.distance_squared(COLLECTION_POINT) > radius_sq
        {
            continue;
        }
        queue.despawn(entity);
        game.credits = game.credits.saturating_add(value.0);
        events.collection.push(CollectionEvent {
            resource_tier: tier.index,
            credit_value: value.0,
            position: transform.position,
        });
    }
}
