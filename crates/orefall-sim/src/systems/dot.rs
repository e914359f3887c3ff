//! Burning damage-over-time.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use orefall_core::components::{Burning, Health, Transform};
use orefall_core::constants::MIN_DOT_TICK_INTERVAL;
use orefall_core::enums::DamageCategory;
use orefall_core::events::FrameEvents;
use orefall_core::records::CritConfig;

use crate::queue::MutationQueue;
use crate::systems::combat::strike;

/// Tick every burn. Several ticks may land in one frame when the interval is
/// short; expired burns are removed at the flush unless a refresh is queued.
pub fn run(
    world: &mut World,
    crit: &CritConfig,
    rng: &mut ChaCha8Rng,
    queue: &mut MutationQueue,
    events: &mut FrameEvents,
    dt: f32,
) {
    for (entity, (health, transform, burn)) in
        world.query_mut::<(&mut Health, &Transform, &mut Burning)>()
    {
        burn.remaining_duration -= dt;
        burn.tick_accumulator += dt;

        let interval = burn.tick_interval.max(MIN_DOT_TICK_INTERVAL);
        while burn.tick_accumulator >= interval {
            burn.tick_accumulator -= interval;
            if health.is_dead() {
                continue;
            }
            strike(
                health,
                transform.position,
                burn.damage_per_tick,
                DamageCategory::Dot,
                crit,
                rng,
                events,
            );
        }

        // A skill hit this tick queued a fresh burn; let it replace this one.
        if burn.remaining_duration <= 0.0 && !queue.is_pending_insert::<Burning>(entity) {
            queue.remove::<Burning>(entity);
        }
    }
}
