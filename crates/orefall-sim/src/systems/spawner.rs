//! Asteroid spawner.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use orefall_core::records::{RunConfig, SpawnTimer};

use crate::queue::MutationQueue;
use crate::world_setup::{asteroid_count, random_asteroid};

/// Count down the spawn timer; on expiry reset it and, if the field is
/// below its cap, queue one new asteroid on the top edge.
pub fn run(
    world: &World,
    timer: &mut SpawnTimer,
    run: &RunConfig,
    rng: &mut ChaCha8Rng,
    queue: &mut MutationQueue,
    dt: f32,
) {
    timer.time_until_next -= dt;
    if timer.time_until_next > 0.0 {
        return;
    }
    timer.time_until_next = timer.interval;

    let live = asteroid_count(world);
    if live < timer.max_active as usize {
        queue.spawn(random_asteroid(rng, run));
        trace!(live, "asteroid spawned");
    }
}
