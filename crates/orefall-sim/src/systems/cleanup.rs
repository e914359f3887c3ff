//! Destruction: removes asteroids whose health has run out.
//!
//! Runs in every phase so a kill landed on the last tick of a run is still
//! cleaned up.

use hecs::World;

use orefall_core::components::{Asteroid, Health};

use crate::queue::MutationQueue;

pub fn run(world: &World, queue: &mut MutationQueue) -> usize {
    let mut destroyed = 0;
    for (entity, (_asteroid, health)) in world.query::<(&Asteroid, &Health)>().iter() {
        if health.is_dead() && !queue.is_pending_despawn(entity) {
            queue.despawn(entity);
            destroyed += 1;
        }
    }
    destroyed
}
