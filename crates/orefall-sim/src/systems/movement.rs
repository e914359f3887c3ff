//! Asteroid drift and the bottom-edge cull.
//!
//! Both passes filter on the `Asteroid` tag; minerals have their own pull
//! system and are never moved here.

use hecs::World;

use orefall_core::components::{Asteroid, Drift, Spin, Transform};
use orefall_core::constants::ARENA_BOTTOM;

use crate::queue::MutationQueue;

/// Drift every asteroid down by `speed * dt` and rotate by `spin * dt`.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (_asteroid, transform, drift, spin)) in
        world.query_mut::<(&Asteroid, &mut Transform, &Drift, &Spin)>()
    {
        transform.position.y -= drift.speed * dt;
        transform.rotation = (transform.rotation + spin.rate * dt).rem_euclid(std::f32::consts::TAU);
    }
}

/// Queue the despawn of asteroids that have drifted past the bottom edge.
pub fn cull_out_of_bounds(world: &World, queue: &mut MutationQueue) {
    for (entity, (_asteroid, transform)) in world.query::<(&Asteroid, &Transform)>().iter() {
        if transform.position.y < ARENA_BOTTOM {
            queue.despawn(entity);
        }
    }
}
