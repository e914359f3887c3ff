//! Area mining under the pointer.
//!
//! The mining clock accumulates frame time and fires at most once per tick
//! when a full interval is banked. Only one interval is consumed per fire,
//! so a backlog carries into the following ticks.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use orefall_core::components::{Asteroid, DamageTickTimer, Health, Transform};
use orefall_core::enums::DamageCategory;
use orefall_core::events::FrameEvents;
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

use crate::queue::MutationQueue;
use crate::systems::combat::strike;

#[derive(Debug, Clone, Copy, Default)]
pub struct MiningClock {
    pub accumulated: f32,
}

impl MiningClock {
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Bank `dt` and report whether a mining tick fires now.
    fn advance(&mut self, dt: f32, interval: f32) -> bool {
        self.accumulated += dt;
        if self.accumulated >= interval {
            self.accumulated -= interval;
            true
        } else {
            false
        }
    }
}

pub fn run(
    world: &mut World,
    clock: &mut MiningClock,
    records: &SharedRecords,
    input: &InputState,
    rng: &mut ChaCha8Rng,
    queue: &MutationQueue,
    events: &mut FrameEvents,
    dt: f32,
) {
    for (_entity, timer) in world.query_mut::<&mut DamageTickTimer>() {
        timer.elapsed += dt;
    }

    if !clock.advance(dt, records.mining.tick_interval) {
        return;
    }
    let Some(pointer) = input.pointer() else {
        return;
    };

    let (damage_mult, radius_mult) = records.overcharge.multipliers();
    let radius = records.mining.radius * radius_mult;
    let radius_sq = radius * radius;
    let damage = records.mining.damage_per_tick * damage_mult;

    for (entity, (_asteroid, health, transform, timer)) in
        world.query_mut::<(&Asteroid, &mut Health, &Transform, &mut DamageTickTimer)>()
    {
        if health.is_dead() || queue.is_pending_despawn(entity) {
            continue;
        }
        if pointer.distance_squared(transform.position) > radius_sq {
            continue;
        }
        strike(
            health,
            transform.position,
            damage,
            DamageCategory::Normal,
            &records.crit,
            rng,
            events,
        );
        timer.elapsed = 0.0;
    }
}
