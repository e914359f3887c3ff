//! Laser Burst: a line trace from the ship to the pointer.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use orefall_core::components::{Asteroid, Health, Transform};
use orefall_core::constants::{LASER_BEAM_HALF_WIDTH, SHIP_POSITION};
use orefall_core::enums::{DamageCategory, SkillSlot};
use orefall_core::events::{FrameEvents, SkillEvent};
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

use crate::queue::MutationQueue;
use crate::systems::combat::{burning_from, distance_to_segment, strike};
use crate::world_setup::asteroid_radius;

/// Every asteroid the beam touches takes crit-rolled damage and starts
/// (or restarts) burning.
pub fn run(
    world: &mut World,
    records: &mut SharedRecords,
    input: &InputState,
    rng: &mut ChaCha8Rng,
    queue: &mut MutationQueue,
    events: &mut FrameEvents,
) {
    let Some(target) = super::activate_targeted(SkillSlot::LaserBurst, records, input) else {
        return;
    };
    let origin = SHIP_POSITION;
    let damage = records.skills.laser_damage;
    let burn = burning_from(&records.skills.laser_dot);

    for (entity, (_asteroid, health, transform)) in
        world.query_mut::<(&Asteroid, &mut Health, &Transform)>()
    {
        if health.is_dead() || queue.is_pending_despawn(entity) {
            continue;
        }
        let reach = asteroid_radius(transform.scale) + LASER_BEAM_HALF_WIDTH;
        if distance_to_segment(transform.position, origin, target) > reach {
            continue;
        }
        strike(
            health,
            transform.position,
            damage,
            DamageCategory::Skill,
            &records.crit,
            rng,
            events,
        );
        queue.insert(entity, burn);
    }

    events.skills.push(SkillEvent::new(
        SkillSlot::LaserBurst,
        origin,
        target,
        LASER_BEAM_HALF_WIDTH,
    ));
}
