//! EMP Pulse: a radius blast centred on the pointer.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use orefall_core::components::{Asteroid, Health, Transform};
use orefall_core::enums::{DamageCategory, SkillSlot};
use orefall_core::events::{FrameEvents, SkillEvent};
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

use crate::queue::MutationQueue;
use crate::systems::combat::{burning_from, strike};

pub fn run(
    world: &mut World,
    records: &mut SharedRecords,
    input: &InputState,
    rng: &mut ChaCha8Rng,
    queue: &mut MutationQueue,
    events: &mut FrameEvents,
) {
    let Some(center) = super::activate_targeted(SkillSlot::EmpPulse, records, input) else {
        return;
    };
    let radius = records.skills.emp_radius;
    let radius_sq = radius * radius;
    let damage = records.skills.emp_damage;
    let burn = burning_from(&records.skills.emp_dot);

    for (entity, (_asteroid, health, transform)) in
        world.query_mut::<(&Asteroid, &mut Health, &Transform)>()
    {
        if health.is_dead() || queue.is_pending_despawn(entity) {
            continue;
        }
        if center.distance_squared(transform.position) > radius_sq {
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

    events
        .skills
        .push(SkillEvent::new(SkillSlot::EmpPulse, center, center, radius));
}
