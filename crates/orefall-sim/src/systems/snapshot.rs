//! Snapshot system: builds a `SimSnapshot` from the world and records.
//!
//! Read-only; never modifies the world.

use hecs::World;

use orefall_core::components::*;
use orefall_core::enums::SkillSlot;
use orefall_core::records::SharedRecords;
use orefall_core::state::*;
use orefall_core::types::SimTime;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    records: Option<&SharedRecords>,
    paused: bool,
) -> SimSnapshot {
    let Some(records) = records else {
        // Not bootstrapped yet: nothing but the clock to show.
        return SimSnapshot {
            time: *time,
            paused,
            ..Default::default()
        };
    };

    SimSnapshot {
        time: *time,
        phase: records.game.phase,
        paused,
        run_timer: records.game.run_timer,
        run_duration: records.run.run_duration,
        credits: records.game.credits,
        level: records.run.current_level,
        asteroids: build_asteroids(world),
        minerals: build_minerals(world),
        skills: build_skills(records),
        overcharge_remaining: records.overcharge.remaining_duration,
        combo: records.bonus.combo.count,
    }
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    let mut asteroids: Vec<AsteroidView> = world
        .query::<(
            &Asteroid,
            &Transform,
            &Health,
            &ResourceTier,
            &DamageTickTimer,
            Option<&Burning>,
        )>()
        .iter()
        .map(|(entity, (_, transform, health, tier, timer, burning))| AsteroidView {
            id: entity.to_bits().get(),
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
            health_fraction: if health.max > 0.0 {
                (health.current / health.max).clamp(0.0, 1.0)
            } else {
                0.0
            },
            resource_tier: tier.index,
            burning: burning.is_some(),
            since_hit: timer.elapsed,
        })
        .collect();

    asteroids.sort_by_key(|a| a.id);
    asteroids
}

fn build_minerals(world: &World) -> Vec<MineralView> {
    let mut minerals: Vec<MineralView> = world
        .query::<(&Mineral, &Transform, &ResourceTier)>()
        .iter()
        .map(|(entity, (_, transform, tier))| MineralView {
            id: entity.to_bits().get(),
            position: transform.position,
            resource_tier: tier.index,
        })
        .collect();

    minerals.sort_by_key(|m| m.id);
    minerals
}

fn build_skills(records: &SharedRecords) -> Vec<SkillView> {
    SkillSlot::ALL
        .iter()
        .map(|&slot| {
            let cooldown = records.cooldowns.get(slot);
            SkillView {
                unlocked: records.unlocks.is_unlocked(slot),
                cooldown_remaining: cooldown.remaining,
                cooldown_fraction: cooldown.fraction(),
            }
        })
        .collect()
}
