//! Chain Lightning: nearest-neighbour chaining from the pointer.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use orefall_core::components::{Asteroid, Health, Transform};
use orefall_core::constants::SHIP_POSITION;
use orefall_core::enums::{DamageCategory, SkillSlot};
use orefall_core::events::{FrameEvents, SkillEvent};
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

use crate::queue::MutationQueue;
use crate::systems::combat::strike;

/// Index of the candidate nearest `from`, skipping visited ones and anything
/// farther than `max_dist_sq`. Strictly nearer wins; the first found wins a tie.
fn nearest(
    candidates: &[(Entity, Vec2)],
    visited: &[bool],
    from: Vec2,
    max_dist_sq: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, (_, position)) in candidates.iter().enumerate() {
        if visited[i] {
            continue;
        }
        let d = from.distance_squared(*position);
        if d > max_dist_sq {
            continue;
        }
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Build the chain: the asteroid nearest the pointer, then repeatedly the
/// nearest unvisited asteroid within `max_distance` of the last link.
/// Returns indices into `candidates` in visit order.
pub fn build_chain(
    candidates: &[(Entity, Vec2)],
    pointer: Vec2,
    max_targets: u32,
    max_distance: f32,
) -> Vec<usize> {
    let max_targets = max_targets as usize;
    let mut visited = vec![false; candidates.len()];
    let mut chain = Vec::with_capacity(max_targets.min(candidates.len()));
    if max_targets == 0 {
        return chain;
    }

    let Some(first) = nearest(candidates, &visited, pointer, f32::INFINITY) else {
        return chain;
    };
    visited[first] = true;
    chain.push(first);

    let max_dist_sq = max_distance * max_distance;
    while chain.len() < max_targets {
        let last = candidates[chain[chain.len() - 1]].1;
        match nearest(candidates, &visited, last, max_dist_sq) {
            Some(next) => {
                visited[next] = true;
                chain.push(next);
            }
            None => break,
        }
    }
    chain
}

pub fn run(
    world: &mut World,
    records: &mut SharedRecords,
    input: &InputState,
    rng: &mut ChaCha8Rng,
    queue: &MutationQueue,
    events: &mut FrameEvents,
) {
    let Some(pointer) = super::activate_targeted(SkillSlot::ChainLightning, records, input) else {
        return;
    };

    let candidates: Vec<(Entity, Vec2)> = world
        .query::<(&Asteroid, &Health, &Transform)>()
        .iter()
        .filter(|(entity, (_, health, _))| !health.is_dead() && !queue.is_pending_despawn(*entity))
        .map(|(entity, (_, _, transform))| (entity, transform.position))
        .collect();

    let chain = build_chain(
        &candidates,
        pointer,
        records.skills.chain_max_targets,
        records.skills.chain_max_distance,
    );

    let damage = records.skills.chain_damage;
    let mut hops = Vec::with_capacity(chain.len());
    for &i in &chain {
        let (entity, position) = candidates[i];
        if let Ok(mut health) = world.get::<&mut Health>(entity) {
            strike(
                &mut health,
                position,
                damage,
                DamageCategory::Skill,
                &records.crit,
                rng,
                events,
            );
        }
        hops.push(position);
    }

    let target = hops.first().copied().unwrap_or(pointer);
    events
        .skills
        .push(SkillEvent::new(SkillSlot::ChainLightning, SHIP_POSITION, target, 0.0).with_chain(&hops));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(n: usize, spacing: f32) -> (World, Vec<(Entity, Vec2)>) {
        let mut world = World::new();
        let candidates = (0..n)
            .map(|i| {
                let position = Vec2::new(i as f32 * spacing, 0.0);
                (world.spawn((Asteroid,)), position)
            })
            .collect();
        (world, candidates)
    }

    #[test]
    fn chain_follows_nearest_neighbour() {
        let (_world, candidates) = line_of(5, 1.0);
        let chain = build_chain(&candidates, Vec2::new(-0.2, 0.0), 4, 1.5);
        assert_eq!(chain, vec![0, 1, 2, 3]);
    }

    #[test]
    fn chain_stops_when_gap_exceeds_range() {
        let (_world, candidates) = line_of(5, 3.0);
        let chain = build_chain(&candidates, Vec2::new(6.0, 0.0), 4, 2.0);
        assert_eq!(chain, vec![2]);
    }

    #[test]
    fn chain_never_repeats_and_respects_cap() {
        let mut world = World::new();
        // A tight cluster where every asteroid is in range of every other.
        let candidates: Vec<(Entity, Vec2)> = (0..12)
            .map(|i| {
                let angle = i as f32 * 0.5;
                (world.spawn((Asteroid,)), Vec2::new(angle.cos(), angle.sin()) * 0.5)
            })
            .collect();
        for max_targets in 0..15 {
            let chain = build_chain(&candidates, Vec2::ZERO, max_targets, 5.0);
            assert_eq!(chain.len(), (max_targets as usize).min(candidates.len()));
            let mut seen = chain.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), chain.len(), "asteroid visited twice");
        }
    }

    #[test]
    fn exact_tie_keeps_first_found() {
        let (_world, mut candidates) = line_of(2, 2.0);
        candidates[0].1 = Vec2::new(-1.0, 0.0);
        candidates[1].1 = Vec2::new(1.0, 0.0);
        let chain = build_chain(&candidates, Vec2::ZERO, 1, 5.0);
        assert_eq!(chain, vec![0]);
    }
}
