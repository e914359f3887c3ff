//! Run clock: advances the run timer and drives the end-of-run phases.

use hecs::World;
use tracing::info;

use orefall_core::components::Asteroid;
use orefall_core::enums::GamePhase;
use orefall_core::records::SharedRecords;

use crate::queue::MutationQueue;
use crate::world_setup::mineral_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunProgress {
    Running,
    /// The timer ran out this tick; the field is being cleared.
    Expired,
    /// The last mineral is in and the run has been banked.
    Completed,
    Idle,
}

pub fn run(
    world: &World,
    records: &mut SharedRecords,
    queue: &mut MutationQueue,
    dt: f32,
) -> RunProgress {
    match records.game.phase {
        GamePhase::Playing => {
            records.game.run_timer += dt;
            if records.game.run_timer < records.run.run_duration {
                return RunProgress::Running;
            }
            records.game.phase = GamePhase::Collecting;
            // Leftover asteroids leave without dropping anything.
            let mut cleared = 0;
            for (entity, _) in world.query::<&Asteroid>().iter() {
                queue.despawn(entity);
                cleared += 1;
            }
            info!(
                run_timer = records.game.run_timer,
                cleared, "run timer expired, collecting"
            );
            RunProgress::Expired
        }
        GamePhase::Collecting => {
            if mineral_count(world) > 0 {
                return RunProgress::Running;
            }
            records.game.phase = GamePhase::GameOver;
            let next = records.run.current_level + 1;
            records.run.set_level(next);
            info!(
                credits = records.game.credits,
                level = records.run.current_level,
                "run complete"
            );
            RunProgress::Completed
        }
        GamePhase::GameOver | GamePhase::Upgrading => RunProgress::Idle,
    }
}
