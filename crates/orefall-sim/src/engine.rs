//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs world, the shared records, the purchase
//! state and the save manager. It processes player commands at tick
//! boundaries, runs every system in a fixed order, and builds `SimSnapshot`s.
//! Completely headless, so it can be driven deterministically from tests.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::World;
use tracing::{debug, info, trace, warn};

use orefall_core::commands::PlayerCommand;
use orefall_core::constants::DT;
use orefall_core::enums::{GamePhase, SkillSlot};
use orefall_core::events::FrameEvents;
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;
use orefall_core::state::SimSnapshot;
use orefall_core::types::SimTime;
use orefall_save::{SaveDocument, SaveManager};
use orefall_tree::{PurchaseReceipt, PurchaseRejection, PurchaseState, UpgradeGraph};

use crate::queue::MutationQueue;
use crate::rng::SystemRngs;
use crate::systems;
use crate::systems::mining::MiningClock;
use crate::systems::run_clock::RunProgress;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for every system's random stream. Same seed, same run.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Scales wall-clock pacing only.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

impl SimConfig {
    /// A config seeded from OS entropy, for normal play.
    pub fn from_entropy() -> Self {
        Self {
            seed: rand::random(),
            ..Default::default()
        }
    }
}

pub struct SimulationEngine {
    world: World,
    time: SimTime,
    time_scale: f64,
    paused: bool,
    /// `None` until bootstrapped. Systems do nothing while it is unset.
    records: Option<SharedRecords>,
    purchases: PurchaseState,
    graph: &'static UpgradeGraph,
    saves: Option<SaveManager>,
    input: InputState,
    events: FrameEvents,
    rngs: SystemRngs,
    mining_clock: MiningClock,
    mutations: MutationQueue,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create an engine with no records yet; call [`Self::bootstrap`] before
    /// expecting anything to happen.
    pub fn new(config: SimConfig) -> Self {
        let graph = UpgradeGraph::standard();
        Self {
            world: World::new(),
            time: SimTime::default(),
            time_scale: config.time_scale,
            paused: false,
            records: None,
            purchases: PurchaseState::new(graph),
            graph,
            saves: None,
            input: InputState::default(),
            events: FrameEvents::default(),
            rngs: SystemRngs::from_seed(config.seed),
            mining_clock: MiningClock::default(),
            mutations: MutationQueue::new(),
            command_queue: VecDeque::new(),
        }
    }

    /// Persist purchases and run results through `saves`.
    pub fn with_saves(mut self, saves: SaveManager) -> Self {
        self.graph = saves.graph();
        self.saves = Some(saves);
        self
    }

    /// Load the profile (or defaults without a save manager) and enter the
    /// upgrade screen.
    pub fn bootstrap(&mut self) {
        let doc = match &self.saves {
            Some(saves) => saves.load(),
            None => SaveDocument::fresh(self.graph),
        };
        let (mut records, purchases) = doc.restore(self.graph);
        records.game.phase = GamePhase::Upgrading;
        info!(
            credits = records.game.credits,
            level = records.run.current_level,
            owned = purchases.purchased_count(self.graph),
            "simulation bootstrapped"
        );
        self.records = Some(records);
        self.purchases = purchases;
    }

    /// `new` followed by `bootstrap`, without persistence.
    pub fn bootstrapped(config: SimConfig) -> Self {
        let mut engine = Self::new(config);
        engine.bootstrap();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    // --- Input ---

    pub fn set_pointer(&mut self, position: Vec2) {
        self.input.set_pointer(position);
    }

    pub fn clear_pointer(&mut self) {
        self.input.clear_pointer();
    }

    pub fn press_skill(&mut self, slot: SkillSlot) {
        self.input.press(slot);
    }

    // --- Ticking ---

    /// Advance one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.step(DT);
        self.snapshot()
    }

    /// Process commands and advance by `dt` seconds. Paused and
    /// un-bootstrapped engines only process commands.
    pub fn step(&mut self, dt: f32) {
        self.process_commands();
        if self.paused {
            return;
        }
        if self.records.is_none() {
            trace!("tick skipped, records not bootstrapped");
            return;
        }
        self.run_systems(dt);
        self.time.advance(dt);
    }

    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.records.as_ref(),
            self.paused,
        )
    }

    /// Take every notification emitted since the last drain.
    pub fn drain_events(&mut self) -> FrameEvents {
        std::mem::take(&mut self.events)
    }

    // --- Economy ---

    /// Try to buy an upgrade node. Successful purchases are saved at once.
    pub fn purchase(&mut self, node_id: &str) -> Result<PurchaseReceipt, PurchaseRejection> {
        let Some(records) = self.records.as_mut() else {
            warn!(node = node_id, "purchase before bootstrap");
            return Err(PurchaseRejection::Unavailable);
        };
        let receipt = self.graph.purchase(node_id, &mut self.purchases, records)?;
        self.persist();
        Ok(receipt)
    }

    /// Write the current profile through the save manager, if any. Failures
    /// are logged by the manager; in-memory state stays authoritative.
    pub fn persist(&self) {
        let (Some(saves), Some(records)) = (&self.saves, &self.records) else {
            return;
        };
        let doc = SaveDocument::capture(records, &self.purchases);
        if saves.save(&doc).is_err() {
            debug!("profile kept in memory until the next save");
        }
    }

    // --- Accessors ---

    pub fn phase(&self) -> Option<GamePhase> {
        self.records.as_ref().map(|r| r.game.phase)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn records(&self) -> Option<&SharedRecords> {
        self.records.as_ref()
    }

    pub fn purchases(&self) -> &PurchaseState {
        &self.purchases
    }

    pub fn graph(&self) -> &'static UpgradeGraph {
        self.graph
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn records_mut(&mut self) -> Option<&mut SharedRecords> {
        self.records.as_mut()
    }

    // --- Commands ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                let Some(records) = self.records.as_mut() else {
                    return;
                };
                if matches!(records.game.phase, GamePhase::GameOver | GamePhase::Upgrading) {
                    self.world.clear();
                    self.mutations = MutationQueue::new();
                    self.mining_clock.reset();
                    self.input.reset_presses();
                    records.reset_for_run();
                    info!(level = records.run.current_level, "run started");
                }
            }
            PlayerCommand::OpenUpgrades => {
                if let Some(records) = self.records.as_mut() {
                    if records.game.phase == GamePhase::GameOver {
                        records.game.phase = GamePhase::Upgrading;
                    }
                }
            }
            PlayerCommand::Purchase { node_id } => {
                let between_runs = matches!(
                    self.phase(),
                    Some(GamePhase::GameOver | GamePhase::Upgrading)
                );
                if between_runs {
                    let _ = self.purchase(&node_id);
                } else {
                    debug!(node = %node_id, "purchase ignored during a run");
                }
            }
            PlayerCommand::Pause => self.paused = true,
            PlayerCommand::Resume => self.paused = false,
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = (scale as f64).clamp(0.0, 4.0);
            }
        }
    }

    // --- Pipeline ---

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let Some(records) = self.records.as_mut() else {
            return;
        };
        let world = &mut self.world;
        let queue = &mut self.mutations;
        let rngs = &mut self.rngs;
        let events = &mut self.events;

        // 0. Run clock (phase transitions)
        let progress = systems::run_clock::run(world, records, queue, dt);
        let phase = records.game.phase;
        let live = phase == GamePhase::Playing;

        if live {
            // 1. Spawn
            systems::spawner::run(
                world,
                &mut records.spawn_timer,
                &records.run,
                &mut rngs.spawn,
                queue,
                dt,
            );
            // 2. Movement
            systems::movement::run(world, dt);
            // 3. Bounds cull
            systems::movement::cull_out_of_bounds(world, queue);
        }

        // 4. Cooldown clock, overcharge and combo decay
        systems::cooldown::run(records, dt);

        if live {
            // 5. Skills; all read the press flags before the reset below
            systems::skills::laser::run(world, records, &self.input, &mut rngs.laser, queue, events);
            systems::skills::chain::run(world, records, &self.input, &mut rngs.chain, queue, events);
            systems::skills::emp::run(world, records, &self.input, &mut rngs.emp, queue, events);
            systems::skills::overcharge::run(records, &self.input, events);
        }

        // 6. Input reset
        systems::cooldown::reset_input(&mut self.input);

        if live {
            // 7. Mining tick damage
            systems::mining::run(
                world,
                &mut self.mining_clock,
                records,
                &self.input,
                &mut rngs.mining,
                queue,
                events,
                dt,
            );
            // 8. Burning DoT
            systems::dot::run(world, &records.crit, &mut rngs.dot, queue, events, dt);
        }

        // 9. Mineral drops for the dead
        systems::minerals::spawn_on_death(
            world,
            &mut records.bonus,
            &mut rngs.minerals,
            queue,
            events,
        );
        // 10. Destruction
        systems::cleanup::run(world, queue);

        if matches!(phase, GamePhase::Playing | GamePhase::Collecting) {
            // 11. Mineral pull
            systems::minerals::pull(world, dt);
            // 12. Collection
            systems::minerals::collect(world, &mut records.game, queue, events);
        }

        // 13. Deferred mutation flush
        let stats = queue.flush(world);
        trace!(
            tick = self.time.tick,
            spawned = stats.spawned,
            despawned = stats.despawned,
            modified = stats.modified,
            "mutations flushed"
        );

        if progress == RunProgress::Completed {
            self.persist();
        }
    }
}
