//! Game loop thread: runs the simulation engine at the fixed tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread, so it and its save stores never
//! cross threads. Commands arrive via an `mpsc` channel; the latest snapshot
//! is stored in shared state for polling.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use orefall_core::constants::TICK_RATE;
use orefall_core::state::SimSnapshot;
use orefall_save::SaveManager;
use orefall_sim::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, LoopHandle};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Default)]
pub struct LoopConfig {
    pub sim: SimConfig,
    /// Directory for the save file and its fallback. `None` plays without
    /// persistence.
    pub save_dir: Option<PathBuf>,
}

/// Build and bootstrap the engine described by `config`.
pub fn build_engine(config: &LoopConfig) -> SimulationEngine {
    let engine = SimulationEngine::new(config.sim.clone());
    let mut engine = match &config.save_dir {
        Some(dir) => engine.with_saves(SaveManager::in_dir(dir)),
        None => engine,
    };
    engine.bootstrap();
    engine
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: LoopConfig) -> io::Result<(LoopHandle, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let join = std::thread::Builder::new()
        .name("orefall-game-loop".into())
        .spawn(move || {
            let engine = build_engine(&config);
            run_game_loop(engine, cmd_rx, &shared);
        })?;

    Ok((LoopHandle::new(cmd_tx, latest_snapshot), join))
}

/// Apply one loop message. Returns false when the loop should stop.
pub fn apply_command(engine: &mut SimulationEngine, command: GameLoopCommand) -> bool {
    match command {
        GameLoopCommand::PlayerCommand(cmd) => engine.queue_command(cmd),
        GameLoopCommand::Pointer(Some(position)) => engine.set_pointer(position),
        GameLoopCommand::Pointer(None) => engine.clear_pointer(),
        GameLoopCommand::PressSkill(slot) => engine.press_skill(slot),
        GameLoopCommand::Shutdown => return false,
    }
    true
}

/// Sleep length for one tick at `time_scale`.
pub fn tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if !apply_command(&mut engine, command) {
                        info!(tick = engine.time().tick, "game loop shutting down");
                        engine.persist();
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause internally)
        let snapshot = engine.tick();

        // 3. Drain notifications; a presentation layer would consume these
        let events = engine.drain_events();
        if !events.is_empty() {
            debug!(
                damage = events.damage.len(),
                destroyed = events.destruction.len(),
                skills = events.skills.len(),
                collected = events.collection.len(),
                "frame events"
            );
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = tick_duration(engine.time_scale());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use orefall_core::commands::PlayerCommand;
    use orefall_core::enums::{GamePhase, SkillSlot};

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartRun))
            .unwrap();
        tx.send(GameLoopCommand::PressSkill(SkillSlot::EmpPulse))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                GameLoopCommand::PlayerCommand(PlayerCommand::StartRun),
                GameLoopCommand::PressSkill(SkillSlot::EmpPulse),
                GameLoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_apply_command_drives_engine() {
        let mut engine = build_engine(&LoopConfig::default());
        assert!(apply_command(
            &mut engine,
            GameLoopCommand::PlayerCommand(PlayerCommand::StartRun)
        ));
        assert!(apply_command(
            &mut engine,
            GameLoopCommand::Pointer(Some(Vec2::new(1.0, 2.0)))
        ));
        assert!(!apply_command(&mut engine, GameLoopCommand::Shutdown));

        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = build_engine(&LoopConfig::default());
        engine.queue_command(PlayerCommand::StartRun);

        // Run enough ticks to populate entities
        for _ in 0..300 {
            engine.tick();
        }

        let snapshot = engine.tick();
        assert!(!snapshot.asteroids.is_empty());
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_scales() {
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
        let half = tick_duration(2.0).as_secs_f64();
        assert!((half - TICK_DURATION.as_secs_f64() / 2.0).abs() < 1e-6);
        assert_eq!(tick_duration(0.0), TICK_DURATION);
    }

    #[test]
    fn test_loop_thread_publishes_and_stops() {
        let (handle, join) = spawn_game_loop(LoopConfig::default()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.snapshot().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(handle.snapshot().is_some());

        assert!(handle.send(GameLoopCommand::Shutdown));
        join.join().unwrap();
    }
}
