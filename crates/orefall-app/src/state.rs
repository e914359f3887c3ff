//! State shared between the game loop thread and its driver.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use glam::Vec2;

use orefall_core::commands::PlayerCommand;
use orefall_core::enums::SkillSlot;
use orefall_core::state::SimSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Move the pointer, or take it off the playfield with `None`.
    Pointer(Option<Vec2>),
    /// Press a skill key for the next tick.
    PressSkill(SkillSlot),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle held by whoever drives the loop.
///
/// The sender lives behind a `Mutex` so the handle stays `Sync`; the latest
/// snapshot is shared with the loop thread, which overwrites it every tick.
pub struct LoopHandle {
    command_tx: Mutex<mpsc::Sender<GameLoopCommand>>,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
}

impl LoopHandle {
    pub fn new(
        command_tx: mpsc::Sender<GameLoopCommand>,
        latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
    ) -> Self {
        Self {
            command_tx: Mutex::new(command_tx),
            latest_snapshot,
        }
    }

    /// Forward a command. Returns false once the loop has gone away.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(tx) => tx.send(command).is_ok(),
            Err(_) => false,
        }
    }

    /// Latest snapshot published by the loop, if it has ticked yet.
    pub fn snapshot(&self) -> Option<SimSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_reports_closed_loop() {
        let (tx, rx) = mpsc::channel();
        let handle = LoopHandle::new(tx, Arc::new(Mutex::new(None)));
        assert!(handle.snapshot().is_none());
        assert!(handle.send(GameLoopCommand::Shutdown));
        assert_eq!(rx.try_recv().unwrap(), GameLoopCommand::Shutdown);

        drop(rx);
        assert!(!handle.send(GameLoopCommand::Shutdown));
    }
}
