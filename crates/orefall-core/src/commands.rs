//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Phase and economy actions. Per-frame pointer and skill input go through
/// `InputState` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Begin a new run from `GameOver` or `Upgrading`.
    StartRun,
    /// Move from `GameOver` to the upgrade screen.
    OpenUpgrades,
    /// Attempt to buy an upgrade graph node.
    Purchase { node_id: String },
    /// Freeze the simulation.
    Pause,
    /// Resume after a pause.
    Resume,
    /// Set time scale (1.0 = normal).
    SetTimeScale { scale: f32 },
}
