//! Command-line and environment options for the headless runner.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Environment variable naming the save directory.
pub const SAVE_DIR_ENV_VAR: &str = "OREFALL_SAVE_DIR";

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "orefall", about = "Headless orefall runner driven by a scripted player")]
pub struct RunOptions {
    /// Runs to play before exiting.
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Fixed seed; without it one is drawn from OS entropy.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Wall-clock speed-up, clamped by the engine.
    #[arg(long, value_name = "X", default_value_t = 1.0)]
    pub speed: f64,

    /// Directory for the save file and its fallback.
    #[arg(long, value_name = "DIR", env = SAVE_DIR_ENV_VAR, conflicts_with = "no_save")]
    pub save_dir: Option<PathBuf>,

    /// Play without persistence.
    #[arg(long)]
    pub no_save: bool,
}

impl RunOptions {
    /// Where to persist the profile, if anywhere.
    pub fn save_dir(&self) -> Option<&Path> {
        if self.no_save {
            return None;
        }
        self.save_dir.as_deref()
    }
}
