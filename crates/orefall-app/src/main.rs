use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use orefall_app::autoplay::Autoplayer;
use orefall_app::game_loop::{spawn_game_loop, tick_duration, LoopConfig};
use orefall_app::options::RunOptions;
use orefall_app::state::GameLoopCommand;
use orefall_core::commands::PlayerCommand;
use orefall_sim::SimConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let options = RunOptions::parse();
    init_tracing();

    let mut sim = match options.seed {
        Some(seed) => SimConfig {
            seed,
            ..Default::default()
        },
        None => SimConfig::from_entropy(),
    };
    sim.time_scale = options.speed;
    info!(
        seed = sim.seed,
        runs = options.runs,
        save_dir = ?options.save_dir(),
        "starting orefall"
    );

    let config = LoopConfig {
        sim,
        save_dir: options.save_dir().map(Path::to_path_buf),
    };
    let (handle, join) = match spawn_game_loop(config) {
        Ok(spawned) => spawned,
        Err(err) => {
            error!(%err, "failed to spawn game loop thread");
            return ExitCode::FAILURE;
        }
    };
    handle.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetTimeScale {
        scale: options.speed as f32,
    }));

    let mut player = Autoplayer::new(options.runs);
    let poll = tick_duration(options.speed).max(Duration::from_millis(1));
    'drive: loop {
        std::thread::sleep(poll);
        let Some(snapshot) = handle.snapshot() else {
            continue;
        };
        for command in player.decide(&snapshot) {
            let shutdown = command == GameLoopCommand::Shutdown;
            if !handle.send(command) {
                warn!("game loop stopped unexpectedly");
                break 'drive;
            }
            if shutdown {
                break 'drive;
            }
        }
    }

    if join.join().is_err() {
        error!("game loop thread panicked");
        return ExitCode::FAILURE;
    }
    info!(runs = player.runs_completed(), "done");
    ExitCode::SUCCESS
}
