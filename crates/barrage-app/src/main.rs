//! Demo host: plays one level with the autopilot and logs the result.
//!
//! Usage:
//!   cargo run -p barrage-app -- [level.json] [--seed N] [--players N]
//!   cargo run -p barrage-app -- --realtime

use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use barrage_app::autopilot::Autopilot;
use barrage_app::game_loop::{run_headless, spawn_game_loop};
use barrage_app::sinks;
use barrage_app::state::GameLoopCommand;
use barrage_core::config::LevelConfig;
use barrage_core::constants::TICK_RATE;
use barrage_core::enums::GamePhase;
use barrage_sim::engine::{SimConfig, SimulationEngine};

const DEMO_LEVEL: &str = include_str!("../levels/demo.json");

#[derive(Parser)]
#[command(name = "barrage")]
#[command(about = "Run a shoot-'em-up level with a scripted pilot")]
struct Args {
    /// Level JSON file; the bundled demo level when omitted
    level: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1)]
    players: usize,
    /// Pace the simulation at the real tick rate on a game loop thread
    #[arg(long)]
    realtime: bool,
    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 180)]
    max_seconds: u64,
}

fn load_level(path: Option<&PathBuf>) -> Result<LevelConfig> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DEMO_LEVEL.to_string(),
    };
    LevelConfig::from_json(&json).context("invalid level file")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let level = load_level(args.level.as_ref())?;
    let config = SimConfig {
        seed: args.seed,
        players: args.players,
        ..Default::default()
    };
    let max_ticks = args.max_seconds * TICK_RATE as u64;
    let pilot = Autopilot::new(args.players);

    tracing::info!(level = %level.name, seed = args.seed, players = args.players, "starting");

    if args.realtime {
        run_realtime(level, config, &pilot, Duration::from_secs(args.max_seconds))
    } else {
        let mut engine = SimulationEngine::with_services(config, sinks::logging_services());
        engine.start_level(level);
        let last = run_headless(&mut engine, max_ticks, |snapshot| pilot.commands(snapshot));
        tracing::info!(tick = last.time.tick, phase = ?last.phase, "stopped");
        report(engine.result())
    }
}

fn run_realtime(
    level: LevelConfig,
    config: SimConfig,
    pilot: &Autopilot,
    limit: Duration,
) -> Result<()> {
    let handle = spawn_game_loop(level, config).context("failed to start game loop")?;
    let deadline = Instant::now() + limit;

    while Instant::now() < deadline {
        let snapshot = match handle.snapshots.recv_timeout(Duration::from_secs(1)) {
            Ok(snapshot) => snapshot,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if matches!(snapshot.phase, GamePhase::LevelComplete | GamePhase::GameOver) {
            tracing::info!(
                tick = snapshot.time.tick,
                phase = ?snapshot.phase,
                score = ?snapshot.hud.players.iter().map(|p| p.score).collect::<Vec<_>>(),
                coins = snapshot.hud.coins,
                "level over"
            );
            break;
        }
        for command in pilot.commands(&snapshot) {
            if handle.commands.send(command.into()).is_err() {
                break;
            }
        }
    }

    // The loop may already be gone; a failed send just means there is nothing to stop.
    let _ = handle.commands.send(GameLoopCommand::Shutdown);
    drop(handle.snapshots);
    handle
        .thread
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))
}

fn report(result: Option<&barrage_core::state::LevelResult>) -> Result<()> {
    match result {
        Some(result) => {
            let json = serde_json::to_string(result)?;
            tracing::info!(cleared = result.cleared, "level result: {json}");
        }
        None => tracing::warn!("level still running when the tick limit was reached"),
    }
    Ok(())
}
