//! Game loop thread: runs the simulation engine at `TICK_RATE` and streams
//! snapshots back to the host.
//!
//! The engine is created inside the thread so it never crosses threads.
//! Commands arrive through an `mpsc` channel and are applied at the next
//! tick boundary.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use barrage_core::commands::PlayerCommand;
use barrage_core::config::LevelConfig;
use barrage_core::constants::TICK_RATE;
use barrage_core::enums::GamePhase;
use barrage_core::state::GameStateSnapshot;
use barrage_sim::engine::{SimConfig, SimulationEngine};

use crate::sinks;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Both ends of a running game loop.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<GameStateSnapshot>,
    pub thread: std::thread::JoinHandle<()>,
}

/// Start `level` on a new game loop thread with log-backed services.
pub fn spawn_game_loop(level: LevelConfig, config: SimConfig) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<GameStateSnapshot>();

    let thread = std::thread::Builder::new()
        .name("barrage-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::with_services(config, sinks::logging_services());
            engine.start_level(level);
            run_game_loop(&mut engine, &cmd_rx, &snap_tx);
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        thread,
    })
}

/// Runs until `Shutdown`, a disconnected command channel, or a dropped
/// snapshot receiver.
fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    snap_tx: &mpsc::Sender<GameStateSnapshot>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Command(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::StartLevel(level)) => engine.start_level(*level),
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (the engine handles pause and level end itself)
        let snapshot = engine.tick();
        if snap_tx.send(snapshot).is_err() {
            return;
        }

        // 3. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset instead of spiralling into catch-up.
            tracing::debug!(behind = ?(now - next_tick_time), "game loop fell behind");
            next_tick_time = now;
        }
    }
}

/// Drive `engine` as fast as possible, feeding it commands from `pilot`
/// after each snapshot, until the level ends or `max_ticks` elapse.
pub fn run_headless(
    engine: &mut SimulationEngine,
    max_ticks: u64,
    mut pilot: impl FnMut(&GameStateSnapshot) -> Vec<PlayerCommand>,
) -> GameStateSnapshot {
    let mut snapshot = engine.tick();
    while engine.time().tick < max_ticks && !level_over(&snapshot) {
        engine.queue_commands(pilot(&snapshot));
        snapshot = engine.tick();
    }
    snapshot
}

fn level_over(snapshot: &GameStateSnapshot) -> bool {
    matches!(snapshot.phase, GamePhase::LevelComplete | GamePhase::GameOver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::types::PlayerId;

    fn quiet_level() -> LevelConfig {
        LevelConfig {
            formation_width: 2,
            formation_height: 1,
            shooting_frequency_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(PlayerCommand::Fire { player: PlayerId(1) }.into())
            .unwrap();
        tx.send(GameLoopCommand::Command(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<GameLoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Command(PlayerCommand::Fire { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Command(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_streams_snapshots_and_shuts_down() {
        let handle = spawn_game_loop(quiet_level(), SimConfig::default()).unwrap();
        let first = handle
            .snapshots
            .recv_timeout(Duration::from_secs(2))
            .unwrap();
        assert_eq!(first.phase, GamePhase::Active);

        handle.commands.send(GameLoopCommand::Shutdown).unwrap();
        handle.thread.join().unwrap();
    }

    #[test]
    fn test_pause_through_channel() {
        let handle = spawn_game_loop(quiet_level(), SimConfig::default()).unwrap();
        handle
            .commands
            .send(GameLoopCommand::Command(PlayerCommand::Pause))
            .unwrap();

        let paused = handle
            .snapshots
            .iter()
            .take(30)
            .find(|s| s.phase == GamePhase::Paused);
        assert!(paused.is_some());

        handle.commands.send(GameLoopCommand::Shutdown).unwrap();
        handle.thread.join().unwrap();
    }

    #[test]
    fn test_headless_stops_at_tick_limit() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.start_level(quiet_level());
        let snapshot = run_headless(&mut engine, 30, |_| Vec::new());
        assert_eq!(snapshot.time.tick, 30);
        assert_eq!(snapshot.phase, GamePhase::Active);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.start_level(LevelConfig::default());
        let snapshot = run_headless(&mut engine, 50, |_| Vec::new());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"drawables\""));
    }
}
