//! Command bridge between the input layer and the game loop thread.
//!
//! Input arrives as JSON lines, one `PlayerCommand` per line. These functions
//! parse them and forward them to the game loop through the shared state.

use tracing::{debug, info};

use frogbox_core::commands::PlayerCommand;
use frogbox_core::state::GameStateSnapshot;
use frogbox_sim::engine::SimConfig;

use crate::error::AppError;
use crate::game_loop::{self, SnapshotSink};
use crate::state::{LoopMessage, RunnerState};

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<PlayerCommand>, AppError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| AppError::Command {
            line: trimmed.to_string(),
            source,
        })
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &RunnerState,
    config: SimConfig,
    sink: Box<dyn SnapshotSink>,
) -> Result<(), AppError> {
    let mut active = state.active.lock().map_err(|_| AppError::LockPoisoned)?;
    if active.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    *active = Some(game_loop::spawn_game_loop(
        config,
        sink,
        state.latest_snapshot.clone(),
    )?);
    info!("simulation started");
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &RunnerState, command: PlayerCommand) -> Result<(), AppError> {
    let active = state.active.lock().map_err(|_| AppError::LockPoisoned)?;
    let handle = active.as_ref().ok_or(AppError::NotRunning)?;
    debug!(?command, "forwarding command");
    handle
        .inbox
        .send(LoopMessage::Command(command))
        .map_err(|_| AppError::ChannelClosed)
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &RunnerState) -> Result<Option<GameStateSnapshot>, AppError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| AppError::LockPoisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn stop_simulation(state: &RunnerState) -> Result<(), AppError> {
    let handle = state
        .active
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take()
        .ok_or(AppError::NotRunning)?;
    // A loop that already exited has dropped its receiver.
    let _ = handle.inbox.send(LoopMessage::Shutdown);
    handle.thread.join().map_err(|_| AppError::ChannelClosed)?;
    info!("simulation stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use frogbox_core::enums::GamePhase;

    use super::*;
    use crate::game_loop::JsonLinesSink;

    #[test]
    fn test_parse_command_variants() {
        let cmd = parse_command(r#"{"type":"EndSelection","x":10.0,"y":20.5}"#)
            .unwrap()
            .unwrap();
        assert!(matches!(cmd, PlayerCommand::EndSelection { x, y } if x == 10.0 && y == 20.5));

        let cmd = parse_command("  {\"type\":\"StartLevel\"}  ").unwrap().unwrap();
        assert!(matches!(cmd, PlayerCommand::StartLevel));
    }

    #[test]
    fn test_parse_command_skips_blank_and_comments() {
        assert!(parse_command("").unwrap().is_none());
        assert!(parse_command("   ").unwrap().is_none());
        assert!(parse_command("# drag the bottom row").unwrap().is_none());
    }

    #[test]
    fn test_parse_command_rejects_garbage() {
        let err = parse_command(r#"{"type":"Explode"}"#).unwrap_err();
        assert!(matches!(err, AppError::Command { .. }));
        assert!(parse_command("not json").is_err());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = RunnerState::new();
        let err = send_command(&state, PlayerCommand::Pause).unwrap_err();
        assert!(matches!(err, AppError::NotRunning));
        assert!(matches!(stop_simulation(&state), Err(AppError::NotRunning)));
    }

    #[test]
    fn test_start_send_stop() {
        let state = RunnerState::new();
        start_simulation(
            &state,
            SimConfig::default(),
            Box::new(JsonLinesSink::new(std::io::sink())),
        )
        .unwrap();
        assert!(state.is_running());

        let again = start_simulation(
            &state,
            SimConfig::default(),
            Box::new(JsonLinesSink::new(std::io::sink())),
        );
        assert!(matches!(again, Err(AppError::AlreadyRunning)));

        send_command(&state, PlayerCommand::StartLevel).unwrap();
        std::thread::sleep(Duration::from_millis(200));
        stop_simulation(&state).unwrap();
        assert!(!state.is_running());

        let snapshot = get_snapshot(&state).unwrap().expect("loop ticked");
        assert_eq!(snapshot.phase, GamePhase::Active);
    }
}
