//! Game loop thread: runs the simulation engine at 30Hz and emits snapshots.
//!
//! The engine is created inside this thread so it never crosses threads after
//! construction. Commands arrive via `mpsc` channel. Each snapshot is handed to
//! a [`SnapshotSink`] and stored in shared state for synchronous polling.

use std::io::Write;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use frogbox_core::constants::TICK_RATE;
use frogbox_core::events::SessionEvent;
use frogbox_core::state::GameStateSnapshot;
use frogbox_sim::engine::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::state::{LoopHandle, LoopMessage};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Receives every snapshot the loop produces.
pub trait SnapshotSink: Send {
    fn emit(&mut self, snapshot: &GameStateSnapshot);
}

/// Writes each session event as one JSON object per line.
pub struct JsonLinesSink<W> {
    out: W,
}

#[derive(Serialize)]
struct EventLine<'a> {
    tick: u64,
    #[serde(flatten)]
    event: &'a SessionEvent,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SnapshotSink for JsonLinesSink<W> {
    fn emit(&mut self, snapshot: &GameStateSnapshot) {
        if snapshot.session_events.is_empty() {
            return;
        }
        for event in &snapshot.session_events {
            let line = EventLine {
                tick: snapshot.time.tick,
                event,
            };
            let written = serde_json::to_string(&line)
                .map_err(AppError::Encode)
                .and_then(|json| writeln!(self.out, "{json}").map_err(AppError::from));
            if let Err(err) = written {
                warn!(%err, "dropping session event");
            }
        }
        if let Err(err) = self.out.flush() {
            warn!(%err, "event output flush failed");
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the loop's inbox together with its thread.
pub fn spawn_game_loop(
    config: SimConfig,
    sink: Box<dyn SnapshotSink>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<LoopHandle, AppError> {
    let (inbox, messages) = mpsc::channel::<LoopMessage>();

    let thread = std::thread::Builder::new()
        .name("frogbox-game-loop".into())
        .spawn(move || {
            run_game_loop(config, sink, messages, &latest_snapshot);
        })?;

    Ok(LoopHandle { inbox, thread })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    mut sink: Box<dyn SnapshotSink>,
    messages: mpsc::Receiver<LoopMessage>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(seed = config.seed, "game loop started");
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match messages.try_recv() {
                Ok(LoopMessage::Command(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(LoopMessage::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Hand the snapshot to the output
        sink.emit(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frogbox_core::commands::PlayerCommand;
    use frogbox_core::enums::{FailureCause, GamePhase};

    struct Capture(Arc<Mutex<Vec<SessionEvent>>>);

    impl SnapshotSink for Capture {
        fn emit(&mut self, snapshot: &GameStateSnapshot) {
            self.0
                .lock()
                .unwrap()
                .extend(snapshot.session_events.iter().copied());
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopMessage>();

        tx.send(LoopMessage::Command(PlayerCommand::StartLevel)).unwrap();
        tx.send(LoopMessage::Command(PlayerCommand::Pause)).unwrap();
        tx.send(LoopMessage::Shutdown).unwrap();

        let messages: Vec<_> = rx.try_iter().collect();
        assert_eq!(messages.len(), 3);
        assert!(matches!(
            messages[0],
            LoopMessage::Command(PlayerCommand::StartLevel)
        ));
        assert!(matches!(messages[1], LoopMessage::Command(PlayerCommand::Pause)));
        assert!(matches!(messages[2], LoopMessage::Shutdown));
    }

    #[test]
    fn test_json_lines_sink_writes_one_line_per_event() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let mut snapshot = GameStateSnapshot::default();
        snapshot.time.tick = 7;
        snapshot.session_events = vec![
            SessionEvent::HealthChanged { health: 2 },
            SessionEvent::Failure {
                cause: FailureCause::TimeOut,
            },
        ];
        sink.emit(&snapshot);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tick"], 7);
        assert_eq!(first["type"], "HealthChanged");
        assert_eq!(first["health"], 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["cause"], "TimeOut");
    }

    #[test]
    fn test_json_lines_sink_skips_quiet_ticks() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&GameStateSnapshot::default());
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = SimulationEngine::new(SimConfig::default());

        engine.queue_command(PlayerCommand::StartLevel);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Active);

        engine.queue_command(PlayerCommand::Pause);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_tick = snap.time.tick;

        // Tick while paused: time should not advance
        let snap = engine.tick();
        assert_eq!(snap.time.tick, paused_tick);

        engine.queue_command(PlayerCommand::Resume);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.tick > paused_tick);
    }

    #[test]
    fn test_loop_thread_runs_and_shuts_down() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let latest = Arc::new(Mutex::new(None));
        let handle = spawn_game_loop(
            SimConfig::default(),
            Box::new(Capture(events.clone())),
            latest.clone(),
        )
        .unwrap();

        handle
            .inbox
            .send(LoopMessage::Command(PlayerCommand::StartLevel))
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));
        handle.inbox.send(LoopMessage::Shutdown).unwrap();
        handle.thread.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().expect("at least one tick");
        assert_eq!(snapshot.phase, GamePhase::Active);
        assert!(events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, SessionEvent::RemainingCountChanged { .. })));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 30Hz = 33.333ms per tick
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
