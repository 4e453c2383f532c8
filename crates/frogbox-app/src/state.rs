//! What the runner keeps between stdin lines: the loop's inbox and thread,
//! and the last snapshot the loop published.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use frogbox_core::commands::PlayerCommand;
use frogbox_core::state::GameStateSnapshot;

/// Messages accepted by the game loop thread.
#[derive(Debug)]
pub enum LoopMessage {
    Command(PlayerCommand),
    Shutdown,
}

/// A running game loop.
pub struct LoopHandle {
    pub inbox: mpsc::Sender<LoopMessage>,
    pub thread: JoinHandle<()>,
}

#[derive(Default)]
pub struct RunnerState {
    /// Present between `start_simulation` and `stop_simulation`.
    pub active: Mutex<Option<LoopHandle>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl RunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.lock().is_ok_and(|active| active.is_some())
    }
}
