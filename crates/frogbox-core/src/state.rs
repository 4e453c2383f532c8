//! Game state snapshot: the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{PresentationCue, SessionEvent};
use crate::types::{FrogId, Position, SimTime, WorldRect};

/// Complete game state broadcast to collaborators after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub resolution_phase: ResolutionPhase,
    pub session: SessionView,
    pub frogs: Vec<FrogView>,
    /// Drag rectangle while a gesture is in progress.
    pub selection: Option<WorldRect>,
    pub cues: Vec<PresentationCue>,
    pub session_events: Vec<SessionEvent>,
}

/// A live frog on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrogView {
    pub id: FrogId,
    pub class: FrogClass,
    pub color: FrogColor,
    pub position: Position,
    pub frozen: bool,
    pub confirmed: bool,
    pub isolated: bool,
}

/// Session counters for the HUD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub health: u32,
    pub initial_health: u32,
    pub remaining: u32,
    pub total: u32,
    pub time_remaining_secs: f64,
    pub settling: bool,
    pub outcome: Option<SessionOutcome>,
    pub revives_used: u32,
}
