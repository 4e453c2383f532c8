//! Snapshot system: reads the field and session and builds a GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use frogbox_core::components::{Frog, FrogStatus};
use frogbox_core::enums::{GamePhase, ResolutionPhase};
use frogbox_core::events::{PresentationCue, SessionEvent};
use frogbox_core::state::{FrogView, GameStateSnapshot};
use frogbox_core::types::{Position, SimTime, WorldRect};

use crate::field::Field;
use crate::session::Session;

/// Build a complete GameStateSnapshot from the current state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    field: &Field,
    time: &SimTime,
    phase: GamePhase,
    resolution_phase: ResolutionPhase,
    session: &Session,
    selection: Option<WorldRect>,
    cues: Vec<PresentationCue>,
    session_events: Vec<SessionEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        resolution_phase,
        session: session.view(),
        frogs: build_frogs(field),
        selection,
        cues,
        session_events,
    }
}

/// Build FrogView list for every live frog, sorted by id.
fn build_frogs(field: &Field) -> Vec<FrogView> {
    let mut frogs: Vec<FrogView> = field
        .world()
        .query::<(&Frog, &FrogStatus, &Position)>()
        .iter()
        .filter(|(entity, _)| field.is_alive(*entity))
        .map(|(_, (frog, status, pos))| FrogView {
            id: frog.id,
            class: frog.class,
            color: frog.color,
            position: *pos,
            frozen: status.frozen,
            confirmed: status.confirmed,
            isolated: status.isolated,
        })
        .collect();

    frogs.sort_by_key(|f| f.id);
    frogs
}
