//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::FrogId;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Selection gesture (screen coordinates) ---
    /// Drag started at a screen point.
    BeginSelection { x: f64, y: f64 },
    /// Drag moved to a screen point.
    UpdateSelection { x: f64, y: f64 },
    /// Drag released at a screen point. Resolves the selection.
    EndSelection { x: f64, y: f64 },
    /// Drag abandoned without resolving.
    CancelSelection,

    // --- Buffs ---
    /// Freeze every live frog's color cycle for a duration.
    FreezeAll { duration_secs: f64 },
    /// Set or clear isolation on a single frog.
    SetIsolated { frog: FrogId, isolated: bool },

    // --- Level control ---
    /// Start (or restart) the configured level.
    StartLevel,
    /// Full-health restore after a failure: respawns a fresh field.
    Revive,
    /// Return to the main menu.
    ReturnToMenu,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f64 },
}
