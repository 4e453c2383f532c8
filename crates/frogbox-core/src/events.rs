//! Events emitted by the simulation for presentation and UI collaborators.
//!
//! Both kinds are fire-and-forget: the simulation never waits on them.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{FrogId, Position, WorldRect};

/// Visual and audio cues for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationCue {
    /// Frogs currently under the drag rectangle.
    SelectingIndicator { rect: WorldRect, frogs: Vec<FrogId> },
    /// Frogs locked in by a released selection.
    ConfirmIndicator { frogs: Vec<FrogId> },
    /// Confirm indicators removed at the end of a resolution.
    ClearConfirm { frogs: Vec<FrogId> },
    /// Per-frog death effect. Area-effect casualties carry `explosion_affected`
    /// and share the animation of their `AreaEffect`.
    DeathEffect {
        frog: FrogId,
        class: FrogClass,
        color: FrogColor,
        position: Position,
        explosion_affected: bool,
    },
    /// A detonator exploded.
    Explosion {
        frog: FrogId,
        position: Position,
        radius: f64,
    },
    /// The first chain wave caught something besides its own detonators.
    FirstWaveImpact { affected: u32 },
    /// Single effect covering every frog destroyed by the area effect.
    AreaEffect { destroyed: u32 },
    /// Health was lost.
    DamageSound,
    /// Frogs forced to Red by Black-frog conversion.
    ColorConverted { frogs: Vec<FrogId> },
    /// Freeze / isolation visual state changed.
    StatusVisual {
        frog: FrogId,
        frozen: bool,
        isolated: bool,
    },
}

/// Session outcome events for UI and scene collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    HealthChanged { health: u32 },
    RemainingCountChanged { remaining: u32, total: u32 },
    Victory,
    Failure { cause: FailureCause },
}
