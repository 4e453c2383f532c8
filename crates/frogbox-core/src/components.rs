//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems and in the resolution machine.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{FrogId, Position};

/// Identity, class and current color of a frog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Frog {
    pub id: FrogId,
    pub class: FrogClass,
    pub color: FrogColor,
}

/// Status flags that gate cycling and resolution eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrogStatus {
    /// Frozen by a buff. Suspends color cycling, does not affect selection.
    pub frozen: bool,
    /// Held by an in-flight resolution (confirm indicator shown). Also suspends cycling.
    pub confirmed: bool,
    /// Excluded from selection, chains and conversion.
    pub isolated: bool,
    /// Destroyed by an area effect rather than directly.
    pub explosion_affected: bool,
}

/// A circular collider relative to the frog's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    pub offset_x: f64,
    pub offset_y: f64,
    pub radius: f64,
}

/// All colliders a frog exposes. A frog matches a query if any collider does.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Colliders {
    pub circles: Vec<CircleCollider>,
}

/// Explosion parameters. Attached to YellowBlack frogs only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Detonator {
    pub radius: f64,
}

/// Per-frog color-cycle timer state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ColorCycle {
    /// Seconds spent in the current color (advances only while not suspended).
    pub elapsed_secs: f64,
    /// How long the current color is held before flipping.
    pub hold_secs: f64,
}

impl FrogStatus {
    /// Whether color cycling is suspended by any freeze source.
    pub fn is_frozen(&self) -> bool {
        self.frozen || self.confirmed
    }
}

impl CircleCollider {
    pub fn center(&self, origin: &Position) -> Position {
        Position::new(origin.x + self.offset_x, origin.y + self.offset_y)
    }
}
