//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavior class of a frog. Determines which colors it cycles through
/// and how it is resolved when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrogClass {
    /// Cycles Green ⇄ Red. Red frogs cost health when destroyed by selection.
    GreenRed,
    /// Cycles Yellow ⇄ Black. Yellow frogs detonate; Black frogs convert others to Red.
    YellowBlack,
}

/// Current color of a frog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrogColor {
    Green,
    Red,
    Yellow,
    Black,
}

/// Why a level attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    /// Health reached zero.
    HealthDepleted,
    /// The countdown ran out.
    TimeOut,
}

/// Terminal result of a level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Victory,
    Failure(FailureCause),
}

/// How a selected frog is treated by the resolution sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Yellow frog: expanded by the chain explosion resolver.
    Detonator,
    /// Red frog: destroyed one at a time, each costing one health.
    Damage,
    /// Black frog: destroyed and counted toward color conversion.
    Black,
    /// Green frog: destroyed with no side effect.
    Green,
}

/// Phase of the selection resolution state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionPhase {
    #[default]
    Idle,
    Classifying,
    ChainDetonating,
    ApplyingAreaEffects,
    SequentialResolving,
    Concluded,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    LevelComplete,
    LevelFailed,
}

impl FrogClass {
    /// The two colors this class alternates between, resting color first.
    pub fn colors(self) -> (FrogColor, FrogColor) {
        match self {
            FrogClass::GreenRed => (FrogColor::Green, FrogColor::Red),
            FrogClass::YellowBlack => (FrogColor::Yellow, FrogColor::Black),
        }
    }

    /// Whether `color` is a valid state for this class.
    pub fn accepts(self, color: FrogColor) -> bool {
        color.class() == self
    }
}

impl FrogColor {
    pub fn class(self) -> FrogClass {
        match self {
            FrogColor::Green | FrogColor::Red => FrogClass::GreenRed,
            FrogColor::Yellow | FrogColor::Black => FrogClass::YellowBlack,
        }
    }

    /// The other color of the same class.
    pub fn toggled(self) -> FrogColor {
        match self {
            FrogColor::Green => FrogColor::Red,
            FrogColor::Red => FrogColor::Green,
            FrogColor::Yellow => FrogColor::Black,
            FrogColor::Black => FrogColor::Yellow,
        }
    }

    pub fn is_damaging(self) -> bool {
        self == FrogColor::Red
    }

    pub fn is_detonating(self) -> bool {
        self == FrogColor::Yellow
    }

    /// Classification used when a frog of this color is selected.
    pub fn selection_kind(self) -> SelectionKind {
        match self {
            FrogColor::Yellow => SelectionKind::Detonator,
            FrogColor::Red => SelectionKind::Damage,
            FrogColor::Black => SelectionKind::Black,
            FrogColor::Green => SelectionKind::Green,
        }
    }
}
