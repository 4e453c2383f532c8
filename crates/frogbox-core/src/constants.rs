//! Simulation constants and tuning defaults.
//!
//! Per-level values are carried by [`crate::config::LevelConfig`]; the
//! `DEFAULT_*` constants here are its fallbacks.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Maximum accepted time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Field ---

/// Default half-width of the playable field (world units).
pub const DEFAULT_FIELD_HALF_WIDTH: f64 = 4.5;

/// Default half-height of the playable field (world units).
pub const DEFAULT_FIELD_HALF_HEIGHT: f64 = 8.0;

/// Radius of a frog's body collider.
pub const DEFAULT_BODY_RADIUS: f64 = 0.35;

/// Radius of a frog's head collider.
pub const DEFAULT_HEAD_RADIUS: f64 = 0.2;

/// Vertical offset of the head collider above the body center.
pub const HEAD_OFFSET_Y: f64 = 0.35;

// --- Session ---

/// Default starting health.
pub const DEFAULT_INITIAL_HEALTH: u32 = 3;

/// Default level time limit in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 90.0;

/// Default number of full-health revives allowed per level.
pub const DEFAULT_MAX_REVIVES: u32 = 1;

// --- Resolution ---

/// Default explosion radius of a Yellow detonator.
pub const DEFAULT_EXPLOSION_RADIUS: f64 = 1.5;

/// Frogs forced to Red per destroyed Black frog.
pub const DEFAULT_CONVERSION_COUNT_PER_BLACK: u32 = 2;

/// Pause between chain explosion waves (seconds).
pub const DEFAULT_CHAIN_WAVE_DELAY_SECS: f64 = 0.25;

/// Pause between sequential destructions (seconds).
pub const DEFAULT_SEQUENTIAL_DELAY_SECS: f64 = 0.1;

/// Grace period between health depletion and the failure event (seconds).
pub const DEFAULT_FAILURE_GRACE_SECS: f64 = 1.0;

// --- Color cycle ---

/// Default hold range for Green (seconds).
pub const DEFAULT_GREEN_HOLD_SECS: (f64, f64) = (3.0, 6.0);

/// Default hold range for Red (seconds).
pub const DEFAULT_RED_HOLD_SECS: (f64, f64) = (1.5, 3.0);

/// Default hold range for Yellow (seconds).
pub const DEFAULT_YELLOW_HOLD_SECS: (f64, f64) = (2.0, 4.0);

/// Default hold range for Black (seconds).
pub const DEFAULT_BLACK_HOLD_SECS: (f64, f64) = (2.0, 4.0);
