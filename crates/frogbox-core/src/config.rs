//! Level configuration.
//!
//! Every field has a default, so a level file only needs to list what it
//! changes. Loaded from JSON and validated before the engine sees it.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::FrogColor;
use crate::error::ConfigError;

/// Number of frogs spawned per starting color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnCounts {
    pub green: u32,
    pub red: u32,
    pub yellow: u32,
    pub black: u32,
}

/// Inclusive range a color is held for before the cycle flips it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

/// Hold ranges for each color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleTimings {
    pub green: HoldRange,
    pub red: HoldRange,
    pub yellow: HoldRange,
    pub black: HoldRange,
}

/// Presentation pacing observed by the resolution sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause between chain explosion waves.
    pub chain_wave_delay_secs: f64,
    /// Pause between sequential destructions.
    pub sequential_delay_secs: f64,
    /// Pause between health depletion and the failure event.
    pub failure_grace_secs: f64,
}

/// Complete description of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub spawn: SpawnCounts,
    pub field_half_width: f64,
    pub field_half_height: f64,
    pub body_radius: f64,
    pub head_radius: f64,
    pub initial_health: u32,
    pub time_limit_secs: f64,
    pub explosion_radius: f64,
    pub conversion_count_per_black: u32,
    pub max_revives: u32,
    pub pacing: Pacing,
    pub cycle: CycleTimings,
}

impl Default for SpawnCounts {
    fn default() -> Self {
        Self {
            green: 12,
            red: 4,
            yellow: 3,
            black: 3,
        }
    }
}

impl HoldRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    const fn from_pair(pair: (f64, f64)) -> Self {
        Self::new(pair.0, pair.1)
    }
}

impl Default for CycleTimings {
    fn default() -> Self {
        Self {
            green: HoldRange::from_pair(DEFAULT_GREEN_HOLD_SECS),
            red: HoldRange::from_pair(DEFAULT_RED_HOLD_SECS),
            yellow: HoldRange::from_pair(DEFAULT_YELLOW_HOLD_SECS),
            black: HoldRange::from_pair(DEFAULT_BLACK_HOLD_SECS),
        }
    }
}

impl CycleTimings {
    /// Hold range for the given color.
    pub fn hold_for(&self, color: FrogColor) -> HoldRange {
        match color {
            FrogColor::Green => self.green,
            FrogColor::Red => self.red,
            FrogColor::Yellow => self.yellow,
            FrogColor::Black => self.black,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            chain_wave_delay_secs: DEFAULT_CHAIN_WAVE_DELAY_SECS,
            sequential_delay_secs: DEFAULT_SEQUENTIAL_DELAY_SECS,
            failure_grace_secs: DEFAULT_FAILURE_GRACE_SECS,
        }
    }
}

impl Pacing {
    /// No pauses at all. Useful for headless evaluation.
    pub fn immediate() -> Self {
        Self {
            chain_wave_delay_secs: 0.0,
            sequential_delay_secs: 0.0,
            failure_grace_secs: 0.0,
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            spawn: SpawnCounts::default(),
            field_half_width: DEFAULT_FIELD_HALF_WIDTH,
            field_half_height: DEFAULT_FIELD_HALF_HEIGHT,
            body_radius: DEFAULT_BODY_RADIUS,
            head_radius: DEFAULT_HEAD_RADIUS,
            initial_health: DEFAULT_INITIAL_HEALTH,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            explosion_radius: DEFAULT_EXPLOSION_RADIUS,
            conversion_count_per_black: DEFAULT_CONVERSION_COUNT_PER_BLACK,
            max_revives: DEFAULT_MAX_REVIVES,
            pacing: Pacing::default(),
            cycle: CycleTimings::default(),
        }
    }
}

impl LevelConfig {
    /// Parse and validate a level from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of frogs the level spawns.
    pub fn total_frogs(&self) -> u32 {
        self.spawn.green + self.spawn.red + self.spawn.yellow + self.spawn.black
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_half_width > 0.0 && self.field_half_height > 0.0) {
            return Err(invalid("field_half_width", "field extents must be positive"));
        }
        if self.body_radius <= 0.0 {
            return Err(invalid("body_radius", "must be positive"));
        }
        if self.head_radius < 0.0 {
            return Err(invalid("head_radius", "must not be negative"));
        }
        if self.initial_health == 0 {
            return Err(invalid("initial_health", "must be at least 1"));
        }
        if !(self.time_limit_secs > 0.0) {
            return Err(invalid("time_limit_secs", "must be positive"));
        }
        let p = &self.pacing;
        for (field, value) in [
            ("pacing.chain_wave_delay_secs", p.chain_wave_delay_secs),
            ("pacing.sequential_delay_secs", p.sequential_delay_secs),
            ("pacing.failure_grace_secs", p.failure_grace_secs),
        ] {
            if !(value >= 0.0) {
                return Err(invalid(field, "delays must be zero or positive"));
            }
        }
        for (field, range) in [
            ("cycle.green", self.cycle.green),
            ("cycle.red", self.cycle.red),
            ("cycle.yellow", self.cycle.yellow),
            ("cycle.black", self.cycle.black),
        ] {
            if !(range.min_secs > 0.0 && range.max_secs >= range.min_secs) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!(
                        "hold range [{}, {}] must be positive and ordered",
                        range.min_secs, range.max_secs
                    ),
                });
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
