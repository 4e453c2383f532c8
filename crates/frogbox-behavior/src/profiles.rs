//! Hold-time profiles for each color.
//!
//! Consolidates the per-color timing parameters for the cycle FSM.

use rand::Rng;

use frogbox_core::config::{CycleTimings, HoldRange};
use frogbox_core::enums::FrogColor;

/// Timing profile for one color.
#[derive(Debug, Clone, Copy)]
pub struct CycleProfile {
    pub color: FrogColor,
    pub hold: HoldRange,
}

/// Get the cycle profile for a color under the given level timings.
pub fn get_profile(color: FrogColor, timings: &CycleTimings) -> CycleProfile {
    CycleProfile {
        color,
        hold: timings.hold_for(color),
    }
}

impl CycleProfile {
    /// Roll how long the color is held this time.
    pub fn roll_hold<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let HoldRange { min_secs, max_secs } = self.hold;
        if max_secs <= min_secs {
            return min_secs;
        }
        rng.gen_range(min_secs..=max_secs)
    }

    /// Roll a starting offset so frogs spawned together do not flip in lockstep.
    pub fn roll_initial_elapsed<R: Rng + ?Sized>(&self, rng: &mut R, hold_secs: f64) -> f64 {
        if hold_secs <= 0.0 {
            return 0.0;
        }
        rng.gen_range(0.0..hold_secs)
    }
}
