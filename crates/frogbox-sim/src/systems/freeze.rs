//! Freeze buff: suspends every frog's color cycle for a while.
//!
//! Only the buff's own `frozen` flag is touched; frogs held by a resolution
//! keep their `confirmed` hold when the buff expires.

use frogbox_core::events::PresentationCue;

use crate::field::Field;

#[derive(Debug, Default)]
pub struct FreezeBuff {
    remaining_secs: f64,
    active: bool,
}

impl FreezeBuff {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    /// Freeze every live frog. Re-applying extends to the longer duration.
    pub fn apply(&mut self, field: &mut Field, duration_secs: f64, cues: &mut Vec<PresentationCue>) {
        if duration_secs <= 0.0 {
            return;
        }
        self.remaining_secs = self.remaining_secs.max(duration_secs);
        self.active = true;
        set_frozen(field, true, cues);
    }

    pub fn tick(&mut self, field: &mut Field, dt: f64, cues: &mut Vec<PresentationCue>) {
        if !self.active {
            return;
        }
        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.active = false;
            set_frozen(field, false, cues);
        }
    }

    pub fn clear(&mut self) {
        self.remaining_secs = 0.0;
        self.active = false;
    }
}

fn set_frozen(field: &mut Field, frozen: bool, cues: &mut Vec<PresentationCue>) {
    for entity in field.live_entities() {
        let Some(frog) = field.frog(entity) else {
            continue;
        };
        let mut isolated = false;
        field.update_status(entity, |s| {
            s.frozen = frozen;
            isolated = s.isolated;
        });
        cues.push(PresentationCue::StatusVisual {
            frog: frog.id,
            frozen,
            isolated,
        });
    }
}
