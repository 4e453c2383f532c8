//! Color conversion: destroyed Black frogs turn random GreenRed frogs Red.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use frogbox_behavior::profiles::get_profile;
use frogbox_core::config::CycleTimings;
use frogbox_core::enums::{FrogClass, FrogColor};
use frogbox_core::types::FrogId;

use crate::field::Field;

/// Force up to `count` live, non-isolated GreenRed frogs to Red.
///
/// Targets are drawn from a full shuffle of the eligible pool, so every
/// eligible frog is equally likely. Frogs already Red are eligible too.
/// Returns the converted frogs.
pub fn convert_to_damaging(
    field: &mut Field,
    rng: &mut ChaCha8Rng,
    timings: &CycleTimings,
    count: usize,
) -> Vec<FrogId> {
    if count == 0 {
        return Vec::new();
    }

    let mut pool: Vec<_> = field
        .live_of_class(FrogClass::GreenRed)
        .into_iter()
        .filter(|e| field.status(*e).is_some_and(|s| !s.isolated))
        .collect();
    pool.shuffle(rng);
    pool.truncate(count);

    let profile = get_profile(FrogColor::Red, timings);
    let mut converted = Vec::with_capacity(pool.len());
    for entity in pool {
        let hold = profile.roll_hold(rng);
        if field.force_color(entity, FrogColor::Red, hold) {
            if let Some(frog) = field.frog(entity) {
                converted.push(frog.id);
            }
        }
    }
    converted
}
