//! Color-cycle system: feeds each frog's timer through the cycle FSM.

use rand_chacha::ChaCha8Rng;

use frogbox_behavior::fsm::{evaluate, CycleContext};
use frogbox_behavior::profiles::get_profile;
use frogbox_core::components::{ColorCycle, Frog, FrogStatus};
use frogbox_core::config::CycleTimings;

use crate::field::Field;

/// Advance every frog's cycle by `dt`. Returns how many frogs changed color.
pub fn run(field: &mut Field, rng: &mut ChaCha8Rng, timings: &CycleTimings, dt: f64) -> u32 {
    let mut changed = 0;
    for (_entity, (frog, status, cycle)) in field
        .world_mut()
        .query_mut::<(&mut Frog, &FrogStatus, &mut ColorCycle)>()
    {
        let update = evaluate(&CycleContext {
            class: frog.class,
            color: frog.color,
            elapsed_secs: cycle.elapsed_secs,
            hold_secs: cycle.hold_secs,
            frozen: status.is_frozen(),
            isolated: status.isolated,
            dt,
        });

        cycle.elapsed_secs = update.new_elapsed_secs;
        if update.color_changed {
            frog.color = update.new_color;
            cycle.hold_secs = get_profile(update.new_color, timings).roll_hold(rng);
            changed += 1;
        }
    }
    changed
}
