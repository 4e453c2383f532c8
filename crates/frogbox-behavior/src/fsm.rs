//! Color-cycle finite state machine.
//!
//! Pure function that computes the next color and timer value for a single
//! frog from its class, current color and status. No ECS dependency; the
//! sim's color-cycle system feeds it plain data and applies the result.

use frogbox_core::enums::{FrogClass, FrogColor};

/// Input to the cycle FSM for a single frog.
pub struct CycleContext {
    pub class: FrogClass,
    pub color: FrogColor,
    pub elapsed_secs: f64,
    pub hold_secs: f64,
    /// Frozen by a buff or held by an in-flight resolution.
    pub frozen: bool,
    pub isolated: bool,
    pub dt: f64,
}

/// Output from the cycle FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleUpdate {
    pub new_color: FrogColor,
    pub new_elapsed_secs: f64,
    pub color_changed: bool,
}

/// Evaluate the FSM for one frog.
///
/// Frozen and isolated frogs are suspended: neither their color nor their
/// timer moves, so they resume exactly where they stopped.
pub fn evaluate(ctx: &CycleContext) -> CycleUpdate {
    let no_change = CycleUpdate {
        new_color: ctx.color,
        new_elapsed_secs: ctx.elapsed_secs,
        color_changed: false,
    };

    if ctx.frozen || ctx.isolated {
        return no_change;
    }

    // A color outside the class's pair is left alone rather than guessed at.
    if !ctx.class.accepts(ctx.color) {
        return no_change;
    }

    let elapsed = ctx.elapsed_secs + ctx.dt.max(0.0);
    if elapsed < ctx.hold_secs {
        return CycleUpdate {
            new_elapsed_secs: elapsed,
            ..no_change
        };
    }

    CycleUpdate {
        new_color: ctx.color.toggled(),
        new_elapsed_secs: 0.0,
        color_changed: true,
    }
}
