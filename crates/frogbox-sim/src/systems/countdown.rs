//! Countdown system: runs the level timer down and declares a timeout.

use frogbox_core::events::SessionEvent;

use crate::session::Session;

pub fn run(session: &mut Session, dt: f64, events: &mut Vec<SessionEvent>) {
    session.tick_timer(dt, events);
}
