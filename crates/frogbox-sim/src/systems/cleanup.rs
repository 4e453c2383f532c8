//! Cleanup system: reconciles frogs removed outside the core and delivers
//! every pending removal notification to the session exactly once.

use tracing::debug;

use frogbox_core::events::SessionEvent;

use crate::field::Field;
use crate::session::Session;

pub fn run(field: &mut Field, session: &mut Session, events: &mut Vec<SessionEvent>) {
    let vanished = field.reconcile();
    if vanished > 0 {
        debug!(vanished, "frogs removed outside the resolution engine");
    }
    flush_removals(field, session, events);
}

/// Forward queued removal notifications to the session.
pub fn flush_removals(field: &mut Field, session: &mut Session, events: &mut Vec<SessionEvent>) {
    for _frog in field.drain_removals() {
        session.notify_entity_removed(events);
    }
}
