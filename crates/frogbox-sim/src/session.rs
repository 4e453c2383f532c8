//! Session state for one level attempt, including the settlement lock.
//!
//! Victory and failure are mutually exclusive: whichever sets `ended` first
//! wins and every later check is a no-op.

use tracing::info;

use frogbox_core::enums::{FailureCause, SessionOutcome};
use frogbox_core::events::SessionEvent;
use frogbox_core::state::SessionView;

#[derive(Debug, Clone)]
pub struct Session {
    initial_health: u32,
    health: u32,
    total: u32,
    remaining: u32,
    time_limit_secs: f64,
    time_remaining_secs: f64,
    ended: bool,
    outcome: Option<SessionOutcome>,
    settling: bool,
    revives_used: u32,
}

impl Session {
    pub fn new(initial_health: u32, time_limit_secs: f64) -> Self {
        Self {
            initial_health,
            health: initial_health,
            total: 0,
            remaining: 0,
            time_limit_secs,
            time_remaining_secs: time_limit_secs,
            ended: false,
            outcome: None,
            settling: false,
            revives_used: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn initial_health(&self) -> u32 {
        self.initial_health
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn time_remaining_secs(&self) -> f64 {
        self.time_remaining_secs
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn is_settling(&self) -> bool {
        self.settling
    }

    pub fn revives_used(&self) -> u32 {
        self.revives_used
    }

    /// Health hit zero. The failure event may still be pending its grace delay.
    pub fn is_health_depleted(&self) -> bool {
        self.health == 0
    }

    /// Register newly spawned frogs.
    pub fn add_frogs(&mut self, count: u32, events: &mut Vec<SessionEvent>) {
        if count == 0 {
            return;
        }
        self.total += count;
        self.remaining += count;
        events.push(self.remaining_event());
    }

    /// Whether a resolution could start right now. Read-only.
    pub fn can_begin_settlement(&self) -> bool {
        !self.settling && !self.ended
    }

    /// Check-and-set the settlement lock. False (and no mutation) if a
    /// resolution is already running or the session is over.
    pub fn begin_settlement(&mut self) -> bool {
        if !self.can_begin_settlement() {
            return false;
        }
        self.settling = true;
        true
    }

    pub fn end_settlement(&mut self) {
        self.settling = false;
    }

    /// Apply damage, clamped at zero. Returns the new health.
    pub fn take_damage(&mut self, amount: u32, events: &mut Vec<SessionEvent>) -> u32 {
        if self.ended || amount == 0 {
            return self.health;
        }
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        if self.health != before {
            events.push(SessionEvent::HealthChanged {
                health: self.health,
            });
        }
        self.health
    }

    /// A frog left the field. Decrements the remaining count and checks for victory.
    pub fn notify_entity_removed(&mut self, events: &mut Vec<SessionEvent>) {
        if self.remaining > 0 {
            self.remaining -= 1;
            events.push(self.remaining_event());
        }
        self.check_victory(events);
    }

    /// Declare failure. Idempotent: returns false if the session already ended.
    pub fn check_failure(&mut self, cause: FailureCause, events: &mut Vec<SessionEvent>) -> bool {
        if self.ended {
            return false;
        }
        self.ended = true;
        self.outcome = Some(SessionOutcome::Failure(cause));
        info!(?cause, remaining = self.remaining, "level failed");
        events.push(SessionEvent::Failure { cause });
        true
    }

    /// Declare victory if every frog is gone. Idempotent, and unreachable
    /// once health is depleted or the session has ended.
    pub fn check_victory(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        if self.ended || self.remaining != 0 || self.total == 0 || self.health == 0 {
            return false;
        }
        self.ended = true;
        self.outcome = Some(SessionOutcome::Victory);
        info!(health = self.health, "level complete");
        events.push(SessionEvent::Victory);
        true
    }

    /// Advance the countdown. Stops once the session ended or health is gone.
    pub fn tick_timer(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        if self.ended || self.is_health_depleted() {
            return;
        }
        self.time_remaining_secs = (self.time_remaining_secs - dt).max(0.0);
        if self.time_remaining_secs <= 0.0 {
            self.check_failure(FailureCause::TimeOut, events);
        }
    }

    /// Full-health restore: a fresh field of `total` frogs, same attempt.
    pub fn restore(&mut self, total: u32, events: &mut Vec<SessionEvent>) {
        self.health = self.initial_health;
        self.total = total;
        self.remaining = total;
        self.time_remaining_secs = self.time_limit_secs;
        self.ended = false;
        self.outcome = None;
        self.settling = false;
        self.revives_used += 1;
        events.push(SessionEvent::HealthChanged {
            health: self.health,
        });
        events.push(self.remaining_event());
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            health: self.health,
            initial_health: self.initial_health,
            remaining: self.remaining,
            total: self.total,
            time_remaining_secs: self.time_remaining_secs,
            settling: self.settling,
            outcome: self.outcome,
            revives_used: self.revives_used,
        }
    }

    fn remaining_event(&self) -> SessionEvent {
        SessionEvent::RemainingCountChanged {
            remaining: self.remaining,
            total: self.total,
        }
    }
}
