//! Selection resolution state machine.
//!
//! A released selection runs through
//! `Classifying → ChainDetonating → ApplyingAreaEffects → SequentialResolving → Concluded`
//! and back to `Idle`. Pacing delays are explicit waits counted down by
//! [`ResolutionMachine::advance`]; each call runs phase steps until it hits a
//! wait or finishes. The session's settlement lock is held for the whole run,
//! so at most one resolution exists at a time.

use std::collections::VecDeque;

use hecs::Entity;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, warn};

use frogbox_core::config::{CycleTimings, LevelConfig, Pacing};
use frogbox_core::enums::{FailureCause, ResolutionPhase, SelectionKind};
use frogbox_core::events::{PresentationCue, SessionEvent};
use frogbox_core::types::{FrogId, WorldRect};

use crate::error::ResolveError;
use crate::field::{DestroyedFrog, Field};
use crate::session::Session;
use crate::systems::cleanup::flush_removals;
use crate::systems::{conversion, explosion, spatial};
use crate::systems::explosion::ChainState;

/// Level rules the resolution sequence reads.
#[derive(Debug, Clone)]
pub struct ResolutionRules {
    pub pacing: Pacing,
    pub conversion_count_per_black: u32,
    pub cycle: CycleTimings,
}

impl ResolutionRules {
    pub fn from_level(level: &LevelConfig) -> Self {
        Self {
            pacing: level.pacing,
            conversion_count_per_black: level.conversion_count_per_black,
            cycle: level.cycle,
        }
    }
}

/// Everything a resolution touches, passed in explicitly.
pub struct ResolveContext<'a> {
    pub field: &'a mut Field,
    pub session: &'a mut Session,
    pub rng: &'a mut ChaCha8Rng,
    pub rules: &'a ResolutionRules,
    pub cues: &'a mut Vec<PresentationCue>,
    pub events: &'a mut Vec<SessionEvent>,
}

impl ResolveContext<'_> {
    fn flush_removals(&mut self) {
        flush_removals(self.field, self.session, self.events);
    }
}

/// A frog captured by the selection, classified at release time.
#[derive(Debug, Clone, Copy)]
struct Selected {
    entity: Entity,
    id: FrogId,
    kind: SelectionKind,
}

#[derive(Debug, Default)]
pub struct ResolutionMachine {
    phase: ResolutionPhase,
    /// Seconds left on the current pacing wait.
    wait_secs: f64,
    selected: Vec<Selected>,
    /// Frogs this resolution put a confirm hold on.
    held: Vec<Entity>,
    /// Detonators to expand in the next chain wave.
    wave: Vec<Entity>,
    waves_run: u32,
    chain: ChainState,
    sequence: VecDeque<Selected>,
    black_count: u32,
    pending_failure: Option<FailureCause>,
}

impl ResolutionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ResolutionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != ResolutionPhase::Idle
    }

    /// Start resolving the frogs inside `rect`.
    ///
    /// Returns false without side effects when the lock is taken, the
    /// session is over, or nothing eligible is inside the rectangle.
    pub fn begin(&mut self, ctx: &mut ResolveContext<'_>, rect: &WorldRect) -> bool {
        if self.is_active() || !ctx.session.can_begin_settlement() {
            warn!(
                settling = ctx.session.is_settling(),
                ended = ctx.session.is_ended(),
                "selection rejected"
            );
            return false;
        }

        let hits = spatial::query(ctx.field, rect);
        if hits.is_empty() {
            debug!("selection matched no frogs");
            return false;
        }
        if !ctx.session.begin_settlement() {
            return false;
        }

        self.phase = ResolutionPhase::Classifying;
        self.classify(ctx, &hits);
        debug!(
            selected = self.selected.len(),
            detonators = self.wave.len(),
            "selection classified"
        );
        self.phase = ResolutionPhase::ChainDetonating;
        self.wait_secs = 0.0;
        true
    }

    /// Count down the current wait by `dt` and run every step that becomes due.
    pub fn advance(&mut self, ctx: &mut ResolveContext<'_>, dt: f64) {
        if !self.is_active() {
            return;
        }
        self.wait_secs -= dt;

        while self.is_active() && self.wait_secs <= 0.0 {
            if ctx.session.is_ended() && self.phase != ResolutionPhase::Concluded {
                debug!(phase = ?self.phase, "session ended mid-resolution");
                self.abort(ctx);
                return;
            }
            if let Err(err) = self.step(ctx) {
                error!(%err, phase = ?self.phase, "resolution aborted");
                self.abort(ctx);
                return;
            }
        }
    }

    /// Abandon the resolution: release holds and the settlement lock.
    pub fn abort(&mut self, ctx: &mut ResolveContext<'_>) {
        if !self.is_active() {
            return;
        }
        self.release_holds(ctx);
        ctx.flush_removals();
        ctx.session.end_settlement();
        self.reset();
    }

    fn step(&mut self, ctx: &mut ResolveContext<'_>) -> Result<(), ResolveError> {
        match self.phase {
            ResolutionPhase::Idle => {}
            ResolutionPhase::Classifying => self.phase = ResolutionPhase::ChainDetonating,
            ResolutionPhase::ChainDetonating => self.run_chain_wave(ctx)?,
            ResolutionPhase::ApplyingAreaEffects => self.apply_area_effects(ctx),
            ResolutionPhase::SequentialResolving => self.resolve_next(ctx),
            ResolutionPhase::Concluded => self.conclude(ctx),
        }
        Ok(())
    }

    /// Hold every selected frog and partition it by its color right now.
    fn classify(&mut self, ctx: &mut ResolveContext<'_>, hits: &[Entity]) {
        for &entity in hits {
            let Some(frog) = ctx.field.frog(entity) else {
                continue;
            };
            self.hold(ctx.field, entity);
            let kind = frog.color.selection_kind();
            if kind == SelectionKind::Detonator {
                self.chain.mark_processed(entity);
                self.wave.push(entity);
            }
            self.selected.push(Selected {
                entity,
                id: frog.id,
                kind,
            });
        }
        ctx.cues.push(PresentationCue::ConfirmIndicator {
            frogs: self.selected.iter().map(|s| s.id).collect(),
        });
    }

    /// Expand every detonator of the current wave, then wait before the next one.
    fn run_chain_wave(&mut self, ctx: &mut ResolveContext<'_>) -> Result<(), ResolveError> {
        if self.wave.is_empty() {
            self.phase = ResolutionPhase::ApplyingAreaEffects;
            return Ok(());
        }

        let wave = std::mem::take(&mut self.wave);
        let wave_size = wave.len();
        let mut next = Vec::new();
        for detonator in wave {
            for found in explosion::expand(ctx.field, detonator, &mut self.chain, ctx.cues)? {
                self.hold(ctx.field, found);
                next.push(found);
            }
            // Isolated before its turn: it sits the chain out.
            if ctx.field.is_alive(detonator) {
                self.release(ctx, detonator);
            }
        }
        // Caught frogs wait for the area effect without changing color.
        for &entity in self.chain.affected() {
            let eligible = ctx
                .field
                .status(entity)
                .is_some_and(|s| !s.isolated && ctx.field.is_alive(entity));
            if eligible && !self.held.contains(&entity) {
                self.held.push(entity);
                ctx.field.update_status(entity, |s| s.confirmed = true);
            }
        }
        ctx.flush_removals();

        self.waves_run += 1;
        if self.waves_run == 1 {
            let impact = self.chain.affected_count().saturating_sub(wave_size);
            if impact > 0 {
                ctx.cues.push(PresentationCue::FirstWaveImpact {
                    affected: impact as u32,
                });
            }
        }
        debug!(
            wave = self.waves_run,
            next = next.len(),
            processed = self.chain.processed_count(),
            affected = self.chain.affected_count(),
            "chain wave resolved"
        );

        if next.is_empty() {
            self.phase = ResolutionPhase::ApplyingAreaEffects;
        } else {
            self.wave = next;
            self.wait_secs += ctx.rules.pacing.chain_wave_delay_secs;
        }
        Ok(())
    }

    /// Destroy everything the chain caught, then queue the rest of the selection.
    fn apply_area_effects(&mut self, ctx: &mut ResolveContext<'_>) {
        let casualties = explosion::destroy_affected(ctx.field, &self.chain);
        for casualty in &casualties {
            ctx.cues.push(death_effect(casualty));
        }
        let destroyed = casualties.len() as u32;
        if destroyed > 0 {
            ctx.cues.push(PresentationCue::AreaEffect { destroyed });
        }
        // Whatever the chain caught and is still standing was isolated meanwhile.
        let spared: Vec<Entity> = self
            .chain
            .affected()
            .iter()
            .copied()
            .filter(|e| ctx.field.is_alive(*e))
            .collect();
        for entity in spared {
            self.release(ctx, entity);
        }
        ctx.flush_removals();

        self.sequence = self
            .selected
            .iter()
            .filter(|s| s.kind != SelectionKind::Detonator && !self.chain.is_affected(s.entity))
            .copied()
            .collect();
        debug!(
            area = destroyed,
            sequential = self.sequence.len(),
            "area effects applied"
        );
        self.phase = ResolutionPhase::SequentialResolving;
    }

    /// Destroy one selected frog. Health is checked after every Red frog.
    fn resolve_next(&mut self, ctx: &mut ResolveContext<'_>) {
        let Some(next) = self.sequence.pop_front() else {
            self.finish_sequence(ctx);
            return;
        };

        // Isolated or removed since classification: skip without spending a wait.
        if ctx.field.status(next.entity).is_some_and(|s| s.isolated) {
            self.release(ctx, next.entity);
            return;
        }
        let Some(destroyed) = ctx.field.destroy(next.entity, false) else {
            return;
        };
        ctx.cues.push(death_effect(&destroyed));

        match next.kind {
            SelectionKind::Damage => {
                ctx.session.take_damage(1, ctx.events);
                ctx.cues.push(PresentationCue::DamageSound);
                if ctx.session.is_health_depleted() {
                    ctx.flush_removals();
                    debug!(
                        left = self.sequence.len(),
                        "health depleted, sequential resolution stopped"
                    );
                    self.sequence.clear();
                    self.pending_failure = Some(FailureCause::HealthDepleted);
                    self.phase = ResolutionPhase::Concluded;
                    self.wait_secs += ctx.rules.pacing.failure_grace_secs;
                    return;
                }
            }
            SelectionKind::Black => self.black_count += 1,
            SelectionKind::Green | SelectionKind::Detonator => {}
        }
        ctx.flush_removals();

        if self.sequence.is_empty() {
            self.finish_sequence(ctx);
        } else {
            self.wait_secs += ctx.rules.pacing.sequential_delay_secs;
        }
    }

    fn finish_sequence(&mut self, ctx: &mut ResolveContext<'_>) {
        if self.black_count > 0 {
            let count = (self.black_count as usize)
                .saturating_mul(ctx.rules.conversion_count_per_black as usize);
            let converted =
                conversion::convert_to_damaging(ctx.field, ctx.rng, &ctx.rules.cycle, count);
            debug!(
                blacks = self.black_count,
                converted = converted.len(),
                "color conversion"
            );
            if !converted.is_empty() {
                ctx.cues
                    .push(PresentationCue::ColorConverted { frogs: converted });
            }
        }
        self.phase = ResolutionPhase::Concluded;
    }

    fn conclude(&mut self, ctx: &mut ResolveContext<'_>) {
        self.release_holds(ctx);
        ctx.flush_removals();
        match self.pending_failure.take() {
            Some(cause) => {
                ctx.session.check_failure(cause, ctx.events);
            }
            None => {
                ctx.session.check_victory(ctx.events);
            }
        }
        ctx.session.end_settlement();
        debug!("resolution concluded");
        self.reset();
    }

    fn hold(&mut self, field: &mut Field, entity: Entity) {
        if field.update_status(entity, |s| s.confirmed = true) {
            self.held.push(entity);
        }
    }

    /// Drop one frog's hold ahead of the rest.
    fn release(&mut self, ctx: &mut ResolveContext<'_>, entity: Entity) {
        let Some(index) = self.held.iter().position(|e| *e == entity) else {
            return;
        };
        self.held.swap_remove(index);
        ctx.field.update_status(entity, |s| s.confirmed = false);
        if let Some(frog) = ctx.field.frog(entity) {
            ctx.cues.push(PresentationCue::ClearConfirm {
                frogs: vec![frog.id],
            });
        }
    }

    /// Clear confirm holds on every frog still alive.
    fn release_holds(&mut self, ctx: &mut ResolveContext<'_>) {
        let mut released = Vec::new();
        for entity in self.held.drain(..) {
            if !ctx.field.is_alive(entity) {
                continue;
            }
            ctx.field.update_status(entity, |s| s.confirmed = false);
            if let Some(frog) = ctx.field.frog(entity) {
                released.push(frog.id);
            }
        }
        if !released.is_empty() {
            ctx.cues.push(PresentationCue::ClearConfirm { frogs: released });
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn death_effect(destroyed: &DestroyedFrog) -> PresentationCue {
    PresentationCue::DeathEffect {
        frog: destroyed.frog.id,
        class: destroyed.frog.class,
        color: destroyed.frog.color,
        position: destroyed.position,
        explosion_affected: destroyed.explosion_affected,
    }
}
