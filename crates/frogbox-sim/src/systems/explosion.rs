//! Chain explosion resolver.
//!
//! A Yellow frog's blast catches every live, non-isolated frog whose
//! colliders reach within its radius. Caught Yellow frogs detonate in turn.
//! [`ChainState`] is the visited guard shared across a whole resolution so a
//! detonator is expanded at most once, however many blasts reach it.

use std::collections::{HashSet, VecDeque};

use hecs::Entity;

use frogbox_core::components::{Colliders, Frog, FrogStatus};
use frogbox_core::enums::{FrogClass, FrogColor};
use frogbox_core::events::PresentationCue;
use frogbox_core::types::{FrogId, Position};

use crate::error::ResolveError;
use crate::field::{DestroyedFrog, Field};

/// Processed (expanded or queued) detonators and the accumulated affected set.
#[derive(Debug, Default)]
pub struct ChainState {
    processed: HashSet<Entity>,
    affected: HashSet<Entity>,
    /// Affected frogs in discovery order.
    order: Vec<Entity>,
}

impl ChainState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a detonator as claimed. False if it already was.
    pub fn mark_processed(&mut self, entity: Entity) -> bool {
        self.processed.insert(entity)
    }

    pub fn is_processed(&self, entity: Entity) -> bool {
        self.processed.contains(&entity)
    }

    /// Add to the affected set. False if already present.
    pub fn add_affected(&mut self, entity: Entity) -> bool {
        if self.affected.insert(entity) {
            self.order.push(entity);
            true
        } else {
            false
        }
    }

    pub fn is_affected(&self, entity: Entity) -> bool {
        self.affected.contains(&entity)
    }

    pub fn affected(&self) -> &[Entity] {
        &self.order
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn affected_count(&self) -> usize {
        self.order.len()
    }
}

/// Whether a frog is a Yellow detonator able to chain.
pub fn is_detonating(field: &Field, entity: Entity) -> bool {
    let Some(frog) = field.frog(entity) else {
        return false;
    };
    frog.class == FrogClass::YellowBlack
        && frog.color == FrogColor::Yellow
        && !is_isolated(field, entity)
}

/// Frogs caught by a blast of `radius` centered at `center`, ordered by id.
/// The detonator itself is always included; a non-positive radius catches nothing else.
pub fn blast_targets(field: &Field, detonator: Entity, center: &Position, radius: f64) -> Vec<Entity> {
    if radius <= 0.0 {
        return vec![detonator];
    }

    let mut caught: Vec<(FrogId, Entity)> = field
        .world()
        .query::<(&Frog, &FrogStatus, &Position, &Colliders)>()
        .iter()
        .filter(|(entity, (_, status, _, _))| *entity == detonator || !status.isolated)
        .filter(|(entity, (_, _, pos, colliders))| {
            *entity == detonator
                || colliders
                    .circles
                    .iter()
                    .any(|c| c.center(pos).distance_to(center) <= radius + c.radius)
        })
        .map(|(entity, (frog, _, _, _))| (frog.id, entity))
        .collect();

    caught.sort_unstable_by_key(|(id, _)| *id);
    caught.into_iter().map(|(_, entity)| entity).collect()
}

/// Expand a single detonator: record its blast, destroy it, and return the
/// Yellow frogs it newly reached (already marked processed, not yet expanded).
///
/// Stale or isolated detonators are skipped, left alive, and yield nothing.
pub fn expand(
    field: &mut Field,
    detonator: Entity,
    chain: &mut ChainState,
    cues: &mut Vec<PresentationCue>,
) -> Result<Vec<Entity>, ResolveError> {
    if !field.is_alive(detonator) || is_isolated(field, detonator) {
        return Ok(Vec::new());
    }
    chain.mark_processed(detonator);

    let frog = field.frog(detonator).ok_or(ResolveError::MissingComponent {
        entity: detonator,
        component: "Frog",
    })?;
    let center = field.position(detonator).ok_or(ResolveError::MissingComponent {
        entity: detonator,
        component: "Position",
    })?;
    let radius = field
        .detonator(detonator)
        .ok_or(ResolveError::MissingComponent {
            entity: detonator,
            component: "Detonator",
        })?
        .radius;

    let mut discovered = Vec::new();
    for target in blast_targets(field, detonator, &center, radius) {
        chain.add_affected(target);
        if target != detonator && !chain.is_processed(target) && is_detonating(field, target) {
            chain.mark_processed(target);
            discovered.push(target);
        }
    }

    field.destroy(detonator, false);
    cues.push(PresentationCue::Explosion {
        frog: frog.id,
        position: center,
        radius: radius.max(0.0),
    });

    Ok(discovered)
}

/// Resolve a detonator's full chain in one call.
///
/// Returns every affected frog, the detonators included. Detonators are
/// destroyed as they are expanded; other affected frogs are destroyed here
/// only when `immediate` is set, otherwise they are left for the caller.
pub fn resolve_explosion(
    field: &mut Field,
    detonator: Entity,
    immediate: bool,
    chain: &mut ChainState,
    cues: &mut Vec<PresentationCue>,
) -> Result<Vec<Entity>, ResolveError> {
    if !chain.mark_processed(detonator) {
        return Ok(Vec::new());
    }

    let mut queue = VecDeque::from([detonator]);
    while let Some(next) = queue.pop_front() {
        queue.extend(expand(field, next, chain, cues)?);
    }

    if immediate {
        destroy_affected(field, chain);
    }

    Ok(chain.affected().to_vec())
}

/// Destroy every affected frog that is not a detonator, flagged as an
/// area-effect casualty. Frogs isolated since the blast caught them survive.
pub fn destroy_affected(field: &mut Field, chain: &ChainState) -> Vec<DestroyedFrog> {
    let mut destroyed = Vec::new();
    for &entity in chain.affected() {
        if chain.is_processed(entity) || is_isolated(field, entity) {
            continue;
        }
        destroyed.extend(field.destroy(entity, true));
    }
    destroyed
}

fn is_isolated(field: &Field, entity: Entity) -> bool {
    field.status(entity).is_some_and(|s| s.isolated)
}
