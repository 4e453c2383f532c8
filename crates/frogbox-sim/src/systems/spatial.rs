//! Spatial query: which live frogs overlap a world-space rectangle.
//!
//! Read-only. Isolated frogs are never returned.

use hecs::Entity;

use frogbox_core::components::{Colliders, Frog, FrogStatus};
use frogbox_core::types::{FrogId, Position, WorldRect};

use crate::field::Field;

/// Every live, non-isolated frog with at least one collider overlapping `rect`,
/// ordered by id. A zero-area rectangle matches nothing.
pub fn query(field: &Field, rect: &WorldRect) -> Vec<Entity> {
    if rect.is_degenerate() {
        return Vec::new();
    }

    let mut hits: Vec<(FrogId, Entity)> = field
        .world()
        .query::<(&Frog, &FrogStatus, &Position, &Colliders)>()
        .iter()
        .filter(|(_, (_, status, _, _))| !status.isolated)
        .filter(|(_, (_, _, pos, colliders))| {
            colliders
                .circles
                .iter()
                .any(|c| rect.overlaps_circle(&c.center(pos), c.radius))
        })
        .map(|(entity, (frog, _, _, _))| (frog.id, entity))
        .collect();

    hits.sort_unstable_by_key(|(id, _)| *id);
    hits.dedup_by_key(|(id, _)| *id);
    hits.into_iter()
        .map(|(_, entity)| entity)
        .filter(|entity| field.is_alive(*entity))
        .collect()
}
