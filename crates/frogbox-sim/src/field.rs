//! The field: owns the hecs world of frogs and a registry of live frogs.
//!
//! Every frog removal is queued exactly once as a pending notification,
//! whether it went through [`Field::destroy`] or vanished from the world
//! some other way (detected by [`Field::reconcile`]).

use std::collections::HashMap;

use hecs::{Entity, EntityBuilder, World};

use frogbox_core::components::*;
use frogbox_core::enums::{FrogClass, FrogColor};
use frogbox_core::types::{FrogId, Position};

/// What was removed by [`Field::destroy`].
#[derive(Debug, Clone, Copy)]
pub struct DestroyedFrog {
    pub frog: Frog,
    pub position: Position,
    pub explosion_affected: bool,
}

/// Component bundle for a new frog, minus its id.
#[derive(Debug, Clone)]
pub struct FrogBundle {
    pub color: FrogColor,
    pub position: Position,
    pub colliders: Colliders,
    pub detonator: Option<Detonator>,
    pub cycle: ColorCycle,
}

#[derive(Default)]
pub struct Field {
    world: World,
    registry: HashMap<Entity, FrogId>,
    pending_removals: Vec<FrogId>,
    next_frog_id: u32,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for collaborators outside the core.
    /// Anything they despawn is picked up by the next [`Field::reconcile`].
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn a frog and register it as live.
    pub fn spawn(&mut self, bundle: FrogBundle) -> (Entity, FrogId) {
        let id = FrogId(self.next_frog_id);
        self.next_frog_id += 1;

        let mut builder = EntityBuilder::new();
        builder.add(Frog {
            id,
            class: bundle.color.class(),
            color: bundle.color,
        });
        builder.add(FrogStatus::default());
        builder.add(bundle.position);
        builder.add(bundle.colliders);
        builder.add(bundle.cycle);
        if let Some(detonator) = bundle.detonator {
            builder.add(detonator);
        }
        let entity = self.world.spawn(builder.build());
        self.registry.insert(entity, id);
        (entity, id)
    }

    /// Number of live frogs.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.registry.contains_key(&entity) && self.world.contains(entity)
    }

    pub fn frog(&self, entity: Entity) -> Option<Frog> {
        self.world.get::<&Frog>(entity).ok().map(|f| *f)
    }

    pub fn status(&self, entity: Entity) -> Option<FrogStatus> {
        self.world.get::<&FrogStatus>(entity).ok().map(|s| *s)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn detonator(&self, entity: Entity) -> Option<Detonator> {
        self.world.get::<&Detonator>(entity).ok().map(|d| *d)
    }

    /// Mutate a frog's status flags. Returns false for stale entities.
    pub fn update_status(&mut self, entity: Entity, f: impl FnOnce(&mut FrogStatus)) -> bool {
        match self.world.get::<&mut FrogStatus>(entity) {
            Ok(mut status) => {
                f(&mut status);
                true
            }
            Err(_) => false,
        }
    }

    /// Force a frog's color and restart its cycle timer with a new hold.
    pub fn force_color(&mut self, entity: Entity, color: FrogColor, hold_secs: f64) -> bool {
        let Ok((frog, cycle)) = self
            .world
            .query_one_mut::<(&mut Frog, &mut ColorCycle)>(entity)
        else {
            return false;
        };
        if !frog.class.accepts(color) {
            return false;
        }
        frog.color = color;
        cycle.elapsed_secs = 0.0;
        cycle.hold_secs = hold_secs;
        true
    }

    pub fn entity_of(&self, id: FrogId) -> Option<Entity> {
        self.registry
            .iter()
            .find(|(_, frog_id)| **frog_id == id)
            .map(|(entity, _)| *entity)
    }

    /// All live frogs, ordered by id.
    pub fn live_entities(&self) -> Vec<Entity> {
        let mut live: Vec<(FrogId, Entity)> =
            self.registry.iter().map(|(e, id)| (*id, *e)).collect();
        live.sort_unstable_by_key(|(id, _)| *id);
        live.into_iter().map(|(_, e)| e).collect()
    }

    /// Live frogs of one class, ordered by id.
    pub fn live_of_class(&self, class: FrogClass) -> Vec<Entity> {
        self.live_entities()
            .into_iter()
            .filter(|e| self.frog(*e).is_some_and(|f| f.class == class))
            .collect()
    }

    /// Remove a frog now. Returns `None` if it was already gone.
    pub fn destroy(&mut self, entity: Entity, explosion_affected: bool) -> Option<DestroyedFrog> {
        let id = self.registry.remove(&entity)?;
        self.update_status(entity, |s| s.explosion_affected = explosion_affected);
        let frog = self.frog(entity);
        let position = self.position(entity).unwrap_or_default();
        let _ = self.world.despawn(entity);
        self.pending_removals.push(id);

        frog.map(|frog| DestroyedFrog {
            frog,
            position,
            explosion_affected,
        })
    }

    /// Detect frogs removed from the world behind the field's back and
    /// queue their notifications. Returns how many were found.
    pub fn reconcile(&mut self) -> usize {
        let vanished: Vec<Entity> = self
            .registry
            .keys()
            .filter(|e| !self.world.contains(**e))
            .copied()
            .collect();
        for entity in &vanished {
            if let Some(id) = self.registry.remove(entity) {
                self.pending_removals.push(id);
            }
        }
        vanished.len()
    }

    /// Take the queued removal notifications.
    pub fn drain_removals(&mut self) -> Vec<FrogId> {
        std::mem::take(&mut self.pending_removals)
    }

    /// Discard every frog without notifications (level reset).
    pub fn clear(&mut self) {
        self.world.clear();
        self.registry.clear();
        self.pending_removals.clear();
    }
}
