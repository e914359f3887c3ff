//! Deferred structural mutation.
//!
//! Systems never spawn, despawn, or add and remove components on the live
//! world while iterating it. They record the change here instead, and the
//! engine applies everything once per tick at the end of the pipeline.

use std::any::TypeId;
use std::collections::HashSet;

use hecs::{Component, Entity, EntityBuilder, World};

type Deferred = Box<dyn FnOnce(&mut World) -> bool + Send>;

enum Mutation {
    Spawn(EntityBuilder),
    Despawn(Entity),
    Modify(Deferred),
}

/// Counts of what a flush actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub spawned: usize,
    pub despawned: usize,
    pub modified: usize,
}

#[derive(Default)]
pub struct MutationQueue {
    ops: Vec<Mutation>,
    pending_despawn: HashSet<Entity>,
    pending_insert: HashSet<(Entity, TypeId)>,
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, builder: EntityBuilder) {
        self.ops.push(Mutation::Spawn(builder));
    }

    /// Queue a despawn. A second request for the same entity is ignored.
    pub fn despawn(&mut self, entity: Entity) {
        if self.pending_despawn.insert(entity) {
            self.ops.push(Mutation::Despawn(entity));
        }
    }

    #[inline]
    pub fn is_pending_despawn(&self, entity: Entity) -> bool {
        self.pending_despawn.contains(&entity)
    }

    /// Add or replace a component.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) {
        self.pending_insert.insert((entity, TypeId::of::<T>()));
        self.ops.push(Mutation::Modify(Box::new(move |world: &mut World| {
            world.insert_one(entity, component).is_ok()
        })));
    }

    /// True when a `T` is queued for `entity` this tick.
    #[inline]
    pub fn is_pending_insert<T: Component>(&self, entity: Entity) -> bool {
        self.pending_insert.contains(&(entity, TypeId::of::<T>()))
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) {
        self.ops.push(Mutation::Modify(Box::new(move |world: &mut World| {
            world.remove_one::<T>(entity).is_ok()
        })));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every queued mutation in request order. Mutations that target
    /// an entity which no longer exists are skipped.
    pub fn flush(&mut self, world: &mut World) -> FlushStats {
        let mut stats = FlushStats::default();
        for op in self.ops.drain(..) {
            match op {
                Mutation::Spawn(mut builder) => {
                    world.spawn(builder.build());
                    stats.spawned += 1;
                }
                Mutation::Despawn(entity) => {
                    if world.despawn(entity).is_ok() {
                        stats.despawned += 1;
                    }
                }
                Mutation::Modify(apply) => {
                    if apply(world) {
                        stats.modified += 1;
                    }
                }
            }
        }
        self.pending_despawn.clear();
        self.pending_insert.clear();
        stats
    }
}
