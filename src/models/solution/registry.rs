use crate::models::common::Load;
use crate::models::problem::{Actor, ActorDetail, Costs, Fleet};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Specifies an entity responsible for providing actors and keeping track of their usage.
pub struct Registry {
    available: FxHashMap<ActorKey, FxHashSet<Arc<Actor>>>,
    all: Vec<Arc<Actor>>,
}

impl Registry {
    /// Creates a new instance of `Registry`.
    pub fn new(fleet: &Fleet) -> Self {
        Self {
            available: fleet.actors.iter().cloned().fold(FxHashMap::default(), |mut acc, actor| {
                acc.entry(ActorKey::new(&actor)).or_default().insert(actor);
                acc
            }),
            all: fleet.actors.to_vec(),
        }
    }

    /// Removes actor from the list of available actors.
    /// Returns false if actor was not available.
    pub fn use_actor(&mut self, actor: &Arc<Actor>) -> bool {
        self.available.get_mut(&ActorKey::new(actor)).is_some_and(|set| set.remove(actor))
    }

    /// Adds actor to the list of available actors.
    pub fn free_actor(&mut self, actor: &Arc<Actor>) {
        self.available.entry(ActorKey::new(actor)).or_default().insert(actor.clone());
    }

    /// Returns all actors.
    pub fn all(&self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        self.all.iter().cloned()
    }

    /// Returns list of all available actors.
    pub fn available(&self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        self.available.values().flat_map(|set| set.iter().cloned())
    }

    /// Returns the next available actor from each different actor type.
    pub fn next(&self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        self.available.values().flat_map(|set| set.iter().take(1).cloned())
    }

    /// Creates a deep copy of registry.
    pub fn deep_copy(&self) -> Self {
        Self { available: self.available.clone(), all: self.all.clone() }
    }
}

/// Actors with the same key are interchangeable for insertion purposes.
#[derive(Clone, Hash, Eq, PartialEq)]
struct ActorKey {
    detail: ActorDetail,
    capacity: Load,
    driver_costs: Costs,
    vehicle_costs: Costs,
}

impl ActorKey {
    fn new(actor: &Actor) -> Self {
        Self {
            detail: actor.detail.clone(),
            capacity: actor.vehicle.capacity.clone(),
            driver_costs: actor.driver.costs.clone(),
            vehicle_costs: actor.vehicle.costs.clone(),
        }
    }
}
