use crate::models::problem::Actor;
use crate::models::solution::{Route, Tour};
use nohash_hasher::BuildNoHashHasher;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

type StateValue = Arc<dyn Any + Send + Sync>;

/// Provides a way to associate arbitrary state within the route and its activities.
/// State keys are opaque handles: the store associates values without interpreting them.
/// Lookups never fail, an unset key yields `None` and the caller supplies the default.
#[derive(Clone, Default)]
pub struct RouteState {
    route_states: HashMap<i32, StateValue, BuildNoHashHasher<i32>>,
    activity_states: FxHashMap<(usize, i32), StateValue>,
}

impl RouteState {
    /// Gets value associated with the route converted to given type.
    pub fn get_route_state<T: Send + Sync + 'static>(&self, key: i32) -> Option<&T> {
        self.route_states.get(&key).and_then(|any| any.downcast_ref::<T>())
    }

    /// Gets value associated with the activity at given tour index converted to given type.
    pub fn get_activity_state<T: Send + Sync + 'static>(&self, key: i32, activity_idx: usize) -> Option<&T> {
        self.activity_states.get(&(activity_idx, key)).and_then(|any| any.downcast_ref::<T>())
    }

    /// Puts value associated with the route.
    pub fn put_route_state<T: Send + Sync + 'static>(&mut self, key: i32, value: T) {
        self.route_states.insert(key, Arc::new(value));
    }

    /// Puts value associated with the activity at given tour index.
    pub fn put_activity_state<T: Send + Sync + 'static>(&mut self, key: i32, activity_idx: usize, value: T) {
        self.activity_states.insert((activity_idx, key), Arc::new(value));
    }

    /// Removes all states.
    pub fn clear(&mut self) {
        self.route_states.clear();
        self.activity_states.clear();
    }
}

/// Specifies insertion context for a route: a route with its associated state.
pub struct RouteContext {
    route: Route,
    state: RouteState,
    is_stale: bool,
}

impl RouteContext {
    /// Creates a new instance of `RouteContext` with an empty tour for given actor.
    pub fn new(actor: Arc<Actor>) -> Self {
        let tour = Tour::new(&actor);
        Self::new_with_state(Route { actor, tour }, RouteState::default())
    }

    /// Creates a new instance of `RouteContext` with arguments provided.
    pub fn new_with_state(route: Route, state: RouteState) -> Self {
        RouteContext { route, state, is_stale: true }
    }

    /// Creates a deep copy of `RouteContext`.
    pub fn deep_copy(&self) -> Self {
        RouteContext { route: self.route.deep_copy(), state: self.state.clone(), is_stale: self.is_stale }
    }

    /// Returns a reference to route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns a reference to state.
    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// Unwraps given `RouteContext` as pair of mutable references.
    /// Marks context as stale.
    pub fn as_mut(&mut self) -> (&mut Route, &mut RouteState) {
        self.is_stale = true;
        (&mut self.route, &mut self.state)
    }

    /// Returns mutable reference to used `Route`.
    /// Marks context as stale.
    pub fn route_mut(&mut self) -> &mut Route {
        self.is_stale = true;
        &mut self.route
    }

    /// Returns mutable reference to used `RouteState`.
    /// Marks context as stale.
    pub fn state_mut(&mut self) -> &mut RouteState {
        self.is_stale = true;
        &mut self.state
    }

    /// Returns true if context is stale: the route was mutated after the last state recomputation.
    /// The flag is used to recompute states only for routes actually touched by a change.
    pub fn is_stale(&self) -> bool {
        self.is_stale
    }

    /// Marks context stale or resets the flag.
    pub(crate) fn mark_stale(&mut self, is_stale: bool) {
        self.is_stale = is_stale;
    }
}

impl PartialEq<RouteContext> for RouteContext {
    fn eq(&self, other: &RouteContext) -> bool {
        std::ptr::eq(self.route.actor.as_ref(), other.route.actor.as_ref())
    }
}

impl Eq for RouteContext {}
