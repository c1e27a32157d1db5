#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/capacity_test.rs"]
mod capacity_test;

use crate::construction::constraints::*;
use crate::construction::states::{ActivityContext, InsertionContext, RouteContext, RouteState};
use crate::models::common::{Demand, Load};
use crate::models::problem::Job;
use crate::models::solution::Activity;
use std::slice::Iter;
use std::sync::Arc;

/// A module which checks whether a vehicle can handle a job's demand.
pub struct CapacityConstraintModule {
    state_keys: Vec<i32>,
    constraints: Vec<ConstraintVariant>,
}

impl Default for CapacityConstraintModule {
    fn default() -> Self {
        Self {
            state_keys: vec![
                CURRENT_LOAD_KEY,
                MAX_PAST_LOAD_KEY,
                MAX_FUTURE_LOAD_KEY,
                BEGIN_LOAD_KEY,
                END_LOAD_KEY,
                MAX_LOAD_KEY,
            ],
            constraints: vec![
                ConstraintVariant::HardRoute(Arc::new(LoadHardRouteConstraint {})),
                ConstraintVariant::HardActivity(Arc::new(LoadHardActivityConstraint {})),
            ],
        }
    }
}

impl ConstraintModule for CapacityConstraintModule {
    fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        let (route, state) = route_ctx.as_mut();

        // static deliveries are loaded at the route start
        let begin_load = route
            .tour
            .all_activities()
            .filter_map(get_demand)
            .fold(Load::default(), |acc, demand| acc + demand.delivery.0);

        // actual load at each activity and the max load discovered in the past
        let (end_load, max_load) = route.tour.all_activities().enumerate().fold(
            (begin_load.clone(), Load::default()),
            |(current, max), (idx, activity)| {
                let current = current + get_demand(activity).map(|d| d.change()).unwrap_or_default();
                let max = max.max_load(&current);

                state.put_activity_state(CURRENT_LOAD_KEY, idx, current.clone());
                state.put_activity_state(MAX_PAST_LOAD_KEY, idx, max.clone());

                (current, max)
            },
        );

        (0..route.tour.total()).rev().fold(Load::default(), |max, idx| {
            let current = state.get_activity_state::<Load>(CURRENT_LOAD_KEY, idx).cloned().unwrap_or_default();
            let max = max.max_load(&current);
            state.put_activity_state(MAX_FUTURE_LOAD_KEY, idx, max.clone());
            max
        });

        state.put_route_state(BEGIN_LOAD_KEY, begin_load);
        state.put_route_state(END_LOAD_KEY, end_load);
        state.put_route_state(MAX_LOAD_KEY, max_load);
    }

    fn state_keys(&self) -> Iter<'_, i32> {
        self.state_keys.iter()
    }

    fn get_constraints(&self) -> Iter<'_, ConstraintVariant> {
        self.constraints.iter()
    }
}

/// Rejects a job which cannot be carried by the vehicle at any position of the route.
struct LoadHardRouteConstraint {}

impl HardRouteConstraint for LoadHardRouteConstraint {
    fn evaluate_job(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation> {
        let capacity = &ctx.actor.vehicle.capacity;
        let state = ctx.route_ctx.state();

        let demand = match ctx.job {
            Job::Single(single) => single.demand.clone(),
            Job::Pair(pair) => Demand {
                pickup: (Default::default(), pair.demand.clone()),
                delivery: (Default::default(), pair.demand.clone()),
            },
        };

        let pickup_total = demand.pickup.0.clone() + demand.pickup.1.clone();
        let delivery_total = demand.delivery.0.clone() + demand.delivery.1.clone();

        let begin_load = state.get_route_state::<Load>(BEGIN_LOAD_KEY).cloned().unwrap_or_default();
        let end_load = state.get_route_state::<Load>(END_LOAD_KEY).cloned().unwrap_or_default();

        let can_handle = pickup_total.can_fit(capacity)
            && delivery_total.can_fit(capacity)
            && (begin_load + demand.delivery.0).can_fit(capacity)
            && (end_load + demand.pickup.0).can_fit(capacity);

        if can_handle { None } else { Some(RouteConstraintViolation { code: ViolationCode::Capacity }) }
    }
}

/// Checks load feasibility of the candidate activity at the scanned position.
struct LoadHardActivityConstraint {}

impl HardActivityConstraint for LoadHardActivityConstraint {
    fn evaluate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ActivityConstraintStatus {
        let demand = match get_demand(activity_ctx.target) {
            Some(demand) => demand,
            None => return ActivityConstraintStatus::Fulfilled,
        };

        demand_violation(ctx.route_ctx.state(), activity_ctx.index, &ctx.actor.vehicle.capacity, demand)
    }
}

/// Checks given demand against the load states at the pivot activity.
/// A static delivery overload rejects onward: the max load seen in the past only grows as
/// the scan moves forward. A pickup overload rejects the current position only: the max
/// load still ahead shrinks as the scan advances past the load peak.
fn demand_violation(state: &RouteState, pivot_idx: usize, capacity: &Load, demand: Demand) -> ActivityConstraintStatus {
    if demand.delivery.0.is_not_empty() {
        let past = state.get_activity_state::<Load>(MAX_PAST_LOAD_KEY, pivot_idx).cloned().unwrap_or_default();
        if !(past + demand.delivery.0.clone()).can_fit(capacity) {
            return ActivityConstraintStatus::NotFulfilledBreak(ViolationCode::Capacity);
        }
    }

    let change = demand.change();

    if change.is_not_empty() {
        let future = state.get_activity_state::<Load>(MAX_FUTURE_LOAD_KEY, pivot_idx).cloned().unwrap_or_default();
        if !(future + change.clone()).can_fit(capacity) {
            return ActivityConstraintStatus::NotFulfilled(ViolationCode::Capacity);
        }
    }

    let current = state.get_activity_state::<Load>(CURRENT_LOAD_KEY, pivot_idx).cloned().unwrap_or_default();
    if (current + change).can_fit(capacity) {
        ActivityConstraintStatus::Fulfilled
    } else {
        ActivityConstraintStatus::NotFulfilled(ViolationCode::Capacity)
    }
}

fn get_demand(activity: &Activity) -> Option<Demand> {
    activity.demand()
}
