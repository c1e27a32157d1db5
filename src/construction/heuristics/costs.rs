#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/costs_test.rs"]
mod costs_test;

use crate::construction::states::{ActivityContext, InsertionContext};
use crate::models::common::{Cost, Timestamp};
use crate::models::problem::{ActivityCost, TransportCost, TravelTime};
use std::sync::Arc;

/// Estimates the marginal cost of placing one activity between two neighbors.
pub struct ActivityInsertionCostCalculator {
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl ActivityInsertionCostCalculator {
    /// Creates a new instance of `ActivityInsertionCostCalculator`.
    pub fn new(
        activity: Arc<dyn ActivityCost + Send + Sync>,
        transport: Arc<dyn TransportCost + Send + Sync>,
    ) -> Self {
        Self { activity, transport }
    }

    /// Returns the cost delta of inserting the target activity between its neighbors together
    /// with the departure time at the target. The delta prices the two new transport legs minus
    /// the replaced one plus the activity service itself, so deltas of committed insertions sum
    /// up to the route cost exactly. No symmetry of the transport provider is assumed. A missing
    /// next keeps the route open: the replaced leg and the right leg contribute nothing.
    pub fn estimate(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> (Cost, Timestamp) {
        let actor = ctx.actor.as_ref();
        let (prev, target) = (activity_ctx.prev, activity_ctx.target);

        let prev_departure = prev.schedule.departure;

        let tp_cost_left = self.transport.cost(
            actor,
            prev.place.location,
            target.place.location,
            TravelTime::Departure(prev_departure),
        );
        let arrival = prev_departure
            + self.transport.duration(
                actor,
                prev.place.location,
                target.place.location,
                TravelTime::Departure(prev_departure),
            );
        let act_cost = self.activity.cost(actor, target, arrival);
        let departure = self.activity.estimate_departure(actor, target, arrival);

        let cost = match activity_ctx.next {
            Some(next) => {
                let tp_cost_right = self.transport.cost(
                    actor,
                    target.place.location,
                    next.place.location,
                    TravelTime::Departure(departure),
                );
                let tp_cost_old = self.transport.cost(
                    actor,
                    prev.place.location,
                    next.place.location,
                    TravelTime::Departure(prev_departure),
                );

                tp_cost_left + tp_cost_right - tp_cost_old + act_cost
            }
            None => tp_cost_left + act_cost,
        };

        (cost, departure)
    }
}
