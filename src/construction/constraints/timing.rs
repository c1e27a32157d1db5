#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/timing_test.rs"]
mod timing_test;

use crate::construction::constraints::*;
use crate::construction::states::{ActivityContext, InsertionContext, RouteContext};
use crate::models::common::Timestamp;
use crate::models::problem::{ActivityCost, Job, TransportCost, TravelTime};
use crate::models::solution::ActivityType;
use std::slice::Iter;
use std::sync::Arc;

/// A module which checks whether a vehicle can serve activities within their time windows.
/// Also maintains the route schedule states.
pub struct TimingConstraintModule {
    state_keys: Vec<i32>,
    constraints: Vec<ConstraintVariant>,
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl TimingConstraintModule {
    /// Creates a new instance of `TimingConstraintModule`.
    pub fn new(
        activity: Arc<dyn ActivityCost + Send + Sync>,
        transport: Arc<dyn TransportCost + Send + Sync>,
    ) -> Self {
        Self {
            state_keys: vec![LATEST_ARRIVAL_KEY, WAITING_KEY],
            constraints: vec![
                ConstraintVariant::HardRoute(Arc::new(TimeHardRouteConstraint {})),
                ConstraintVariant::HardActivity(Arc::new(TimeHardActivityConstraint {
                    activity: activity.clone(),
                    transport: transport.clone(),
                })),
            ],
            activity,
            transport,
        }
    }

    fn update_route_schedules(&self, route_ctx: &mut RouteContext) {
        let actor = route_ctx.route().actor.clone();
        let init = {
            let start = route_ctx.route().tour.start().expect("tour without start");
            (start.place.location, start.schedule.departure)
        };

        route_ctx.route_mut().tour.all_activities_mut().skip(1).fold(init, |(loc, dep), activity| {
            activity.schedule.arrival =
                dep + self.transport.duration(&actor, loc, activity.place.location, TravelTime::Departure(dep));
            activity.schedule.departure = self.activity.estimate_departure(&actor, activity, activity.schedule.arrival);

            (activity.place.location, activity.schedule.departure)
        });
    }

    fn update_route_states(&self, route_ctx: &mut RouteContext) {
        // update latest arrival and waiting states of job and break activities
        let actor = route_ctx.route().actor.clone();
        let init = (actor.detail.time.end, actor.detail.end.unwrap_or(actor.detail.start), 0_f64);

        let (route, state) = route_ctx.as_mut();

        (0..route.tour.total()).rev().fold(init, |acc, idx| {
            let activity = route.tour.get(idx).expect("invalid activity index");
            let is_terminal = activity.job.is_none() && activity.activity_type != ActivityType::Break;
            if is_terminal {
                return acc;
            }

            let (end_time, prev_loc, waiting) = acc;
            let latest_departure = end_time
                - self.transport.duration(&actor, activity.place.location, prev_loc, TravelTime::Arrival(end_time));
            let latest_arrival = self.activity.estimate_arrival(&actor, activity, latest_departure);
            let future_waiting = waiting + (activity.place.time.start - activity.schedule.arrival).max(0.);

            state.put_activity_state(LATEST_ARRIVAL_KEY, idx, latest_arrival);
            state.put_activity_state(WAITING_KEY, idx, future_waiting);

            (latest_arrival, activity.place.location, future_waiting)
        });
    }
}

impl ConstraintModule for TimingConstraintModule {
    fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        self.update_route_schedules(route_ctx);
        self.update_route_states(route_ctx);
    }

    fn state_keys(&self) -> Iter<'_, i32> {
        self.state_keys.iter()
    }

    fn get_constraints(&self) -> Iter<'_, ConstraintVariant> {
        self.constraints.iter()
    }
}

/// Checks whether the job's time windows can intersect the actor's operating time at all.
struct TimeHardRouteConstraint {}

impl HardRouteConstraint for TimeHardRouteConstraint {
    fn evaluate_job(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation> {
        let operating = crate::models::common::TimeWindow::new(ctx.departure, ctx.actor.detail.time.end);

        let has_time_intersection = match ctx.job {
            Job::Single(single) => single.place.time.intersects(&operating),
            Job::Pair(pair) => pair.pickup.time.intersects(&operating) && pair.delivery.time.intersects(&operating),
        };

        if has_time_intersection { None } else { Some(RouteConstraintViolation { code: ViolationCode::TimeWindow }) }
    }
}

/// Checks time window feasibility of the candidate activity between its would-be neighbors.
struct TimeHardActivityConstraint {
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl HardActivityConstraint for TimeHardActivityConstraint {
    fn evaluate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ActivityConstraintStatus {
        let actor = ctx.actor.as_ref();

        let prev = activity_ctx.prev;
        let target = activity_ctx.target;
        let next = activity_ctx.next;

        let departure = prev.schedule.departure;

        if actor.detail.time.end < prev.place.time.start
            || actor.detail.time.end < target.place.time.start
            || next.is_some_and(|next| actor.detail.time.end < next.place.time.start)
        {
            return fail();
        }

        let (next_act_location, latest_arr_time_at_next) = if let Some(next) = next {
            // closed tour, or a job activity ahead
            let latest = ctx
                .route_ctx
                .state()
                .get_activity_state::<Timestamp>(LATEST_ARRIVAL_KEY, activity_ctx.index + 1)
                .copied()
                .unwrap_or(next.place.time.end);
            (next.place.location, latest)
        } else {
            // open tour tail
            (target.place.location, target.place.time.end.min(actor.detail.time.end))
        };

        let arr_time_at_next = departure
            + self.transport.duration(actor, prev.place.location, next_act_location, TravelTime::Departure(departure));

        if arr_time_at_next > latest_arr_time_at_next {
            return fail();
        }
        if target.place.time.start > latest_arr_time_at_next {
            return skip();
        }

        let arr_time_at_target = departure
            + self.transport.duration(
                actor,
                prev.place.location,
                target.place.location,
                TravelTime::Departure(departure),
            );

        let latest_departure_at_target = latest_arr_time_at_next
            - self.transport.duration(
                actor,
                target.place.location,
                next_act_location,
                TravelTime::Arrival(latest_arr_time_at_next),
            );

        let latest_arr_time_at_target =
            target.place.time.end.min(self.activity.estimate_arrival(actor, target, latest_departure_at_target));

        if arr_time_at_target > latest_arr_time_at_target {
            return skip();
        }

        if next.is_none() {
            return ActivityConstraintStatus::Fulfilled;
        }

        let end_time_at_target = self.activity.estimate_departure(actor, target, arr_time_at_target);

        let arr_time_at_next = end_time_at_target
            + self.transport.duration(
                actor,
                target.place.location,
                next_act_location,
                TravelTime::Departure(end_time_at_target),
            );

        if arr_time_at_next > latest_arr_time_at_next { skip() } else { ActivityConstraintStatus::Fulfilled }
    }
}

/// The scanned position and all positions after it are infeasible.
fn fail() -> ActivityConstraintStatus {
    ActivityConstraintStatus::NotFulfilledBreak(ViolationCode::TimeWindow)
}

/// Only the scanned position is infeasible.
fn skip() -> ActivityConstraintStatus {
    ActivityConstraintStatus::NotFulfilled(ViolationCode::TimeWindow)
}
