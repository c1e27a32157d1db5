#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/evaluators_test.rs"]
mod evaluators_test;

use crate::construction::constraints::{ActivityConstraintStatus, ConstraintPipeline, ViolationCode};
use crate::construction::heuristics::{ActivityInsertionCostCalculator, InsertionResult};
use crate::construction::states::{ActivityContext, InsertionContext, RouteContext};
use crate::models::common::{Cost, Schedule};
use crate::models::problem::{ActivityCost, Job, JobShape, TransportCost, TravelTime};
use crate::models::solution::{Activity, ActivityType};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Finds the best feasible insertion of one job into one route.
pub trait JobInsertionCalculator {
    /// Returns the cheapest feasible insertion of the job whose total cost is strictly below
    /// `best_known_cost`. When no position qualifies, returns a failure which carries the
    /// violation code of the earliest rejected position.
    fn best_insertion(&self, ctx: &InsertionContext, best_known_cost: Cost) -> InsertionResult;
}

/// Evaluates insertion of a job with a single activity.
pub struct SingleInsertionCalculator {
    pipeline: Arc<ConstraintPipeline>,
    cost_calculator: ActivityInsertionCostCalculator,
}

impl SingleInsertionCalculator {
    /// Creates a new instance of `SingleInsertionCalculator`.
    pub fn new(
        pipeline: Arc<ConstraintPipeline>,
        activity: Arc<dyn ActivityCost + Send + Sync>,
        transport: Arc<dyn TransportCost + Send + Sync>,
    ) -> Self {
        Self { pipeline, cost_calculator: ActivityInsertionCostCalculator::new(activity, transport) }
    }
}

impl JobInsertionCalculator for SingleInsertionCalculator {
    fn best_insertion(&self, ctx: &InsertionContext, best_known_cost: Cost) -> InsertionResult {
        if let Some(violation) = self.pipeline.evaluate_hard_route(ctx) {
            return InsertionResult::make_failure_with_code(violation.code, Some(ctx.job.clone()));
        }

        let single = ctx.job.to_single();
        let route_penalty = self.pipeline.evaluate_soft_route(ctx);
        let activity = Activity::new_with_job(ctx.job.clone(), &single.place, ActivityType::Service);

        let mut best_cost = best_known_cost;
        let mut best_position: Option<usize> = None;
        let mut violation: Option<ViolationCode> = None;

        for (leg, index) in ctx.route_ctx.route().tour.legs() {
            let (prev, next) = unwrap_leg(leg);
            let activity_ctx = ActivityContext { index, prev, target: &activity, next };

            match self.pipeline.evaluate_hard_activity(ctx, &activity_ctx) {
                ActivityConstraintStatus::Fulfilled => {
                    let (marginal, _) = self.cost_calculator.estimate(ctx, &activity_ctx);
                    let total = marginal + self.pipeline.evaluate_soft_activity(ctx, &activity_ctx) + route_penalty;

                    if total < best_cost {
                        best_cost = total;
                        best_position = Some(index);
                    }
                }
                ActivityConstraintStatus::NotFulfilled(code) => {
                    violation.get_or_insert(code);
                }
                ActivityConstraintStatus::NotFulfilledBreak(code) => {
                    violation.get_or_insert(code);
                    break;
                }
            }
        }

        match best_position {
            Some(index) => InsertionResult::make_success(
                best_cost,
                ctx.job.clone(),
                vec![(activity, index)],
                ctx.actor.clone(),
                ctx.departure,
            ),
            None => InsertionResult::make_failure_with_code(
                violation.unwrap_or(ViolationCode::Unknown),
                Some(ctx.job.clone()),
            ),
        }
    }
}

/// Evaluates insertion of a job with paired pickup and delivery activities: for every feasible
/// pickup position scans all delivery positions at or after it.
pub struct PairInsertionCalculator {
    pipeline: Arc<ConstraintPipeline>,
    cost_calculator: ActivityInsertionCostCalculator,
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl PairInsertionCalculator {
    /// Creates a new instance of `PairInsertionCalculator`.
    pub fn new(
        pipeline: Arc<ConstraintPipeline>,
        activity: Arc<dyn ActivityCost + Send + Sync>,
        transport: Arc<dyn TransportCost + Send + Sync>,
    ) -> Self {
        Self {
            pipeline,
            cost_calculator: ActivityInsertionCostCalculator::new(activity.clone(), transport.clone()),
            activity,
            transport,
        }
    }
}

impl JobInsertionCalculator for PairInsertionCalculator {
    fn best_insertion(&self, ctx: &InsertionContext, best_known_cost: Cost) -> InsertionResult {
        if let Some(violation) = self.pipeline.evaluate_hard_route(ctx) {
            return InsertionResult::make_failure_with_code(violation.code, Some(ctx.job.clone()));
        }

        let pair = ctx.job.to_pair();
        let actor = ctx.actor.as_ref();
        let route_penalty = self.pipeline.evaluate_soft_route(ctx);
        let pickup = Activity::new_with_job(ctx.job.clone(), &pair.pickup, ActivityType::Pickup);
        let delivery = Activity::new_with_job(ctx.job.clone(), &pair.delivery, ActivityType::Delivery);

        let tour = &ctx.route_ctx.route().tour;
        let last_position = tour.job_activity_count();

        let mut best_cost = best_known_cost;
        let mut best_positions: Option<(usize, usize)> = None;
        let mut violation: Option<ViolationCode> = None;

        'pickup: for (leg, pickup_idx) in tour.legs() {
            let (prev, next) = unwrap_leg(leg);
            let pickup_ctx = ActivityContext { index: pickup_idx, prev, target: &pickup, next };

            match self.pipeline.evaluate_hard_activity(ctx, &pickup_ctx) {
                ActivityConstraintStatus::Fulfilled => {}
                ActivityConstraintStatus::NotFulfilled(code) => {
                    violation.get_or_insert(code);
                    continue;
                }
                ActivityConstraintStatus::NotFulfilledBreak(code) => {
                    violation.get_or_insert(code);
                    break;
                }
            }

            let (pickup_cost, pickup_departure) = self.cost_calculator.estimate(ctx, &pickup_ctx);
            let pickup_total = pickup_cost + self.pipeline.evaluate_soft_activity(ctx, &pickup_ctx);

            // the delivery scan sees the tour as if the pickup was already placed: a moving
            // simulated previous activity carries the schedule shifted by the pickup detour,
            // while position indices and route states stay relative to the unchanged tour
            let mut sim_prev = pickup.deep_copy();
            sim_prev.schedule = Schedule::new(
                prev.schedule.departure
                    + self.transport.duration(
                        actor,
                        prev.place.location,
                        pickup.place.location,
                        TravelTime::Departure(prev.schedule.departure),
                    ),
                pickup_departure,
            );

            for delivery_idx in pickup_idx..=last_position {
                let delivery_ctx = ActivityContext {
                    index: delivery_idx,
                    prev: &sim_prev,
                    target: &delivery,
                    next: tour.get(delivery_idx + 1),
                };

                match self.pipeline.evaluate_hard_activity(ctx, &delivery_ctx) {
                    ActivityConstraintStatus::Fulfilled => {
                        let (delivery_cost, _) = self.cost_calculator.estimate(ctx, &delivery_ctx);
                        let total = pickup_total
                            + delivery_cost
                            + self.pipeline.evaluate_soft_activity(ctx, &delivery_ctx)
                            + route_penalty;

                        if total < best_cost {
                            best_cost = total;
                            best_positions = Some((pickup_idx, delivery_idx));
                        }
                    }
                    ActivityConstraintStatus::NotFulfilled(code) => {
                        violation.get_or_insert(code);
                    }
                    ActivityConstraintStatus::NotFulfilledBreak(code) => {
                        violation.get_or_insert(code);
                        continue 'pickup;
                    }
                }

                if delivery_idx < last_position {
                    sim_prev = self.advance(ctx, &sim_prev, delivery_idx + 1);
                }
            }
        }

        match best_positions {
            Some((pickup_idx, delivery_idx)) => InsertionResult::make_success(
                best_cost,
                ctx.job.clone(),
                vec![(pickup, pickup_idx), (delivery, delivery_idx)],
                ctx.actor.clone(),
                ctx.departure,
            ),
            None => InsertionResult::make_failure_with_code(
                violation.unwrap_or(ViolationCode::Unknown),
                Some(ctx.job.clone()),
            ),
        }
    }
}

impl PairInsertionCalculator {
    /// Moves the simulated previous activity over the job activity at given tour index,
    /// rescheduling it after the one passed before.
    fn advance(&self, ctx: &InsertionContext, sim_prev: &Activity, follower_idx: usize) -> Activity {
        let actor = ctx.actor.as_ref();
        let follower = ctx.route_ctx.route().tour.get(follower_idx);
        let mut shifted = match follower {
            Some(follower) => follower.deep_copy(),
            None => panic!("broken delivery scan: no activity at index {follower_idx}"),
        };

        let departure = sim_prev.schedule.departure;
        let arrival = departure
            + self.transport.duration(
                actor,
                sim_prev.place.location,
                shifted.place.location,
                TravelTime::Departure(departure),
            );
        shifted.schedule = Schedule::new(arrival, self.activity.estimate_departure(actor, &shifted, arrival));

        shifted
    }
}

/// Routes insertion evaluation to the calculator registered for the job shape.
#[derive(Default)]
pub struct InsertionDispatcher {
    calculators: FxHashMap<JobShape, Box<dyn JobInsertionCalculator + Send + Sync>>,
}

impl InsertionDispatcher {
    /// Creates a dispatcher with default calculators for all known job shapes.
    pub fn new_default(
        pipeline: Arc<ConstraintPipeline>,
        activity: Arc<dyn ActivityCost + Send + Sync>,
        transport: Arc<dyn TransportCost + Send + Sync>,
    ) -> Self {
        let mut dispatcher = Self::default();
        dispatcher
            .register(
                JobShape::Single,
                Box::new(SingleInsertionCalculator::new(pipeline.clone(), activity.clone(), transport.clone())),
            )
            .register(JobShape::Pair, Box::new(PairInsertionCalculator::new(pipeline, activity, transport)));

        dispatcher
    }

    /// Registers a calculator for given job shape replacing a previous one.
    pub fn register(&mut self, shape: JobShape, calculator: Box<dyn JobInsertionCalculator + Send + Sync>) -> &mut Self {
        self.calculators.insert(shape, calculator);
        self
    }

    /// Evaluates the best insertion of the job into the route.
    /// Panics if no calculator is registered for the job shape: this is a configuration
    /// error which must surface before any search starts.
    pub fn evaluate(&self, route_ctx: &RouteContext, job: &Job, best_known_cost: Cost) -> InsertionResult {
        let ctx = InsertionContext::new(route_ctx, job);

        match self.calculators.get(&job.shape()) {
            Some(calculator) => calculator.best_insertion(&ctx, best_known_cost),
            None => panic!("no insertion calculator registered for job shape: {:?}", job.shape()),
        }
    }
}

fn unwrap_leg(leg: &[Activity]) -> (&Activity, Option<&Activity>) {
    match leg {
        [prev] => (prev, None),
        [prev, next] => (prev, Some(next)),
        _ => panic!("unexpected leg configuration"),
    }
}
