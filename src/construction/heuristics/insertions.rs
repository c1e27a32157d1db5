#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/insertions_test.rs"]
mod insertions_test;

use crate::construction::constraints::{ConstraintPipeline, ViolationCode};
use crate::construction::heuristics::{InsertionDispatcher, ResultSelector};
use crate::construction::states::{RouteContext, SolutionContext};
use crate::models::common::{Cost, Schedule, Timestamp};
use crate::models::problem::{Actor, Job};
use crate::models::solution::Activity;
use crate::utils::map_reduce;
use std::sync::Arc;

/// Specifies a feasible insertion of one job into one route.
pub struct InsertionSuccess {
    /// Total cost of the insertion.
    pub cost: Cost,

    /// A job which is inserted.
    pub job: Job,

    /// Activities with their insertion positions, relative to the tour before insertion,
    /// ordered by the position ascending.
    pub activities: Vec<(Activity, usize)>,

    /// An actor which serves the route.
    pub actor: Arc<Actor>,

    /// A departure time from the route start used during evaluation.
    pub departure: Timestamp,
}

/// Specifies the reason why a job cannot be inserted. Infeasibility is a value, not an error:
/// the caller decides what to do with an unassignable job.
pub struct InsertionFailure {
    /// A violation code of the earliest rejection met during evaluation.
    pub code: ViolationCode,

    /// A job which failed to be inserted, if any specific one is known.
    pub job: Option<Job>,
}

/// Specifies the result of an insertion evaluation.
pub enum InsertionResult {
    /// An insertion is possible at a concrete place with a concrete cost.
    Success(InsertionSuccess),
    /// An insertion is not possible.
    Failure(InsertionFailure),
}

impl InsertionResult {
    /// Creates a result which specifies a success.
    pub fn make_success(
        cost: Cost,
        job: Job,
        activities: Vec<(Activity, usize)>,
        actor: Arc<Actor>,
        departure: Timestamp,
    ) -> Self {
        Self::Success(InsertionSuccess { cost, job, activities, actor, departure })
    }

    /// Creates a result which specifies a failure without any details.
    pub fn make_failure() -> Self {
        Self::make_failure_with_code(ViolationCode::Unknown, None)
    }

    /// Creates a result which specifies a failure with given code and failed job.
    pub fn make_failure_with_code(code: ViolationCode, job: Option<Job>) -> Self {
        Self::Failure(InsertionFailure { code, job })
    }

    /// Compares two insertion results and returns the cheaper one. A success always beats
    /// a failure, between failures the one with job details is preferred.
    pub fn choose_best_result(left: Self, right: Self) -> Self {
        match (&left, &right) {
            (Self::Success(lhs), Self::Success(rhs)) => {
                if lhs.cost < rhs.cost {
                    left
                } else {
                    right
                }
            }
            (Self::Success(_), Self::Failure(_)) => left,
            (Self::Failure(_), Self::Success(_)) => right,
            (Self::Failure(lhs), Self::Failure(_)) => {
                if lhs.job.is_some() {
                    left
                } else {
                    right
                }
            }
        }
    }
}

/// Commits insertion successes to routes keeping the route states up to date.
pub struct Inserter {
    pipeline: Arc<ConstraintPipeline>,
}

impl Inserter {
    /// Creates a new instance of `Inserter`.
    pub fn new(pipeline: Arc<ConstraintPipeline>) -> Self {
        Self { pipeline }
    }

    /// Applies the insertion success to the route: stamps the departure time on the route
    /// start, splices the job activities into the tour and lets the constraint pipeline
    /// recompute route states.
    pub fn commit(&self, route_ctx: &mut RouteContext, success: InsertionSuccess) {
        let InsertionSuccess { job, activities, departure, .. } = success;

        {
            let route = route_ctx.route_mut();

            if let Some(start) = route.tour.get_mut(0) {
                start.schedule = Schedule::new(departure, departure);
            }

            // each position is relative to the tour before insertion and shifts by one for
            // every activity spliced in front of it
            activities.into_iter().enumerate().for_each(|(offset, (activity, index))| {
                route.tour.insert_at(activity, index + 1 + offset);
            });
        }

        self.pipeline.accept_insertion(route_ctx, &job);
    }
}

/// A greedy insertion heuristic: on every iteration evaluates all remaining jobs against all
/// routes, commits the best found insertion and repeats until all jobs are assigned or proven
/// unassignable.
pub struct InsertionHeuristic {
    pipeline: Arc<ConstraintPipeline>,
    dispatcher: Arc<InsertionDispatcher>,
    inserter: Inserter,
    result_selector: Box<dyn ResultSelector + Send + Sync>,
}

impl InsertionHeuristic {
    /// Creates a new instance of `InsertionHeuristic`.
    pub fn new(
        pipeline: Arc<ConstraintPipeline>,
        dispatcher: Arc<InsertionDispatcher>,
        result_selector: Box<dyn ResultSelector + Send + Sync>,
    ) -> Self {
        Self { pipeline: pipeline.clone(), dispatcher, inserter: Inserter::new(pipeline), result_selector }
    }

    /// Processes all required jobs of the solution.
    pub fn process(&self, mut solution_ctx: SolutionContext) -> SolutionContext {
        self.pipeline.accept_solution_state(&mut solution_ctx);

        while !solution_ctx.required.is_empty() {
            let result = self.evaluate_all(&solution_ctx);

            match result {
                InsertionResult::Success(success) => self.apply_success(&mut solution_ctx, success),
                InsertionResult::Failure(failure) => Self::apply_failure(&mut solution_ctx, failure),
            }
        }

        solution_ctx
    }

    /// Evaluates all required jobs against existing routes and one fresh route per distinct
    /// actor type, in parallel.
    fn evaluate_all(&self, solution_ctx: &SolutionContext) -> InsertionResult {
        let new_routes =
            solution_ctx.registry.next().map(RouteContext::new).collect::<Vec<_>>();
        let route_ctxs = solution_ctx.routes.iter().chain(new_routes.iter()).collect::<Vec<_>>();

        map_reduce(
            &solution_ctx.required,
            |job| {
                route_ctxs.iter().fold(InsertionResult::make_failure(), |acc, route_ctx| {
                    let result = self.dispatcher.evaluate(route_ctx, job, f64::MAX);
                    self.result_selector.select(acc, result)
                })
            },
            InsertionResult::make_failure,
            |left, right| self.result_selector.select(left, right),
        )
    }

    fn apply_success(&self, solution_ctx: &mut SolutionContext, success: InsertionSuccess) {
        let job = success.job.clone();

        let route_idx = solution_ctx
            .routes
            .iter()
            .position(|route_ctx| Arc::ptr_eq(&route_ctx.route().actor, &success.actor))
            .unwrap_or_else(|| {
                solution_ctx.registry.use_actor(&success.actor);
                solution_ctx.routes.push(RouteContext::new(success.actor.clone()));
                solution_ctx.routes.len() - 1
            });

        self.inserter.commit(&mut solution_ctx.routes[route_idx], success);

        solution_ctx.required.retain(|required| *required != job);
    }

    fn apply_failure(solution_ctx: &mut SolutionContext, failure: InsertionFailure) {
        match failure.job {
            Some(job) => {
                solution_ctx.required.retain(|required| *required != job);
                solution_ctx.unassigned.insert(job, failure.code);
            }
            // no route accepted any job, all remaining ones are unassignable
            None => {
                solution_ctx.unassigned.extend(solution_ctx.required.drain(..).map(|job| (job, failure.code)));
            }
        }
    }
}
