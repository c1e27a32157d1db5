#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/pipeline_test.rs"]
mod pipeline_test;

use crate::construction::constraints::ViolationCode;
use crate::construction::states::{ActivityContext, InsertionContext, RouteContext, SolutionContext};
use crate::models::common::Cost;
use crate::models::problem::Job;
use std::collections::HashSet;
use std::slice::Iter;
use std::sync::Arc;

/// Specifies result of a hard route constraint check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RouteConstraintViolation {
    /// Violation code which is used as a marker of the specific constraint violated.
    pub code: ViolationCode,
}

/// Specifies result of a hard activity constraint check at one insertion position.
/// The two rejection variants drive search pruning: rejecting one position keeps the scan
/// going, rejecting onward tells the caller that no later position in the scan direction
/// can succeed either. The latter is a promise made by the constraint author, the framework
/// transports the signal without verifying the underlying monotonicity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivityConstraintStatus {
    /// The position is feasible.
    Fulfilled,
    /// This position only is infeasible, later positions may still work.
    NotFulfilled(ViolationCode),
    /// This and every later position of the current scan are infeasible.
    NotFulfilledBreak(ViolationCode),
}

impl ActivityConstraintStatus {
    /// Checks whether status signals a feasible position.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, ActivityConstraintStatus::Fulfilled)
    }

    /// Returns violation code if the position was rejected.
    pub fn code(&self) -> Option<ViolationCode> {
        match self {
            ActivityConstraintStatus::Fulfilled => None,
            ActivityConstraintStatus::NotFulfilled(code) | ActivityConstraintStatus::NotFulfilledBreak(code) => {
                Some(*code)
            }
        }
    }
}

/// Specifies hard constraint which operates on route level.
pub trait HardRouteConstraint {
    /// Estimates whether the job can be served within the route at all.
    /// Returns violation if constraint is violated.
    fn evaluate_job(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation>;
}

/// Specifies soft constraint which operates on route level.
pub trait SoftRouteConstraint {
    /// Estimates job insertion penalty on route level. Positive makes insertion less
    /// attractive, negative more. Soft constraints never reject.
    fn estimate_job(&self, ctx: &InsertionContext) -> Cost;
}

/// Specifies hard constraint which operates on activity level.
pub trait HardActivityConstraint {
    /// Estimates activity insertion at a specific position of the route.
    fn evaluate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> ActivityConstraintStatus;
}

/// Specifies soft constraint which operates on activity level.
pub trait SoftActivityConstraint {
    /// Estimates activity insertion penalty at a specific position of the route.
    fn estimate_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> Cost;
}

/// A variant type for constraint types.
pub enum ConstraintVariant {
    HardRoute(Arc<dyn HardRouteConstraint + Send + Sync>),
    HardActivity(Arc<dyn HardActivityConstraint + Send + Sync>),
    SoftRoute(Arc<dyn SoftRouteConstraint + Send + Sync>),
    SoftActivity(Arc<dyn SoftActivityConstraint + Send + Sync>),
}

/// Specifies evaluation order of constraints: lower priority is evaluated first.
/// Registration order is kept within the same priority.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ConstraintPriority {
    Critical,
    High,
    Low,
}

/// Represents a constraint module which can be added to the constraint pipeline. A module owns
/// its state keys and is the only place where these states are recomputed.
pub trait ConstraintModule {
    /// Accepts insertion of a job into the route. Called after the route was mutated.
    fn accept_insertion(&self, route_ctx: &mut RouteContext, job: &Job) {
        let _ = job;
        self.accept_route_state(route_ctx);
    }

    /// Accepts removal of a job from the route. Called after the route was mutated.
    fn accept_removal(&self, route_ctx: &mut RouteContext, job: &Job) {
        let _ = job;
        self.accept_route_state(route_ctx);
    }

    /// Accepts the route and updates its state to allow more efficient constraint checks.
    fn accept_route_state(&self, route_ctx: &mut RouteContext);

    /// Accepts the solution context before an insertion phase starts: recomputes states of
    /// the routes touched since the last recomputation.
    fn accept_solution_state(&self, solution_ctx: &mut SolutionContext) {
        solution_ctx
            .routes
            .iter_mut()
            .filter(|route_ctx| route_ctx.is_stale())
            .for_each(|route_ctx| self.accept_route_state(route_ctx));
    }

    /// Returns unique constraint state keys used to avoid state key interference.
    fn state_keys(&self) -> Iter<'_, i32>;

    /// Returns list of constraints to be used.
    fn get_constraints(&self) -> Iter<'_, ConstraintVariant>;
}

/// Provides the way to work with multiple constraints.
#[derive(Default)]
pub struct ConstraintPipeline {
    modules: Vec<Box<dyn ConstraintModule + Send + Sync>>,
    state_keys: HashSet<i32>,
    hard_route_constraints: Vec<(ConstraintPriority, Arc<dyn HardRouteConstraint + Send + Sync>)>,
    hard_activity_constraints: Vec<(ConstraintPriority, Arc<dyn HardActivityConstraint + Send + Sync>)>,
    soft_route_constraints: Vec<Arc<dyn SoftRouteConstraint + Send + Sync>>,
    soft_activity_constraints: Vec<Arc<dyn SoftActivityConstraint + Send + Sync>>,
}

impl ConstraintPipeline {
    /// Adds a constraint module within given priority for all its constraints.
    /// Panics if the module claims a state key which is already registered: this is
    /// a configuration error which must surface before any search starts.
    pub fn add_module(
        &mut self,
        module: Box<dyn ConstraintModule + Send + Sync>,
        priority: ConstraintPriority,
    ) -> &mut Self {
        module.state_keys().for_each(|&key| {
            if !self.state_keys.insert(key) {
                panic!("attempt to register constraint module with duplicate state key: {key}")
            }
        });

        module.get_constraints().for_each(|c| self.add_variant(c, priority));
        self.modules.push(module);

        self
    }

    /// Adds a standalone constraint which does not own any state.
    pub fn add_constraint(&mut self, constraint: &ConstraintVariant, priority: ConstraintPriority) -> &mut Self {
        self.add_variant(constraint, priority);
        self
    }

    fn add_variant(&mut self, constraint: &ConstraintVariant, priority: ConstraintPriority) {
        match constraint {
            ConstraintVariant::HardRoute(c) => {
                self.hard_route_constraints.push((priority, c.clone()));
                self.hard_route_constraints.sort_by_key(|(priority, _)| *priority);
            }
            ConstraintVariant::HardActivity(c) => {
                self.hard_activity_constraints.push((priority, c.clone()));
                self.hard_activity_constraints.sort_by_key(|(priority, _)| *priority);
            }
            ConstraintVariant::SoftRoute(c) => self.soft_route_constraints.push(c.clone()),
            ConstraintVariant::SoftActivity(c) => self.soft_activity_constraints.push(c.clone()),
        }
    }

    /// Notifies modules about job insertion and resets route staleness.
    pub fn accept_insertion(&self, route_ctx: &mut RouteContext, job: &Job) {
        self.modules.iter().for_each(|module| module.accept_insertion(route_ctx, job));
        route_ctx.mark_stale(false);
    }

    /// Notifies modules about job removal and resets route staleness.
    pub fn accept_removal(&self, route_ctx: &mut RouteContext, job: &Job) {
        self.modules.iter().for_each(|module| module.accept_removal(route_ctx, job));
        route_ctx.mark_stale(false);
    }

    /// Recomputes states of a single route.
    pub fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        self.modules.iter().for_each(|module| module.accept_route_state(route_ctx));
        route_ctx.mark_stale(false);
    }

    /// Accepts the solution state before an insertion phase starts.
    pub fn accept_solution_state(&self, solution_ctx: &mut SolutionContext) {
        self.modules.iter().for_each(|module| module.accept_solution_state(solution_ctx));
        solution_ctx.routes.iter_mut().for_each(|route_ctx| route_ctx.mark_stale(false));
    }

    /// Checks whether all hard route constraints are fulfilled.
    /// Returns the result of the first failed constraint in priority order or an empty value.
    pub fn evaluate_hard_route(&self, ctx: &InsertionContext) -> Option<RouteConstraintViolation> {
        self.hard_route_constraints.iter().find_map(|(_, c)| c.evaluate_job(ctx))
    }

    /// Checks whether all hard activity constraints are fulfilled at given position.
    /// A rejected-onward outcome wins immediately, otherwise the first rejection is kept
    /// and remaining constraints still run.
    pub fn evaluate_hard_activity(
        &self,
        ctx: &InsertionContext,
        activity_ctx: &ActivityContext,
    ) -> ActivityConstraintStatus {
        let mut first_rejection: Option<ActivityConstraintStatus> = None;

        for (_, constraint) in self.hard_activity_constraints.iter() {
            match constraint.evaluate_activity(ctx, activity_ctx) {
                ActivityConstraintStatus::Fulfilled => {}
                status @ ActivityConstraintStatus::NotFulfilledBreak(_) => return status,
                status @ ActivityConstraintStatus::NotFulfilled(_) => {
                    first_rejection.get_or_insert(status);
                }
            }
        }

        first_rejection.unwrap_or(ActivityConstraintStatus::Fulfilled)
    }

    /// Checks soft route constraints and aggregates their penalty costs.
    pub fn evaluate_soft_route(&self, ctx: &InsertionContext) -> Cost {
        self.soft_route_constraints.iter().map(|c| c.estimate_job(ctx)).sum()
    }

    /// Checks soft activity constraints and aggregates their penalty costs.
    pub fn evaluate_soft_activity(&self, ctx: &InsertionContext, activity_ctx: &ActivityContext) -> Cost {
        self.soft_activity_constraints.iter().map(|c| c.estimate_activity(ctx, activity_ctx)).sum()
    }
}
