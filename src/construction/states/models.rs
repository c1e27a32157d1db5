use crate::construction::constraints::ViolationCode;
use crate::construction::states::RouteContext;
use crate::models::common::Timestamp;
use crate::models::problem::{Actor, Job};
use crate::models::solution::{Activity, Registry};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A read-only snapshot describing one insertion attempt: which job is evaluated against which
/// route, served by which actor and starting at which departure time. Passed to every constraint.
pub struct InsertionContext<'a> {
    /// A route context where the job is supposed to be inserted.
    pub route_ctx: &'a RouteContext,
    /// A candidate actor to serve the route.
    pub actor: &'a Arc<Actor>,
    /// A job which is about to be inserted.
    pub job: &'a Job,
    /// A candidate departure time from the route start.
    pub departure: Timestamp,
}

impl<'a> InsertionContext<'a> {
    /// Creates an insertion context for given route and job using the route's own actor
    /// and departure time.
    pub fn new(route_ctx: &'a RouteContext, job: &'a Job) -> Self {
        let actor = &route_ctx.route().actor;
        let departure =
            route_ctx.route().tour.start().map_or(actor.detail.time.start, |start| start.schedule.departure);

        Self { route_ctx, actor, job, departure }
    }
}

/// Specifies insertion context for an activity: the candidate activity between its
/// would-be neighbors at a concrete position of the tour.
pub struct ActivityContext<'a> {
    /// Activity insertion position index, relative to the tour before insertion.
    pub index: usize,

    /// Previous activity.
    pub prev: &'a Activity,

    /// Target activity.
    pub target: &'a Activity,

    /// Next activity. Absent if tour is open and target activity inserted last.
    pub next: Option<&'a Activity>,
}

/// Contains information regarding the solution under construction.
pub struct SolutionContext {
    /// List of jobs which require assignment.
    pub required: Vec<Job>,

    /// Map of jobs which cannot be assigned within the reason code.
    pub unassigned: FxHashMap<Job, ViolationCode>,

    /// Set of routes within their state.
    pub routes: Vec<RouteContext>,

    /// Keeps track of used actors.
    pub registry: Registry,
}

impl SolutionContext {
    /// Creates a new instance of `SolutionContext` with given jobs to be assigned.
    pub fn new(required: Vec<Job>, registry: Registry) -> Self {
        Self { required, unassigned: Default::default(), routes: Default::default(), registry }
    }
}
