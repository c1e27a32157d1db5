use crate::models::common::{Demand, Duration, Load, Location, TimeWindow};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents a job place: location, service duration and time window when job can be started.
#[derive(Clone, Debug)]
pub struct JobPlace {
    /// Location where job is performed.
    pub location: Location,
    /// Service duration.
    pub duration: Duration,
    /// An interval when job is allowed to be started.
    pub time: TimeWindow,
}

/// A job with a single activity: pickup only, delivery only, or a generic service,
/// depending on its demand.
pub struct Single {
    /// Job id.
    pub id: String,
    /// A place where the job is served.
    pub place: JobPlace,
    /// Job demand.
    pub demand: Demand,
}

/// A job with a pickup and a delivery activity served by the same vehicle,
/// pickup strictly before delivery.
pub struct Pair {
    /// Job id.
    pub id: String,
    /// A place where goods are picked up.
    pub pickup: JobPlace,
    /// A place where goods are delivered.
    pub delivery: JobPlace,
    /// An amount moved between pickup and delivery.
    pub demand: Load,
}

impl Pair {
    /// Returns demand of the pickup activity.
    pub fn pickup_demand(&self) -> Demand {
        Demand { pickup: (Default::default(), self.demand.clone()), delivery: Default::default() }
    }

    /// Returns demand of the delivery activity.
    pub fn delivery_demand(&self) -> Demand {
        Demand { pickup: Default::default(), delivery: (Default::default(), self.demand.clone()) }
    }
}

/// Represents a job variant.
#[derive(Clone)]
pub enum Job {
    /// Single activity job.
    Single(Arc<Single>),
    /// Paired pickup and delivery job.
    Pair(Arc<Pair>),
}

/// A shape tag of the job used to dispatch to a specific insertion calculator.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum JobShape {
    /// A job with a single activity.
    Single,
    /// A job with paired pickup and delivery activities.
    Pair,
}

impl Job {
    /// Returns job id.
    pub fn id(&self) -> &str {
        match self {
            Job::Single(single) => single.id.as_str(),
            Job::Pair(pair) => pair.id.as_str(),
        }
    }

    /// Returns the shape tag of the job.
    pub fn shape(&self) -> JobShape {
        match self {
            Job::Single(_) => JobShape::Single,
            Job::Pair(_) => JobShape::Pair,
        }
    }

    /// Returns single job if it is of correct variant.
    pub fn as_single(&self) -> Option<&Arc<Single>> {
        match self {
            Job::Single(single) => Some(single),
            _ => None,
        }
    }

    /// Returns pair job if it is of correct variant.
    pub fn as_pair(&self) -> Option<&Arc<Pair>> {
        match self {
            Job::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    /// Returns single job. Panics if job has a different variant.
    pub fn to_single(&self) -> &Arc<Single> {
        match self {
            Job::Single(single) => single,
            _ => panic!("unexpected job variant: expected single"),
        }
    }

    /// Returns pair job. Panics if job has a different variant.
    pub fn to_pair(&self) -> &Arc<Pair> {
        match self {
            Job::Pair(pair) => pair,
            _ => panic!("unexpected job variant: expected pair"),
        }
    }
}

impl PartialEq<Job> for Job {
    fn eq(&self, other: &Job) -> bool {
        match (self, other) {
            (Job::Single(lhs), Job::Single(rhs)) => Arc::ptr_eq(lhs, rhs),
            (Job::Pair(lhs), Job::Pair(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Job::Single(single) => (Arc::as_ptr(single) as usize).hash(state),
            Job::Pair(pair) => (Arc::as_ptr(pair) as usize).hash(state),
        }
    }
}
