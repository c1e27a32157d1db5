use crate::models::common::{Demand, Duration, Location, Schedule, TimeWindow};
use crate::models::problem::{Actor, Job, JobPlace, VehicleBreak};
use crate::models::solution::Tour;
use std::sync::Arc;

/// Specifies activity place.
#[derive(Clone, Debug)]
pub struct Place {
    /// Location where activity is performed.
    pub location: Location,
    /// Specifies activity's duration.
    pub duration: Duration,
    /// Specifies activity's time window: an interval when activity is allowed to be started.
    pub time: TimeWindow,
}

/// A tag which identifies the role of an activity within its job.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivityType {
    /// A single stop of a simple job.
    Service,
    /// The pickup side of a paired job.
    Pickup,
    /// The delivery side of a paired job.
    Delivery,
    /// A driver break within the vehicle shift.
    Break,
}

/// Represents activity which is needed to be performed.
pub struct Activity {
    /// Specifies activity details.
    pub place: Place,
    /// Specifies activity's schedule: actual arrival and departure time.
    pub schedule: Schedule,
    /// Specifies associated job. Empty if it has no association with a job (e.g. tour start or end).
    pub job: Option<Job>,
    /// Specifies the role of the activity within its job.
    pub activity_type: ActivityType,
}

/// Represents a tour performing jobs.
pub struct Route {
    /// An actor associated within route.
    pub actor: Arc<Actor>,
    /// Specifies job tour assigned to this route.
    pub tour: Tour,
}

impl Route {
    /// Returns a deep copy of `Route`.
    pub fn deep_copy(&self) -> Self {
        Self { actor: self.actor.clone(), tour: self.tour.deep_copy() }
    }
}

impl Activity {
    /// Creates an activity performing given job at given place.
    pub fn new_with_job(job: Job, place: &JobPlace, activity_type: ActivityType) -> Self {
        Activity {
            place: Place { location: place.location, duration: place.duration, time: place.time.clone() },
            schedule: Schedule { arrival: 0.0, departure: 0.0 },
            job: Some(job),
            activity_type,
        }
    }

    /// Creates a job-less break activity from the vehicle break definition.
    pub fn new_break(vehicle_break: &VehicleBreak, default_location: Location) -> Self {
        Activity {
            place: Place {
                location: vehicle_break.location.unwrap_or(default_location),
                duration: vehicle_break.duration,
                time: vehicle_break.time.clone(),
            },
            schedule: Schedule { arrival: 0.0, departure: 0.0 },
            job: None,
            activity_type: ActivityType::Break,
        }
    }

    /// Creates a deep copy of `Activity`.
    pub fn deep_copy(&self) -> Self {
        Self {
            place: self.place.clone(),
            schedule: self.schedule.clone(),
            job: self.job.clone(),
            activity_type: self.activity_type,
        }
    }

    /// Checks whether activity belongs to given job.
    pub fn has_same_job(&self, job: &Job) -> bool {
        self.job.as_ref().is_some_and(|j| j == job)
    }

    /// Returns demand of the activity if it carries one.
    pub fn demand(&self) -> Option<Demand> {
        match (self.job.as_ref(), self.activity_type) {
            (Some(Job::Single(single)), ActivityType::Service) => Some(single.demand.clone()),
            (Some(Job::Pair(pair)), ActivityType::Pickup) => Some(pair.pickup_demand()),
            (Some(Job::Pair(pair)), ActivityType::Delivery) => Some(pair.delivery_demand()),
            _ => None,
        }
    }
}
