//! Contains constraints to decide whether a job insertion is feasible.

/// A key to track the latest feasible arrival time of an activity.
pub const LATEST_ARRIVAL_KEY: i32 = 1;
/// A key to track the accumulated waiting time after an activity.
pub const WAITING_KEY: i32 = 2;

/// A key to track the actual load at an activity.
pub const CURRENT_LOAD_KEY: i32 = 11;
/// A key to track the maximal load discovered up to (and including) an activity.
pub const MAX_PAST_LOAD_KEY: i32 = 12;
/// A key to track the maximal load discovered from an activity till the tour end.
pub const MAX_FUTURE_LOAD_KEY: i32 = 13;
/// A key to track the load at the route start.
pub const BEGIN_LOAD_KEY: i32 = 14;
/// A key to track the load at the route end.
pub const END_LOAD_KEY: i32 = 15;
/// A key to track the maximal load in the route.
pub const MAX_LOAD_KEY: i32 = 16;

/// Identifies the category of a hard constraint violation. Carried by the insertion
/// failure sentinel for consumption by an external unassigned job reason tracker.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ViolationCode {
    /// No specific cause is known.
    Unknown,
    /// A vehicle capacity would be exceeded.
    Capacity,
    /// A time window cannot be met.
    TimeWindow,
    /// A required activity ordering cannot be met. Reserved for custom constraint modules:
    /// no built-in module produces it.
    Precedence,
    /// A job cannot be served by the vehicle at all. Reserved for custom constraint modules:
    /// no built-in module produces it.
    VehicleIncompatible,
}

mod pipeline;
pub use self::pipeline::*;

mod capacity;
pub use self::capacity::CapacityConstraintModule;

mod timing;
pub use self::timing::TimingConstraintModule;
