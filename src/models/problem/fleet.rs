use crate::models::common::{Duration, Load, Location, TimeWindow};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents operating costs for driver and vehicle.
#[derive(Clone, Debug)]
pub struct Costs {
    /// A fixed cost to use an actor.
    pub fixed: f64,
    /// Cost per distance unit.
    pub per_distance: f64,
    /// Cost per driving time unit.
    pub per_driving_time: f64,
    /// Cost per waiting time unit.
    pub per_waiting_time: f64,
    /// Cost per service time unit.
    pub per_service_time: f64,
}

/// Represents a driver, the person who operates a vehicle. Kept minimal: it exists so that
/// cost providers can price transport and activities per actor, not only per vehicle.
pub struct Driver {
    /// Specifies operating costs for driver.
    pub costs: Costs,
}

/// Represents a vehicle detail: where and when the vehicle operates.
#[derive(Clone, Debug)]
pub struct VehicleDetail {
    /// Location where vehicle starts.
    pub start: Location,
    /// Location where vehicle ends. Empty end makes the tour open.
    pub end: Option<Location>,
    /// Time window when vehicle can work.
    pub time: TimeWindow,
}

/// Represents a driver break which the vehicle takes once within its shift.
#[derive(Clone, Debug)]
pub struct VehicleBreak {
    /// Time window when the break can be started.
    pub time: TimeWindow,
    /// Duration of the break.
    pub duration: Duration,
    /// Location where the break is taken. Empty location means the break is taken at the
    /// place the vehicle starts from.
    pub location: Option<Location>,
}

/// Represents a vehicle.
pub struct Vehicle {
    /// Vehicle id.
    pub id: String,
    /// Vehicle capacity.
    pub capacity: Load,
    /// Specifies operating costs for vehicle.
    pub costs: Costs,
    /// Specifies vehicle detail.
    pub detail: VehicleDetail,
    /// An optional driver break within the shift.
    pub vehicle_break: Option<VehicleBreak>,
}

/// Represents actor detail.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ActorDetail {
    /// Location where actor starts.
    pub start: Location,
    /// Location where actor ends. Empty end makes the tour open.
    pub end: Option<Location>,
    /// Time window when actor can work.
    pub time: TimeWindow,
}

/// Represents an actor: a vehicle and driver pair which serves a route.
pub struct Actor {
    /// A vehicle associated within actor.
    pub vehicle: Arc<Vehicle>,
    /// A driver associated within actor.
    pub driver: Arc<Driver>,
    /// Specifies actor detail.
    pub detail: ActorDetail,
}

/// Represents available resources to serve jobs.
pub struct Fleet {
    /// All fleet drivers.
    pub drivers: Vec<Arc<Driver>>,
    /// All fleet vehicles.
    pub vehicles: Vec<Arc<Vehicle>>,
    /// All fleet actors.
    pub actors: Vec<Arc<Actor>>,
}

impl Fleet {
    /// Creates a new instance of `Fleet`.
    pub fn new(driver: Arc<Driver>, vehicles: Vec<Arc<Vehicle>>) -> Fleet {
        assert!(!vehicles.is_empty());

        let actors = vehicles
            .iter()
            .map(|vehicle| {
                Arc::new(Actor {
                    vehicle: vehicle.clone(),
                    driver: driver.clone(),
                    detail: ActorDetail {
                        start: vehicle.detail.start,
                        end: vehicle.detail.end,
                        time: vehicle.detail.time.clone(),
                    },
                })
            })
            .collect();

        Fleet { drivers: vec![driver], vehicles, actors }
    }
}

impl Hash for Costs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let fixed = self.fixed.to_bits() as i64;
        let per_distance = self.per_distance.to_bits() as i64;
        let per_driving_time = self.per_driving_time.to_bits() as i64;
        let per_service_time = self.per_service_time.to_bits() as i64;
        let per_waiting_time = self.per_waiting_time.to_bits() as i64;

        fixed.hash(state);
        per_distance.hash(state);
        per_driving_time.hash(state);
        per_service_time.hash(state);
        per_waiting_time.hash(state);
    }
}

impl Eq for Costs {}

impl PartialEq for Costs {
    fn eq(&self, other: &Self) -> bool {
        self.fixed == other.fixed
            && self.per_distance == other.per_distance
            && self.per_driving_time == other.per_driving_time
            && self.per_service_time == other.per_service_time
            && self.per_waiting_time == other.per_waiting_time
    }
}

impl PartialEq<Actor> for Actor {
    fn eq(&self, other: &Actor) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let address = self as *const Actor;
        address.hash(state);
    }
}
