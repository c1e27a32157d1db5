use crate::models::common::{Distance, Duration, Location, Timestamp};
use crate::models::problem::{ActivityCost, Actor, TransportCost, TravelTime};
use crate::models::solution::Activity;
use std::sync::Arc;

/// A transport provider which treats locations as points on a line.
#[derive(Default)]
pub struct TestTransportCost {}

impl TransportCost for TestTransportCost {
    fn duration(&self, _: &Actor, from: Location, to: Location, _: TravelTime) -> Duration {
        fake_routing(from, to)
    }

    fn distance(&self, _: &Actor, from: Location, to: Location, _: TravelTime) -> Distance {
        fake_routing(from, to)
    }
}

impl TestTransportCost {
    pub fn new_shared() -> Arc<dyn TransportCost + Send + Sync> {
        Arc::new(Self::default())
    }
}

pub fn fake_routing(from: Location, to: Location) -> f64 {
    (if to > from { to - from } else { from - to }) as f64
}

/// A transport provider over a planar grid with the Manhattan metric, durations equal distances.
pub struct GridTransportCost {
    coords: Vec<(f64, f64)>,
}

impl GridTransportCost {
    pub fn new_shared(coords: Vec<(f64, f64)>) -> Arc<dyn TransportCost + Send + Sync> {
        Arc::new(Self { coords })
    }
}

impl TransportCost for GridTransportCost {
    fn duration(&self, actor: &Actor, from: Location, to: Location, travel_time: TravelTime) -> Duration {
        self.distance(actor, from, to, travel_time)
    }

    fn distance(&self, _: &Actor, from: Location, to: Location, _: TravelTime) -> Distance {
        let (from_x, from_y) = self.coords[from];
        let (to_x, to_y) = self.coords[to];

        (from_x - to_x).abs() + (from_y - to_y).abs()
    }
}

#[derive(Default)]
pub struct TestActivityCost {}

impl ActivityCost for TestActivityCost {
    fn estimate_departure(&self, _: &Actor, activity: &Activity, arrival: Timestamp) -> Timestamp {
        arrival.max(activity.place.time.start) + activity.place.duration
    }

    fn estimate_arrival(&self, _: &Actor, activity: &Activity, departure: Timestamp) -> Timestamp {
        activity.place.time.end.min(departure - activity.place.duration)
    }
}

impl TestActivityCost {
    pub fn new_shared() -> Arc<dyn ActivityCost + Send + Sync> {
        Arc::new(Self::default())
    }
}
