#[cfg(test)]
#[path = "../../../tests/unit/models/common/load_test.rs"]
mod load_test;

use std::ops::{Add, Sub};
use tinyvec::TinyVec;

/// An amount of load dimensions kept inline.
const LOAD_DIMENSION_SIZE: usize = 4;

/// Represents a multi dimensional load where each dimension is an ordered quantity,
/// e.g. weight, volume, pallet count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Load {
    units: TinyVec<[i32; LOAD_DIMENSION_SIZE]>,
}

impl Load {
    /// Creates a new multi dimensional load.
    pub fn new(units: &[i32]) -> Self {
        Self { units: units.iter().copied().collect() }
    }

    /// Creates a load with a single dimension.
    pub fn single(value: i32) -> Self {
        Self::new(&[value])
    }

    /// Checks whether any dimension holds a positive quantity.
    pub fn is_not_empty(&self) -> bool {
        self.units.iter().any(|&value| value > 0)
    }

    /// Checks whether the load fits into another one: all dimensions are less or equal.
    pub fn can_fit(&self, other: &Self) -> bool {
        (0..self.units.len().max(other.units.len())).all(|idx| self.dim(idx) <= other.dim(idx))
    }

    /// Returns a dimension wise maximum of two loads.
    pub fn max_load(&self, other: &Self) -> Self {
        self.combine(other, |lhs, rhs| lhs.max(rhs))
    }

    fn dim(&self, idx: usize) -> i32 {
        self.units.get(idx).copied().unwrap_or_default()
    }

    fn combine(&self, other: &Self, op: fn(i32, i32) -> i32) -> Self {
        let size = self.units.len().max(other.units.len());
        Self { units: (0..size).map(|idx| op(self.dim(idx), other.dim(idx))).collect() }
    }
}

impl Add for Load {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, |lhs, rhs| lhs + rhs)
    }
}

impl Sub for Load {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, |lhs, rhs| lhs - rhs)
    }
}

/// Represents job demand, both static and dynamic: static amounts are taken from (or brought to)
/// the vehicle terminal, dynamic amounts travel between the job's own activities.
#[derive(Clone, Debug, Default)]
pub struct Demand {
    /// Keeps static and dynamic pickup amount.
    pub pickup: (Load, Load),
    /// Keeps static and dynamic delivery amount.
    pub delivery: (Load, Load),
}

impl Demand {
    /// Creates a demand with given static delivery amount.
    pub fn delivery(load: Load) -> Self {
        Self { pickup: Default::default(), delivery: (load, Default::default()) }
    }

    /// Creates a demand with given static pickup amount.
    pub fn pickup(load: Load) -> Self {
        Self { pickup: (load, Default::default()), delivery: Default::default() }
    }

    /// Returns load change at the activity: difference between pickup and delivery amounts.
    pub fn change(&self) -> Load {
        self.pickup.0.clone() + self.pickup.1.clone() - self.delivery.0.clone() - self.delivery.1.clone()
    }
}
