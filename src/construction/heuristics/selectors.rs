#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/selectors_test.rs"]
mod selectors_test;

use crate::construction::heuristics::InsertionResult;
use crate::utils::Noise;

/// Chooses which of two insertion results to keep while scanning candidates.
pub trait ResultSelector {
    /// Selects one insertion result from two to promote as the best.
    fn select(&self, left: InsertionResult, right: InsertionResult) -> InsertionResult;
}

/// Keeps the cheapest result.
#[derive(Default)]
pub struct BestResultSelector {}

impl ResultSelector for BestResultSelector {
    fn select(&self, left: InsertionResult, right: InsertionResult) -> InsertionResult {
        InsertionResult::choose_best_result(left, right)
    }
}

/// Compares results by noised costs trading determinism for search diversity.
pub struct NoiseResultSelector {
    noise: Noise,
}

impl NoiseResultSelector {
    /// Creates a new instance of `NoiseResultSelector`.
    pub fn new(noise: Noise) -> Self {
        Self { noise }
    }
}

impl ResultSelector for NoiseResultSelector {
    fn select(&self, left: InsertionResult, right: InsertionResult) -> InsertionResult {
        match (&left, &right) {
            (InsertionResult::Success(lhs), InsertionResult::Success(rhs)) => {
                let left_cost = self.noise.generate(lhs.cost);
                let right_cost = self.noise.generate(rhs.cost);

                if left_cost < right_cost { left } else { right }
            }
            _ => InsertionResult::choose_best_result(left, right),
        }
    }
}
