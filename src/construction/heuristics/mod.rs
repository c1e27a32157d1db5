//! Contains a cost-minimizing insertion heuristic built from pluggable parts.

mod costs;
pub use self::costs::ActivityInsertionCostCalculator;

mod evaluators;
pub use self::evaluators::*;

mod insertions;
pub use self::insertions::*;

mod selectors;
pub use self::selectors::*;
