//! Construction logic of the insertion engine.

pub mod constraints;
pub mod heuristics;
pub mod states;
