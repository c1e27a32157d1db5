//! A collection of models to represent problem and solution in the insertion engine.

pub mod common;
pub mod problem;
pub mod solution;
