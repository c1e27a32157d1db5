//! This crate contains the building blocks of the recreate phase of a ruin-and-recreate
//! metaheuristic for ***Vehicle Routing Problem*** variations: a constraint-aware,
//! cost-minimizing search for the best place of a job inside a route, the layered
//! constraint framework behind it, and the incremental route state needed to keep
//! constraint evaluation cheap across thousands of search iterations.

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod utils;
