//! Contains utility helpers shared across the crate.

mod comparison;
pub use self::comparison::compare_floats;

mod parallel;
pub use self::parallel::map_reduce;

mod random;
pub use self::random::{DefaultRandom, Noise, Random};
