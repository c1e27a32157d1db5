//! Contains insertion contexts and route state store.

mod models;
pub use self::models::*;

mod route;
pub use self::route::*;
