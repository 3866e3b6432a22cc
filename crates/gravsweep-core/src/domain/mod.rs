//! Domain types for gravity sweeps.
//!
//! These are pure value types with no infrastructure dependencies.

mod gravity;
mod sweep_set;

pub use gravity::GravityVector;
pub use sweep_set::{GravityEntry, SweepSet};
