//! Core services.
//!
//! Services hold the orchestration logic and talk to the outside world
//! only through ports.

mod sweep;

pub use sweep::{SweepOptions, SweepReport, SweepRequest, SweepService, SweepState};
