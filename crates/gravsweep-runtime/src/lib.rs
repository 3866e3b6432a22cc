//! OS-level adapters for gravsweep.
//!
//! Implements the `gravsweep-core` ports that touch the host: launching
//! training processes and probing for accelerators.

#![deny(unsafe_code)]

mod runner;
pub mod system;

// Re-export the main TrainingRunner implementation
pub use runner::ProcessTrainingRunner;

// Re-export accelerator probe implementation
pub use system::DefaultAcceleratorProbe;
