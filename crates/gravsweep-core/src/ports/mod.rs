//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `tokio::process` or `std::process` types in any signature
//! - Intent-based methods: "run this training command", "probe accelerators",
//!   "report sweep progress"
//! - Implementations live in `gravsweep-runtime`

pub mod accelerator_probe;
pub mod sweep_events;
pub mod training_runner;

use std::path::PathBuf;
use thiserror::Error;

pub use accelerator_probe::{
    AcceleratorBackend, AcceleratorInfo, AcceleratorProbePort, SystemProbeError,
};
pub use sweep_events::{NoopSweepEmitter, SweepEvent, SweepEventEmitter};
#[cfg(test)]
pub use training_runner::MockTrainingRunner;
pub use training_runner::{
    DEFAULT_DATASET_PATH, DEFAULT_TRAIN_SCRIPT, TrainingCommand, TrainingOutcome, TrainingRunner,
};

/// Domain-specific errors for training process operations.
///
/// A training run that starts and exits non-zero is not an error at this
/// level; it is reported through [`TrainingOutcome::success`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The child process could not be started.
    #[error("Failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// Waiting on the child process failed.
    #[error("Failed to wait for '{program}': {reason}")]
    WaitFailed { program: String, reason: String },

    /// The command itself is unusable (e.g. empty program).
    #[error("Invalid training command: {0}")]
    InvalidCommand(String),
}

/// Core error type for semantic domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Filesystem access failed for a configuration, backup or sweep file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process runner error.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// A training run exited unsuccessfully and the sweep was told to stop.
    #[error(
        "Training run '{label}' failed (exit code: {})",
        .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    TrainingFailed { label: String, exit_code: Option<i32> },

    /// A backup from an earlier sweep is still on disk. It may hold the only
    /// copy of the original configuration, so it is never overwritten.
    #[error(
        "Stale backup {} exists; restore it over the configuration or remove it first",
        .backup.display()
    )]
    StaleBackup { backup: PathBuf },

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
