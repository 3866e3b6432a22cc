//! Errors surfaced by the `gravsweep` binary and their exit codes.
//!
//! Core errors are flattened into messages here. The variant decides the
//! process exit status.

use gravsweep_core::CoreError;
use thiserror::Error;

/// Error returned by CLI handlers.
#[derive(Debug, Error)]
pub enum CliError {
    /// Sweep entries or flags that could not be interpreted.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Reading or restoring the simulator config failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Unreadable sweep file, or a stale backup blocking the sweep.
    #[error("Configuration problem: {0}")]
    Config(String),

    /// The trainer or a probe command could not be run.
    #[error("Failed to run command: {0}")]
    Process(String),

    /// A training run failed and the sweep was stopped.
    #[error("{0}")]
    Training(String),
}

impl CliError {
    /// Exit status for this error, using sysexits.h codes where one fits
    /// (usage 2, I/O 74, config 78, OS 71) and 1 for a failed training run.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Training(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
        }
    }

    /// Exit code for any error surfaced from a handler.
    pub fn exit_code_for(err: &anyhow::Error) -> u8 {
        err.downcast_ref::<Self>().map_or(1, Self::exit_code)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io { .. } => Self::Io(err.to_string()),
            CoreError::Process(proc_err) => Self::Process(proc_err.to_string()),
            CoreError::TrainingFailed { .. } => Self::Training(err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::StaleBackup { .. } => Self::Config(err.to_string()),
            CoreError::Configuration(msg) => Self::Config(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
