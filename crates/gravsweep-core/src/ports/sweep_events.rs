//! Sweep progress events.
//!
//! The sweep service reports progress through this port so that adapters
//! decide how to present it (console lines, nothing at all in tests).

use std::path::PathBuf;

use crate::domain::GravityVector;

use super::TrainingOutcome;

/// Progress notifications emitted by a sweep, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    /// Backup taken; `total` entries are about to be processed.
    Started { config_path: PathBuf, total: usize },
    /// Gravity for entry `index` (0-based) is about to be written and trained.
    EntryStarted {
        index: usize,
        total: usize,
        label: String,
        gravity: GravityVector,
        command: String,
    },
    /// The configuration had no `gravity` attribute to rewrite.
    GravityMissing { label: String },
    /// A training run exited.
    EntryFinished { outcome: TrainingOutcome },
    /// Training was not launched for this entry (dry run).
    EntrySkipped { label: String },
    /// Every entry was processed.
    Completed { total: usize },
    /// The canonical configuration was restored from the backup.
    Restored { config_path: PathBuf },
}

/// Trait for emitting sweep events.
///
/// # Implementations
///
/// - `NoopSweepEmitter` - For tests and contexts without a listener
/// - Adapter-specific implementations (console output in the CLI)
pub trait SweepEventEmitter: Send + Sync {
    /// Emit a sweep event. Must not block.
    fn emit(&self, event: SweepEvent);
}

/// A no-op event emitter for tests and silent contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopSweepEmitter;

impl NoopSweepEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl SweepEventEmitter for NoopSweepEmitter {
    fn emit(&self, _event: SweepEvent) {}
}
