//! Sweep service - backs up the configuration, runs one training per
//! gravity entry, and restores the configuration on every exit path.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config_file::{backup, set_gravity};
use crate::domain::SweepSet;
use crate::ports::{
    CoreError, NoopSweepEmitter, SweepEvent, SweepEventEmitter, TrainingCommand,
    TrainingOutcome, TrainingRunner,
};

/// Knobs that change how a sweep reacts to problems.
///
/// The defaults reproduce the plain behavior: training exit codes and
/// missing gravity attributes are reported but never stop the sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOptions {
    /// Abort the sweep (after restoring) when a training run exits non-zero.
    pub fail_on_training_error: bool,
    /// Treat a configuration without a `gravity` attribute as an error.
    pub require_gravity_attr: bool,
    /// Rewrite and restore the configuration but never launch training.
    pub dry_run: bool,
}

/// Everything a single sweep needs.
#[derive(Debug, Clone)]
pub struct SweepRequest {
    /// Canonical simulator configuration, edited in place.
    pub config_path: PathBuf,
    /// Entries to process, in order.
    pub sweep: SweepSet,
    /// Training invocation, identical for every entry.
    pub command: TrainingCommand,
    pub options: SweepOptions,
}

/// Lifecycle of one sweep.
///
/// `NotStarted -> BackedUp -> Iterating* -> Restoring -> Done`. Any error
/// after the backup goes straight to `Restoring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    NotStarted,
    BackedUp,
    Iterating { index: usize },
    Restoring,
    Done { failed: bool },
}

impl SweepState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::NotStarted, Self::BackedUp)
            | (Self::BackedUp | Self::Iterating { .. }, Self::Iterating { .. } | Self::Restoring)
            | (Self::Restoring, Self::Done { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SweepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not-started"),
            Self::BackedUp => f.write_str("backed-up"),
            Self::Iterating { index } => write!(f, "iterating[{index}]"),
            Self::Restoring => f.write_str("restoring"),
            Self::Done { failed: false } => f.write_str("done"),
            Self::Done { failed: true } => f.write_str("done(failed)"),
        }
    }
}

/// Summary of a finished sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Number of entries in the sweep.
    pub total: usize,
    /// Finished training runs, in sweep order.
    pub runs: Vec<TrainingOutcome>,
    /// Labels whose training was not launched (dry run).
    pub skipped: Vec<String>,
    /// Labels for which the configuration had no gravity attribute.
    pub unmatched: Vec<String>,
    /// True once every entry has been processed.
    pub all_processed: bool,
}

impl SweepReport {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Runs that exited unsuccessfully.
    pub fn failed_runs(&self) -> impl Iterator<Item = &TrainingOutcome> {
        self.runs.iter().filter(|r| !r.success)
    }

    /// Entries processed so far, launched or skipped.
    pub fn processed(&self) -> usize {
        self.runs.len() + self.skipped.len()
    }
}

/// Service that drives gravity sweeps.
pub struct SweepService {
    runner: Arc<dyn TrainingRunner>,
    emitter: Arc<dyn SweepEventEmitter>,
}

impl SweepService {
    /// Create a sweep service that reports no progress events.
    pub fn new(runner: Arc<dyn TrainingRunner>) -> Self {
        Self {
            runner,
            emitter: Arc::new(NoopSweepEmitter::new()),
        }
    }

    /// Report progress through `emitter`.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn SweepEventEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Run a full sweep.
    ///
    /// The configuration file is restored before this returns, whether the
    /// sweep succeeded or not. If the backup cannot be taken nothing is
    /// modified. When both the sweep and the restore fail, the sweep error
    /// is returned and the backup file stays on disk.
    pub async fn run(&self, request: &SweepRequest) -> Result<SweepReport, CoreError> {
        request.command.validate()?;

        let mut state = SweepState::NotStarted;
        let guard = backup(&request.config_path)?;
        advance(&mut state, SweepState::BackedUp);
        self.emitter.emit(SweepEvent::Started {
            config_path: request.config_path.clone(),
            total: request.sweep.len(),
        });

        let outcome = self.process_entries(request, &mut state).await;

        advance(&mut state, SweepState::Restoring);
        let restored = guard.restore();
        advance(
            &mut state,
            SweepState::Done {
                failed: outcome.is_err() || restored.is_err(),
            },
        );

        match (outcome, restored) {
            (Ok(report), Ok(())) => {
                self.emit_restored(request);
                Ok(report)
            }
            (Err(e), Ok(())) => {
                self.emit_restored(request);
                Err(e)
            }
            (Ok(_), Err(restore_err)) => Err(restore_err),
            (Err(e), Err(restore_err)) => {
                error!(
                    "Restoring {} failed after sweep error: {}",
                    request.config_path.display(),
                    restore_err
                );
                Err(e)
            }
        }
    }

    async fn process_entries(
        &self,
        request: &SweepRequest,
        state: &mut SweepState,
    ) -> Result<SweepReport, CoreError> {
        let total = request.sweep.len();
        let mut report = SweepReport::new(total);

        for (index, entry) in request.sweep.iter().enumerate() {
            advance(state, SweepState::Iterating { index });
            info!(
                "Training with {} gravity: {} ({}/{})",
                entry.label,
                entry.gravity,
                index + 1,
                total
            );
            self.emitter.emit(SweepEvent::EntryStarted {
                index,
                total,
                label: entry.label.clone(),
                gravity: entry.gravity,
                command: request.command.to_string(),
            });

            let rewrite = set_gravity(&request.config_path, entry.gravity)?;
            if !rewrite.matched {
                if request.options.require_gravity_attr {
                    return Err(CoreError::Validation(format!(
                        "{} has no gravity attribute to rewrite",
                        request.config_path.display()
                    )));
                }
                report.unmatched.push(entry.label.clone());
                self.emitter.emit(SweepEvent::GravityMissing {
                    label: entry.label.clone(),
                });
            }

            if request.options.dry_run {
                debug!("Dry run: not launching training for {}", entry.label);
                report.skipped.push(entry.label.clone());
                self.emitter.emit(SweepEvent::EntrySkipped {
                    label: entry.label.clone(),
                });
                continue;
            }

            let outcome = self.runner.run(&entry.label, &request.command).await?;
            if !outcome.success {
                warn!(
                    "Training for {} exited unsuccessfully (exit code: {:?})",
                    entry.label, outcome.exit_code
                );
            }
            self.emitter.emit(SweepEvent::EntryFinished {
                outcome: outcome.clone(),
            });

            let failed = (!outcome.success).then_some(outcome.exit_code);
            report.runs.push(outcome);

            if let Some(exit_code) = failed
                && request.options.fail_on_training_error
            {
                return Err(CoreError::TrainingFailed {
                    label: entry.label.clone(),
                    exit_code,
                });
            }
        }

        report.all_processed = true;
        info!("All {} training runs completed", total);
        self.emitter.emit(SweepEvent::Completed { total });
        Ok(report)
    }

    fn emit_restored(&self, request: &SweepRequest) {
        self.emitter.emit(SweepEvent::Restored {
            config_path: request.config_path.clone(),
        });
    }
}

fn advance(state: &mut SweepState, next: SweepState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal sweep transition {state} -> {next}"
    );
    debug!("Sweep state: {} -> {}", state, next);
    *state = next;
}
