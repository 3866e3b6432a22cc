//! `TrainingRunner` implementation backed by child processes.
//!
//! This module provides the `ProcessTrainingRunner` which implements the
//! `TrainingRunner` trait from `gravsweep-core`.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use gravsweep_core::ports::{ProcessError, TrainingCommand, TrainingOutcome, TrainingRunner};
use tokio::process::Command;
use tracing::debug;

/// `TrainingRunner` that launches the command directly (no shell) and waits
/// for it to exit.
///
/// # Design
///
/// - Pure OS/process concerns only
/// - Standard streams are inherited so training output reaches the terminal
/// - No timeout: a run lasts as long as the trainer does
#[derive(Debug, Clone, Default)]
pub struct ProcessTrainingRunner {
    /// Discard the child's stdout/stderr instead of inheriting them.
    quiet: bool,
}

impl ProcessTrainingRunner {
    /// Create a runner that inherits standard streams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that silences the child's output.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    fn build_command(&self, command: &TrainingCommand) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(ref dir) = command.working_dir {
            cmd.current_dir(dir);
        }

        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        cmd
    }
}

#[async_trait]
impl TrainingRunner for ProcessTrainingRunner {
    async fn run(
        &self,
        label: &str,
        command: &TrainingCommand,
    ) -> Result<TrainingOutcome, ProcessError> {
        command.validate()?;
        debug!("Launching training for {}: {}", label, command);

        let started = Instant::now();
        let mut child = self
            .build_command(command)
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed {
                program: command.program.clone(),
                reason: e.to_string(),
            })?;

        let status = child.wait().await.map_err(|e| ProcessError::WaitFailed {
            program: command.program.clone(),
            reason: e.to_string(),
        })?;
        let duration = started.elapsed();

        debug!(
            "Training for {} exited with {} after {:.1}s",
            label,
            status,
            duration.as_secs_f64()
        );

        Ok(TrainingOutcome::new(
            label,
            status.code(),
            status.success(),
            duration,
        ))
    }
}
