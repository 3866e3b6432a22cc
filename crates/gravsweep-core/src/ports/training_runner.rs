//! Training runner trait definition.
//!
//! This port defines the interface for launching one external training
//! run and waiting for it to finish. Implementations handle all process
//! lifecycle details internally.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use super::ProcessError;

/// Replay buffer location used when no dataset is configured.
///
/// This is a placeholder the operator is expected to override.
pub const DEFAULT_DATASET_PATH: &str = "PATH_TO_DATASET/datasets/walker/rnd/replay.pt";

/// Training entry point, relative to the training working directory.
pub const DEFAULT_TRAIN_SCRIPT: &str = "url_benchmark/train_offline.py";

/// A fully resolved training invocation.
///
/// Arguments are passed to the child verbatim; no shell is involved, so
/// paths containing spaces or quotes need no escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingCommand {
    /// Program to execute (looked up on `PATH` when not absolute).
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Extra environment variables for the child.
    pub env: Vec<(String, String)>,
    /// Working directory for the child (inherits ours when `None`).
    pub working_dir: Option<PathBuf>,
}

impl TrainingCommand {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            working_dir: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run the child in `dir`.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The HILP successor-feature run on `walker_run` with an RND dataset.
    ///
    /// Hyperparameters are fixed; only the interpreter and the replay
    /// buffer path vary between environments. The gravity label is not
    /// part of the command.
    pub fn hilp_walker_run(python: impl Into<String>, dataset_path: &str) -> Self {
        Self::new(python)
            .env("PYTHONPATH", ".")
            .args([
                DEFAULT_TRAIN_SCRIPT,
                "run_group=EXP",
                "device=cuda",
                "agent=sf",
                "agent.feature_learner=hilp",
                "p_randomgoal=0.375",
                "agent.hilp_expectile=0.5",
                "agent.hilp_discount=0.96",
                "agent.q_loss=False",
                "seed=0",
                "task=walker_run",
                "expl_agent=rnd",
            ])
            .arg(format!("load_replay_buffer={dataset_path}"))
            .arg("replay_buffer_episodes=5000")
    }

    /// Check that the command can be launched at all.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.program.trim().is_empty() {
            return Err(ProcessError::InvalidCommand(
                "program cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shell-like one-line rendering, for progress output only.
impl fmt::Display for TrainingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(k, v)| format!("{k}={}", quote(v)))
            .collect();
        parts.push(quote(&self.program));
        parts.extend(self.args.iter().map(|a| quote(a)));
        f.write_str(&parts.join(" "))
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", s.replace('\'', r"'\''"))
    } else {
        s.to_string()
    }
}

/// Result of one finished training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingOutcome {
    /// Sweep label the run belonged to.
    pub label: String,
    /// Exit code, `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
    /// Whether the child exited successfully.
    pub success: bool,
    /// Wall-clock time between spawn and exit.
    pub duration: Duration,
}

impl TrainingOutcome {
    pub fn new(
        label: impl Into<String>,
        exit_code: Option<i32>,
        success: bool,
        duration: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            exit_code,
            success,
            duration,
        }
    }

    /// Successful run with exit code 0.
    pub fn succeeded(label: impl Into<String>, duration: Duration) -> Self {
        Self::new(label, Some(0), true, duration)
    }
}

/// Launches training runs.
///
/// Each call blocks (asynchronously) until the child has exited; callers
/// rely on this to keep the sweep strictly sequential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainingRunner: Send + Sync {
    /// Run `command` to completion for the sweep entry `label`.
    ///
    /// `label` is informational. Returns `Err` only when the process could
    /// not be started or waited on; a non-zero exit is `Ok` with
    /// `success == false`.
    async fn run(
        &self,
        label: &str,
        command: &TrainingCommand,
    ) -> Result<TrainingOutcome, ProcessError>;
}
