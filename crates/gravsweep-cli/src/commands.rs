//! Main commands enum and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use gravsweep_core::{DEFAULT_DATASET_PATH, SweepOptions};

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one training per gravity setting, then restore the config
    Sweep(SweepArgs),

    /// Show the resolved sweep and training command without running anything
    Plan(SweepSourceArgs),

    /// Report whether a GPU accelerator is available
    Probe,
}

/// Where the sweep comes from and how training is invoked.
#[derive(Args, Debug, Clone)]
pub struct SweepSourceArgs {
    /// Simulator XML configuration edited in place during the sweep
    #[arg(short, long, env = "GRAVSWEEP_CONFIG")]
    pub config: PathBuf,

    /// JSON sweep file: {"entries":[{"label":"Mars","gravity":[0,0,-3.71]}]}
    #[arg(long = "sweep-file", conflicts_with = "gravity")]
    pub sweep_file: Option<PathBuf>,

    /// Gravity entry as LABEL=X,Y,Z (repeatable, order is kept)
    #[arg(short, long, value_name = "LABEL=X,Y,Z")]
    pub gravity: Vec<String>,

    /// Replay buffer passed to the trainer
    #[arg(long, env = "GRAVSWEEP_DATASET", default_value = DEFAULT_DATASET_PATH)]
    pub dataset: String,

    /// Working directory for the trainer (its repository root)
    #[arg(long, env = "GRAVSWEEP_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Python interpreter used to launch the trainer
    #[arg(long, env = "GRAVSWEEP_PYTHON", default_value = "python")]
    pub python: String,
}

/// Arguments of the `sweep` command.
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub source: SweepSourceArgs,

    /// Stop the sweep when a training run exits non-zero
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Fail when the config has no gravity attribute instead of warning
    #[arg(long = "require-gravity")]
    pub require_gravity: bool,

    /// Rewrite and restore the config but do not launch training
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Discard the trainer's stdout/stderr
    #[arg(short, long = "quiet-training")]
    pub quiet_training: bool,
}

impl SweepArgs {
    /// Sweep behavior selected by the flags.
    pub const fn options(&self) -> SweepOptions {
        SweepOptions {
            fail_on_training_error: self.fail_fast,
            require_gravity_attr: self.require_gravity,
            dry_run: self.dry_run,
        }
    }
}
