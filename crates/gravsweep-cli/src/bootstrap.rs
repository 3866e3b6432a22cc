//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Training runner (via gravsweep-runtime)
//! - Accelerator probe (via gravsweep-runtime)
//!
//! It also turns parsed arguments into a `SweepRequest`.

use std::sync::Arc;

use gravsweep_core::ports::{AcceleratorProbePort, TrainingRunner};
use gravsweep_core::{SweepOptions, SweepRequest, SweepSet, TrainingCommand};
use gravsweep_runtime::{DefaultAcceleratorProbe, ProcessTrainingRunner};
use tracing::debug;

use crate::commands::{Commands, SweepSourceArgs};
use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliConfig {
    /// Discard the trainer's stdout/stderr.
    pub quiet_training: bool,
}

impl CliConfig {
    /// Derive the configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let quiet_training = matches!(&cli.command, Some(Commands::Sweep(args)) if args.quiet_training);
        Self { quiet_training }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Launches training processes.
    pub runner: Arc<dyn TrainingRunner>,
    /// Reports accelerator hardware.
    pub probe: Arc<dyn AcceleratorProbePort>,
}

impl CliContext {
    /// Access the training runner.
    pub fn runner(&self) -> &Arc<dyn TrainingRunner> {
        &self.runner
    }

    /// Access the accelerator probe.
    pub fn probe(&self) -> &Arc<dyn AcceleratorProbePort> {
        &self.probe
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let runner: Arc<dyn TrainingRunner> = if config.quiet_training {
        Arc::new(ProcessTrainingRunner::quiet())
    } else {
        Arc::new(ProcessTrainingRunner::new())
    };

    CliContext {
        runner,
        probe: Arc::new(DefaultAcceleratorProbe::new()),
    }
}

/// Bootstrap with custom ports (for testing).
pub fn bootstrap_with(
    runner: Arc<dyn TrainingRunner>,
    probe: Arc<dyn AcceleratorProbePort>,
) -> CliContext {
    CliContext { runner, probe }
}

/// Resolve the sweep set: sweep file, then `--gravity` entries, then the
/// built-in planetary set.
pub fn resolve_sweep(args: &SweepSourceArgs) -> Result<SweepSet, CliError> {
    if let Some(ref file) = args.sweep_file {
        debug!("Loading sweep from {}", file.display());
        return Ok(SweepSet::load(file)?);
    }
    if !args.gravity.is_empty() {
        return Ok(SweepSet::from_specs(&args.gravity)?);
    }
    debug!("No sweep given, using the planetary set");
    Ok(SweepSet::planetary())
}

/// Training command for the configured interpreter, dataset and workdir.
pub fn resolve_command(args: &SweepSourceArgs) -> TrainingCommand {
    let command = TrainingCommand::hilp_walker_run(&args.python, &args.dataset);
    match args.workdir {
        Some(ref dir) => command.working_dir(dir),
        None => command,
    }
}

/// Build the full sweep request from arguments.
pub fn build_request(
    args: &SweepSourceArgs,
    options: SweepOptions,
) -> Result<SweepRequest, CliError> {
    Ok(SweepRequest {
        config_path: args.config.clone(),
        sweep: resolve_sweep(args)?,
        command: resolve_command(args),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravsweep_core::{DEFAULT_DATASET_PATH, GravityVector};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn source() -> SweepSourceArgs {
        SweepSourceArgs {
            config: PathBuf::from("walker.xml"),
            sweep_file: None,
            gravity: Vec::new(),
            dataset: DEFAULT_DATASET_PATH.to_string(),
            workdir: None,
            python: "python".to_string(),
        }
    }

    #[test]
    fn test_default_sweep_is_planetary() {
        let sweep = resolve_sweep(&source()).unwrap();
        assert_eq!(sweep, SweepSet::planetary());
    }

    #[test]
    fn test_gravity_entries_win_over_default() {
        let mut args = source();
        args.gravity = vec!["Titan=0,0,-1.35".to_string()];
        let sweep = resolve_sweep(&args).unwrap();
        assert_eq!(sweep.len(), 1);
        assert_eq!(sweep.entries()[0].gravity, GravityVector::new(0.0, 0.0, -1.35));
    }

    #[test]
    fn test_bad_gravity_entry_is_argument_error() {
        let mut args = source();
        args.gravity = vec!["Titan".to_string()];
        let err = resolve_sweep(&args).unwrap_err();
        assert!(matches!(err, CliError::Arguments(_)));
    }

    #[test]
    fn test_sweep_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sweep.json");
        std::fs::write(
            &file,
            r#"{"entries":[{"label":"Pluto","gravity":[0,0,-0.62]}]}"#,
        )
        .unwrap();

        let mut args = source();
        args.sweep_file = Some(file);
        let sweep = resolve_sweep(&args).unwrap();
        assert_eq!(sweep.labels().collect::<Vec<_>>(), vec!["Pluto"]);
    }

    #[test]
    fn test_missing_sweep_file_is_io_error() {
        let mut args = source();
        args.sweep_file = Some(PathBuf::from("/nonexistent/sweep.json"));
        assert!(matches!(resolve_sweep(&args), Err(CliError::Io(_))));
    }

    #[test]
    fn test_resolve_command_uses_python_dataset_and_workdir() {
        let mut args = source();
        args.python = "python3".to_string();
        args.dataset = "/data/replay.pt".to_string();
        args.workdir = Some(PathBuf::from("/opt/hilp"));

        let command = resolve_command(&args);
        assert_eq!(command.program, "python3");
        assert!(
            command
                .args
                .contains(&"load_replay_buffer=/data/replay.pt".to_string())
        );
        assert_eq!(command.working_dir, Some(PathBuf::from("/opt/hilp")));
    }

    #[test]
    fn test_config_from_cli() {
        use clap::Parser;
        let cli = Cli::parse_from(["gravsweep", "sweep", "-c", "w.xml", "--quiet-training"]);
        assert!(CliConfig::from_cli(&cli).quiet_training);

        let cli = Cli::parse_from(["gravsweep", "probe"]);
        assert!(!CliConfig::from_cli(&cli).quiet_training);
    }
}
