//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for running gravity sweeps over a simulator
/// configuration.
#[derive(Parser, Debug)]
#[command(name = "gravsweep")]
#[command(about = "Train once per gravity setting, restoring the simulator config afterwards")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
