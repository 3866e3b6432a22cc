//! Command-line adapter for gravsweep.
//!
//! `main.rs` is the composition root; this library holds the parser,
//! bootstrap, handlers and terminal presentation so they can be tested.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for test infrastructure
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, SweepArgs, SweepSourceArgs};
pub use error::CliError;
pub use parser::Cli;
