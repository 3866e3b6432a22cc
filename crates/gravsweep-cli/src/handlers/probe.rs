//! `probe` command handler.
//!
//! Purely informational: asks the accelerator probe what it sees and prints it.

use anyhow::Result;
use gravsweep_core::ports::AcceleratorProbePort;

use crate::error::CliError;
use crate::presentation::format_accelerator;

/// Execute the probe command.
pub fn execute(probe: &dyn AcceleratorProbePort) -> Result<()> {
    let info = probe
        .probe()
        .map_err(|e| CliError::Process(e.to_string()))?;

    for line in format_accelerator(&info) {
        println!("{line}");
    }
    Ok(())
}
