//! `plan` command handler: show what a sweep would do.

use std::fs;

use anyhow::Result;
use gravsweep_core::{SweepOptions, SweepRequest, backup_path_for, current_gravity};

use crate::bootstrap::build_request;
use crate::commands::SweepSourceArgs;
use crate::error::CliError;
use crate::presentation::{BOLD, RESET, YELLOW};

/// Execute the plan command. Reads the configuration but never writes it.
pub fn execute(args: &SweepSourceArgs) -> Result<()> {
    let request = build_request(args, SweepOptions::default())?;
    let config_text = fs::read_to_string(&request.config_path).map_err(|e| {
        CliError::Io(format!("{}: {}", request.config_path.display(), e))
    })?;

    for line in describe(&request, &config_text) {
        println!("{line}");
    }
    Ok(())
}

/// Plan lines for `request` given the current configuration text.
pub fn describe(request: &SweepRequest, config_text: &str) -> Vec<String> {
    let mut lines = vec![
        format!("{BOLD}Config:{RESET}  {}", request.config_path.display()),
        format!(
            "{BOLD}Backup:{RESET}  {}",
            backup_path_for(&request.config_path).display()
        ),
    ];

    match current_gravity(config_text) {
        Some(value) => lines.push(format!("{BOLD}Gravity:{RESET} \"{value}\" (restored afterwards)")),
        None => lines.push(format!(
            "{YELLOW}! No gravity attribute found; every run would use the unchanged config{RESET}"
        )),
    }

    lines.push(format!("\n{BOLD}Sweep ({} runs):{RESET}", request.sweep.len()));
    for (i, entry) in request.sweep.iter().enumerate() {
        lines.push(format!("  {}. {:<12} gravity=\"{}\"", i + 1, entry.label, entry.gravity));
    }

    lines.push(format!("\n{BOLD}Command (same for every run):{RESET}"));
    lines.push(request.command.to_string());
    if let Some(ref dir) = request.command.working_dir {
        lines.push(format!("  in {}", dir.display()));
    }
    lines
}
