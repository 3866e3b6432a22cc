//! `sweep` command handler.

use std::sync::Arc;

use anyhow::Result;
use gravsweep_core::{SweepReport, SweepService};
use tracing::info;

use crate::bootstrap::{CliContext, build_request};
use crate::commands::SweepArgs;
use crate::error::CliError;
use crate::presentation::{ConsoleSweepEmitter, print_report};

/// Execute the sweep command.
///
/// Progress is printed while the sweep runs and a summary table at the end.
/// The configuration is restored before this returns, on success and on error.
pub async fn execute(ctx: &CliContext, args: SweepArgs) -> Result<()> {
    let report = run(ctx, &args).await?;
    print_report(&report);
    Ok(())
}

/// Run the sweep without printing the summary.
pub async fn run(ctx: &CliContext, args: &SweepArgs) -> Result<SweepReport, CliError> {
    let request = build_request(&args.source, args.options())?;
    info!(
        "Sweeping {} gravity settings over {}",
        request.sweep.len(),
        request.config_path.display()
    );

    let service = SweepService::new(Arc::clone(ctx.runner()))
        .with_emitter(Arc::new(ConsoleSweepEmitter::new()));
    Ok(service.run(&request).await?)
}
