//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Resolve CLI-specific input through bootstrap
//!   2. Call core services
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain sweep logic or touch the configuration
//! file directly.

pub mod plan;
pub mod probe;
pub mod sweep;
