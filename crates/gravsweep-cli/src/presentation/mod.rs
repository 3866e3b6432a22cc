//! Terminal presentation for sweep progress and results.

mod progress;
mod report;

pub use progress::{ConsoleSweepEmitter, format_event};
pub use report::{format_accelerator, format_duration, print_report};

// ANSI color codes for better UX
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const RESET: &str = "\x1b[0m";
