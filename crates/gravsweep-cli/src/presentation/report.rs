//! Sweep summary table and accelerator report.

use std::time::Duration;

use gravsweep_core::{AcceleratorBackend, AcceleratorInfo, SweepReport};

use super::{BOLD, GREEN, RED, RESET, YELLOW};

/// Print the per-entry summary of a finished sweep.
pub fn print_report(report: &SweepReport) {
    println!(
        "\n{}{:<16} {:<10} {:<12}{}",
        BOLD, "GRAVITY", "EXIT", "DURATION", RESET
    );
    println!("{}", "=".repeat(40));

    for run in &report.runs {
        let exit = run
            .exit_code
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        let color = if run.success { GREEN } else { RED };
        println!(
            "{:<16} {}{:<10}{} {:<12}",
            run.label,
            color,
            exit,
            RESET,
            format_duration(run.duration)
        );
    }
    for label in &report.skipped {
        println!("{label:<16} {YELLOW}{:<10}{RESET} {:<12}", "skipped", "-");
    }

    let failed = report.failed_runs().count();
    if failed == 0 {
        println!(
            "\n{}✓ {}/{} gravity settings processed{}",
            GREEN,
            report.processed(),
            report.total,
            RESET
        );
    } else {
        println!(
            "\n{}✗ {} of {} training runs exited unsuccessfully{}",
            RED,
            failed,
            report.runs.len(),
            RESET
        );
    }
    if !report.unmatched.is_empty() {
        println!(
            "{}! No gravity attribute was rewritten for: {}{}",
            YELLOW,
            report.unmatched.join(", "),
            RESET
        );
    }
}

/// Human-readable duration such as `42.0s` or `1h 03m 07s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        return format!("{:.1}s", duration.as_secs_f64());
    }
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else {
        format!("{m}m {s:02}s")
    }
}

/// Lines of the accelerator report.
///
/// The first line answers whether CUDA is usable. With CUDA devices the
/// second gives the device count and the name of device 0. Metal devices
/// are listed as notes since training cannot use them.
pub fn format_accelerator(info: &AcceleratorInfo) -> Vec<String> {
    let mut lines = match info.device_name(0) {
        Some(name) if info.is_available() => vec![
            "CUDA is available".to_string(),
            format!("{} {}", info.device_count(), name),
        ],
        _ => vec!["CUDA is not available".to_string()],
    };
    if info.backend == AcceleratorBackend::Metal {
        lines.extend(
            info.devices
                .iter()
                .map(|name| format!("Metal device present: {name} (not used by device=cuda)")),
        );
    }
    if let Some(ref version) = info.toolkit_version {
        lines.push(format!("CUDA toolkit {version}"));
    }
    lines
}
