//! Console progress lines for a running sweep.

use gravsweep_core::{GravityVector, SweepEvent, SweepEventEmitter};

use super::{RED, RESET, YELLOW, format_duration};

/// Prints sweep progress to stdout as it happens.
#[derive(Debug, Default)]
pub struct ConsoleSweepEmitter;

impl ConsoleSweepEmitter {
    pub const fn new() -> Self {
        Self
    }
}

impl SweepEventEmitter for ConsoleSweepEmitter {
    fn emit(&self, event: SweepEvent) {
        println!("{}", format_event(&event));
    }
}

/// Render an event as console text.
pub fn format_event(event: &SweepEvent) -> String {
    match event {
        SweepEvent::Started { config_path, total } => format!(
            "Backed up {} ({} gravity settings to train)",
            config_path.display(),
            total
        ),
        SweepEvent::EntryStarted {
            index,
            total,
            label,
            gravity,
            command,
        } => format!(
            "\n[{}/{}] Training model with {} gravity: {}\nRunning command for {} gravity:\n{}",
            index + 1,
            total,
            label,
            tuple(*gravity),
            label,
            command
        ),
        SweepEvent::GravityMissing { label } => format!(
            "{YELLOW}! No gravity attribute found; {label} trains with the unchanged config{RESET}"
        ),
        SweepEvent::EntryFinished { outcome } if outcome.success => format!(
            "Training for {} finished in {}",
            outcome.label,
            format_duration(outcome.duration)
        ),
        SweepEvent::EntryFinished { outcome } => format!(
            "{RED}Training for {} exited unsuccessfully (exit code: {}){RESET}",
            outcome.label,
            outcome
                .exit_code
                .map_or_else(|| "none".to_string(), |c| c.to_string())
        ),
        SweepEvent::EntrySkipped { label } => {
            format!("Dry run: training for {label} not launched")
        }
        SweepEvent::Completed { .. } => "\nAll training runs completed.".to_string(),
        SweepEvent::Restored { .. } => "Original XML file has been restored.".to_string(),
    }
}

fn tuple(g: GravityVector) -> String {
    format!("({}, {}, {})", g.x, g.y, g.z)
}
