//! Accelerator probe port for GPU detection.
//!
//! This port abstracts hardware probing (driver tool execution) from the
//! core domain. Implementations live in adapters (e.g., gravsweep-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and types (pure)
//! - Runtime owns the implementation (active probing via `Command::new`)
//! - CLI injects the probe via main.rs

use thiserror::Error;

/// Errors that can occur during accelerator probing.
#[derive(Debug, Error)]
pub enum SystemProbeError {
    /// Failed to execute a probing command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The probing command ran but its output was unusable.
    #[error("Unexpected output from {command}: {reason}")]
    UnexpectedOutput { command: String, reason: String },
}

/// Compute backend exposing the detected devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceleratorBackend {
    /// NVIDIA devices driven through CUDA.
    Cuda,
    /// Apple GPU through Metal.
    Metal,
    /// No accelerator; training falls back to the CPU.
    None,
}

impl AcceleratorBackend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cuda => "CUDA",
            Self::Metal => "Metal",
            Self::None => "none",
        }
    }
}

/// Accelerator detection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceleratorInfo {
    /// Backend the devices belong to.
    pub backend: AcceleratorBackend,
    /// Device names, indexed like the runtime indexes them.
    pub devices: Vec<String>,
    /// CUDA toolkit version, when a toolkit is installed.
    pub toolkit_version: Option<String>,
}

impl AcceleratorInfo {
    /// No accelerator present.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            backend: AcceleratorBackend::None,
            devices: Vec::new(),
            toolkit_version: None,
        }
    }

    /// True when at least one CUDA device was found.
    ///
    /// The training command is pinned to `device=cuda`, so Metal devices do
    /// not count.
    pub fn is_available(&self) -> bool {
        self.backend == AcceleratorBackend::Cuda && !self.devices.is_empty()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Name of device `index`, if it exists.
    pub fn device_name(&self, index: usize) -> Option<&str> {
        self.devices.get(index).map(String::as_str)
    }
}

/// Port for probing accelerator hardware.
///
/// # Example
///
/// ```ignore
/// use gravsweep_core::ports::AcceleratorProbePort;
///
/// fn report(probe: &dyn AcceleratorProbePort) {
///     let info = probe.probe()?;
///     println!("{} devices", info.device_count());
/// }
/// ```
pub trait AcceleratorProbePort: Send + Sync {
    /// Query presence, count and names of accelerator devices.
    fn probe(&self) -> Result<AcceleratorInfo, SystemProbeError>;
}
