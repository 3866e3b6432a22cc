//! Accelerator probe implementation for gravsweep-runtime.
//!
//! This module provides the `DefaultAcceleratorProbe` which implements
//! `AcceleratorProbePort` from gravsweep-core by running driver tools.

mod gpu;

use gravsweep_core::ports::{AcceleratorInfo, AcceleratorProbePort, SystemProbeError};

pub use gpu::{METAL_DEVICE_NAME, check_cuda, detect_accelerators};

/// Default implementation of `AcceleratorProbePort`.
///
/// It should be constructed in the CLI's main.rs and passed to the
/// handlers that report hardware.
///
/// # Example
///
/// ```ignore
/// use gravsweep_runtime::system::DefaultAcceleratorProbe;
/// use gravsweep_core::ports::AcceleratorProbePort;
///
/// let probe = DefaultAcceleratorProbe::new();
/// let info = probe.probe()?;
/// ```
#[derive(Debug, Default)]
pub struct DefaultAcceleratorProbe;

impl DefaultAcceleratorProbe {
    /// Create a new default accelerator probe.
    pub fn new() -> Self {
        Self
    }
}

impl AcceleratorProbePort for DefaultAcceleratorProbe {
    fn probe(&self) -> Result<AcceleratorInfo, SystemProbeError> {
        Ok(detect_accelerators())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravsweep_core::ports::AcceleratorBackend;

    #[test]
    fn test_default_probe_creation() {
        let probe = DefaultAcceleratorProbe::new();
        let info = probe.probe().unwrap();
        if info.backend == AcceleratorBackend::None {
            assert_eq!(info.device_name(0), None);
        }
    }

    #[test]
    fn test_default_probe_default_trait() {
        let probe = DefaultAcceleratorProbe;
        assert!(probe.probe().is_ok());
    }
}
