//! GPU detection through the host driver tooling.
//!
//! This module provides the active probing behind `DefaultAcceleratorProbe`.
//! It never links against a GPU runtime; everything is read from the
//! output of `nvidia-smi` and `nvcc`.

use std::process::Command;

use gravsweep_core::ports::{AcceleratorBackend, AcceleratorInfo};
use tracing::debug;

/// Name reported for the single Metal device on macOS.
pub const METAL_DEVICE_NAME: &str = "Apple GPU";

/// Detect accelerators, preferring CUDA devices over Metal.
pub fn detect_accelerators() -> AcceleratorInfo {
    let devices = query_nvidia_devices();
    if !devices.is_empty() {
        return AcceleratorInfo {
            backend: AcceleratorBackend::Cuda,
            devices,
            toolkit_version: check_cuda(),
        };
    }

    if cfg!(target_os = "macos") {
        return AcceleratorInfo {
            backend: AcceleratorBackend::Metal,
            devices: vec![METAL_DEVICE_NAME.to_string()],
            toolkit_version: None,
        };
    }

    AcceleratorInfo {
        toolkit_version: check_cuda(),
        ..AcceleratorInfo::unavailable()
    }
}

/// List NVIDIA device names in driver index order.
///
/// Returns an empty list when `nvidia-smi` is missing or fails, which is
/// what happens on hosts without NVIDIA drivers.
fn query_nvidia_devices() -> Vec<String> {
    let output = match Command::new("nvidia-smi")
        .args(["--query-gpu=name", "--format=csv,noheader"])
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            debug!("nvidia-smi not available: {}", e);
            return Vec::new();
        }
    };

    if !output.status.success() {
        debug!("nvidia-smi exited with {}", output.status);
        return Vec::new();
    }

    parse_device_names(&String::from_utf8_lossy(&output.stdout))
}

/// One device name per non-empty line.
pub(crate) fn parse_device_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Check if NVIDIA CUDA toolkit is installed.
pub fn check_cuda() -> Option<String> {
    let output = Command::new("nvcc").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_nvcc_release(&String::from_utf8_lossy(&output.stdout))
}

/// Extract "12.0" from "Cuda compilation tools, release 12.0, V12.0.140".
pub(crate) fn parse_nvcc_release(stdout: &str) -> Option<String> {
    let line = stdout.lines().find(|l| l.contains("release"))?;
    let version = line.split("release").nth(1)?;
    let version = version.trim().split(',').next().unwrap_or("").trim();
    (!version.is_empty()).then(|| version.to_string())
}
