//! Device telemetry gateway: the single seam between this tool and NVML.
//!
//! `NvmlGateway` owns the process-wide NVML handle and translates device
//! queries/commands into the library's calling convention. Everything that
//! consumes GPU data goes through the [`GpuGateway`] trait so the snapshot
//! aggregator and the configuration session can be exercised against a
//! scripted fake in tests.

use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;
use thiserror::Error;

use crate::constants::{MILLIWATTS_PER_WATT, ONE_MIB};
use crate::models::DeviceRecord;

/// Errors crossing the driver boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The NVML shared library could not be located. Fatal for every
    /// telemetry-dependent code path; system facts still display.
    #[error("NVML library not found -- is the NVIDIA driver installed?")]
    DriverUnavailable(#[source] NvmlError),

    /// The library loaded but initialization failed (no compatible device,
    /// insufficient privilege, ...). Same fatality as `DriverUnavailable`.
    #[error("NVML initialization failed: {0}")]
    DriverInitFailed(#[source] NvmlError),

    /// No device handle could be resolved at this index.
    #[error("no GPU at index {0}")]
    UnknownDevice(u32),

    /// A required telemetry read failed for one device.
    #[error("telemetry read failed for GPU {index}: {reason}")]
    TelemetryReadFailed { index: u32, reason: String },

    /// The driver rejected a configuration write (value out of the
    /// hardware-allowed range, feature unsupported on this board).
    #[error("driver rejected {what} for GPU {index}: {reason}")]
    UnsupportedOperation {
        index: u32,
        what: &'static str,
        reason: String,
    },
}

/// Read/write access to the rig's GPUs.
///
/// Methods take `&mut self` because configuration writes mutate driver
/// state; there is only ever one caller at a time by construction.
pub trait GpuGateway {
    /// Enumerate every device the driver reports.
    ///
    /// The returned sequence always has exactly the driver-reported length,
    /// with `index` values 0..count-1 in order. A failing power or
    /// power-limit read on one device marks that field absent and moves on;
    /// one broken sensor must not hide the other GPUs.
    fn list_devices(&mut self) -> Result<Vec<DeviceRecord>, GatewayError>;

    /// Set the sustained power ceiling for one device, in watts.
    fn set_power_limit(&mut self, index: u32, watts: u32) -> Result<(), GatewayError>;

    /// Lock the application clocks of one device to `mhz`.
    ///
    /// NOTE: NVML's applications-clocks call takes a memory and a graphics
    /// frequency, and this method passes `mhz` for *both* domains. Only a
    /// memory clock target is exposed to the operator, but the core clock
    /// gets pinned to the same value as a side effect.
    fn set_memory_clock(&mut self, index: u32, mhz: u32) -> Result<(), GatewayError>;
}

/// Convert an operator-supplied watt value to the driver's milliwatt unit.
///
/// Returns None on overflow instead of wrapping; a wrapped value would
/// reach the hardware as a bogus *lower* limit.
fn watts_to_milliwatts(watts: u32) -> Option<u32> {
    watts.checked_mul(MILLIWATTS_PER_WATT)
}

/// Production gateway backed by the NVML shared library.
pub struct NvmlGateway {
    nvml: Nvml,
}

impl NvmlGateway {
    /// Load and initialize NVML. Runs exactly once per process; the tool is
    /// short-lived and never re-initializes.
    pub fn init() -> Result<Self, GatewayError> {
        match Nvml::init() {
            Ok(nvml) => Ok(Self { nvml }),
            Err(e @ NvmlError::LibloadingError(_)) => Err(GatewayError::DriverUnavailable(e)),
            Err(e) => Err(GatewayError::DriverInitFailed(e)),
        }
    }

    fn device_record(&self, index: u32) -> Result<DeviceRecord, GatewayError> {
        let device = self
            .nvml
            .device_by_index(index)
            .map_err(|_| GatewayError::UnknownDevice(index))?;

        let name = device.name().unwrap_or_else(|_| "NVIDIA GPU".to_string());
        let memory = device
            .memory_info()
            .map_err(|e| GatewayError::TelemetryReadFailed {
                index,
                reason: e.to_string(),
            })?;

        // Power draw and limit can each fail transiently on their own;
        // record absence instead of aborting the enumeration.
        let power_watts = device
            .power_usage()
            .ok()
            .map(|mw| mw as f64 / MILLIWATTS_PER_WATT as f64);
        let power_limit_watts = device
            .power_management_limit()
            .ok()
            .map(|mw| mw / MILLIWATTS_PER_WATT);

        Ok(DeviceRecord {
            index,
            name,
            memory_total_mib: memory.total / ONE_MIB,
            memory_used_mib: memory.used / ONE_MIB,
            power_limit_watts,
            power_watts,
        })
    }
}

impl GpuGateway for NvmlGateway {
    fn list_devices(&mut self) -> Result<Vec<DeviceRecord>, GatewayError> {
        let count = self
            .nvml
            .device_count()
            .map_err(|e| GatewayError::TelemetryReadFailed {
                index: 0,
                reason: e.to_string(),
            })?;

        (0..count).map(|i| self.device_record(i)).collect()
    }

    fn set_power_limit(&mut self, index: u32, watts: u32) -> Result<(), GatewayError> {
        let milliwatts =
            watts_to_milliwatts(watts).ok_or_else(|| GatewayError::UnsupportedOperation {
                index,
                what: "power limit",
                reason: format!("{} W exceeds the driver's milliwatt range", watts),
            })?;

        let mut device = self
            .nvml
            .device_by_index(index)
            .map_err(|_| GatewayError::UnknownDevice(index))?;

        device
            .set_power_management_limit(milliwatts)
            .map_err(|e| GatewayError::UnsupportedOperation {
                index,
                what: "power limit",
                reason: e.to_string(),
            })
    }

    fn set_memory_clock(&mut self, index: u32, mhz: u32) -> Result<(), GatewayError> {
        let mut device = self
            .nvml
            .device_by_index(index)
            .map_err(|_| GatewayError::UnknownDevice(index))?;

        // Same frequency for both domains; see the trait docs.
        device
            .set_applications_clocks(mhz, mhz)
            .map_err(|e| GatewayError::UnsupportedOperation {
                index,
                what: "memory clock",
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watt_conversion_in_range() {
        assert_eq!(watts_to_milliwatts(220), Some(220_000));
        assert_eq!(watts_to_milliwatts(0), Some(0));
        // Largest watt value the driver's u32 milliwatt field can carry
        assert_eq!(watts_to_milliwatts(4_294_967), Some(4_294_967_000));
    }

    #[test]
    fn watt_conversion_overflow_is_rejected_not_wrapped() {
        // 4_294_968 W * 1000 would wrap past u32::MAX
        assert_eq!(watts_to_milliwatts(4_294_968), None);
        assert_eq!(watts_to_milliwatts(u32::MAX), None);
    }
}
