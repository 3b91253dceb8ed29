//! Test doubles for driver-dependent code.

use crate::models::DeviceRecord;
use crate::monitor::{GatewayError, GpuGateway};

/// Scripted stand-in for the NVML gateway. Enumerates a fixed set of
/// devices and records every configuration write it receives.
pub struct FakeGateway {
    pub devices: Vec<DeviceRecord>,
    pub power_writes: Vec<(u32, u32)>,
    pub clock_writes: Vec<(u32, u32)>,
    /// When set, every write is rejected the way a driver rejects an
    /// out-of-range value.
    pub reject_writes: bool,
}

impl FakeGateway {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self {
            devices,
            power_writes: Vec::new(),
            clock_writes: Vec::new(),
            reject_writes: false,
        }
    }

    pub fn write_count(&self) -> usize {
        self.power_writes.len() + self.clock_writes.len()
    }
}

impl GpuGateway for FakeGateway {
    fn list_devices(&mut self) -> Result<Vec<DeviceRecord>, GatewayError> {
        Ok(self.devices.clone())
    }

    fn set_power_limit(&mut self, index: u32, watts: u32) -> Result<(), GatewayError> {
        if self.reject_writes {
            return Err(GatewayError::UnsupportedOperation {
                index,
                what: "power limit",
                reason: "value out of range".to_string(),
            });
        }
        self.power_writes.push((index, watts));
        Ok(())
    }

    fn set_memory_clock(&mut self, index: u32, mhz: u32) -> Result<(), GatewayError> {
        if self.reject_writes {
            return Err(GatewayError::UnsupportedOperation {
                index,
                what: "memory clock",
                reason: "value out of range".to_string(),
            });
        }
        self.clock_writes.push((index, mhz));
        Ok(())
    }
}

/// A plausible mining-rig device record for tests.
pub fn device(index: u32, power: Option<f64>) -> DeviceRecord {
    DeviceRecord {
        index,
        name: format!("GeForce RTX 30{}0", 7 + index),
        memory_total_mib: 10240,
        memory_used_mib: 9800,
        power_limit_watts: Some(220),
        power_watts: power,
    }
}
