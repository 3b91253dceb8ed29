//! Per-GPU telemetry records and the per-tick snapshot.

/// One GPU as seen on a single poll. Ephemeral: a fresh record is built
/// every tick and discarded after render.
///
/// `index` is assigned by driver enumeration order (0-based) and uniquely
/// identifies the device for the lifetime of one run. Telemetry fields that
/// can fail independently are `Option` so callers must handle absence
/// instead of mistaking a broken sensor for a zero reading.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub index: u32,
    /// Driver-reported identifier string.
    pub name: String,
    pub memory_total_mib: u64,
    pub memory_used_mib: u64,
    /// Configured power ceiling in watts. None if the read failed.
    pub power_limit_watts: Option<u32>,
    /// Current power draw in watts. None if telemetry is unavailable.
    pub power_watts: Option<f64>,
}

/// One consistent point-in-time view of the rig: every enumerated device
/// plus the derived total power figure.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub devices: Vec<DeviceRecord>,
    /// Sum of the *present* power readings only. Absent readings are
    /// excluded, not treated as zero.
    pub total_power_watts: f64,
}

impl Snapshot {
    pub fn from_devices(devices: Vec<DeviceRecord>) -> Self {
        let total_power_watts = devices.iter().filter_map(|d| d.power_watts).sum();
        Self {
            devices,
            total_power_watts,
        }
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

impl DeviceRecord {
    pub fn memory_percent(&self) -> f32 {
        if self.memory_total_mib == 0 {
            return 0.0;
        }
        (self.memory_used_mib as f32 / self.memory_total_mib as f32) * 100.0
    }
}
