//! Host-level facts and live resource usage.

/// Static facts about the host machine. Collected from the OS once at
/// startup; nothing here changes while the tool runs.
#[derive(Debug, Clone)]
pub struct SystemFacts {
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub arch: String,
    pub cpu_brand: String,
    /// Physical core count, if the OS exposes it.
    pub physical_cores: Option<usize>,
    pub logical_cpus: usize,
    pub total_memory: u64,
}

/// Live CPU/RAM usage, re-sampled every tick for the refreshing display.
#[derive(Debug, Clone, Default)]
pub struct ResourceUsage {
    /// Global CPU usage percent, averaged over the last sampling window.
    pub cpu_percent: f32,
    pub used_memory: u64,
    pub total_memory: u64,
}

impl ResourceUsage {
    pub fn memory_percent(&self) -> f32 {
        if self.total_memory == 0 {
            return 0.0;
        }
        (self.used_memory as f32 / self.total_memory as f32) * 100.0
    }
}

/// Formats bytes into human-readable string (KiB, MiB, GiB)
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}
