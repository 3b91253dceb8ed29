//! Host-level data collection via sysinfo.
//!
//! Single responsibility: gather OS/CPU/RAM facts and live usage. GPU data
//! never flows through here; that is the gateway's job.

use sysinfo::System;

use crate::constants::INITIAL_SETTLE_MS;
use crate::models::{ResourceUsage, SystemFacts};

/// Collects static host facts and per-tick CPU/RAM usage.
pub struct SystemCollector {
    sys: System,
}

impl SystemCollector {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        // Two refreshes spaced apart, or the first CPU reading is garbage
        std::thread::sleep(std::time::Duration::from_millis(INITIAL_SETTLE_MS));
        sys.refresh_all();
        Self { sys }
    }

    /// Static facts about the host. Pure read; nothing here changes
    /// between ticks.
    pub fn facts(&self) -> SystemFacts {
        let cpu_brand = self
            .sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        SystemFacts {
            hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
            os_name: System::name().unwrap_or_else(|| "Unknown".into()),
            os_version: System::os_version().unwrap_or_default(),
            kernel_version: System::kernel_version().unwrap_or_default(),
            arch: System::cpu_arch().unwrap_or_else(|| std::env::consts::ARCH.to_string()),
            cpu_brand,
            physical_cores: self.sys.physical_core_count(),
            logical_cpus: self.sys.cpus().len(),
            total_memory: self.sys.total_memory(),
        }
    }

    /// Re-sample CPU and memory usage. The CPU figure is averaged over the
    /// window since the previous call, which is what paces the display tick.
    pub fn usage(&mut self) -> ResourceUsage {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();

        ResourceUsage {
            cpu_percent: self.sys.global_cpu_usage(),
            used_memory: self.sys.used_memory(),
            total_memory: self.sys.total_memory(),
        }
    }
}
