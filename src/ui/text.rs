//! Plain-text rendering for the one-shot mode.

use crate::constants::GPU_NAME_WIDTH;
use crate::models::{format_bytes, Snapshot, SystemFacts};
use crate::utils::{format_limit, format_mib, format_watts, truncate_str};

/// Render the host facts as a scrolling-friendly table.
pub fn facts_table(facts: &SystemFacts) -> String {
    let cores = match facts.physical_cores {
        Some(p) => format!("{} cores / {} threads", p, facts.logical_cpus),
        None => format!("{} threads", facts.logical_cpus),
    };

    let rows = [
        ("Host", facts.hostname.clone()),
        ("OS", format!("{} {}", facts.os_name, facts.os_version)),
        ("Kernel", facts.kernel_version.clone()),
        ("Arch", facts.arch.clone()),
        ("CPU", facts.cpu_brand.clone()),
        ("Cores", cores),
        ("RAM", format_bytes(facts.total_memory)),
    ];

    let mut out = String::from("System Information\n");
    for (label, value) in rows {
        out.push_str(&format!("  {:<8}{}\n", label, value));
    }
    out
}

/// Render one snapshot as a device table plus the total power line.
pub fn snapshot_table(snap: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4}{:<width$}{:<24}{:<12}{:<8}\n",
        "#",
        "Name",
        "Memory",
        "Power",
        "Limit",
        width = GPU_NAME_WIDTH + 2,
    ));

    for d in &snap.devices {
        out.push_str(&format!(
            "{:<4}{:<width$}{:<24}{:<12}{:<8}\n",
            d.index,
            truncate_str(&d.name, GPU_NAME_WIDTH),
            format!(
                "{} / {}",
                format_mib(d.memory_used_mib),
                format_mib(d.memory_total_mib)
            ),
            format_watts(d.power_watts),
            format_limit(d.power_limit_watts),
            width = GPU_NAME_WIDTH + 2,
        ));
    }

    out.push_str(&format!(
        "Total GPU Power: {:.1} W\n",
        snap.total_power_watts
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceRecord;

    fn sample_snapshot() -> Snapshot {
        Snapshot::from_devices(vec![
            DeviceRecord {
                index: 0,
                name: "GeForce RTX 3070".into(),
                memory_total_mib: 8192,
                memory_used_mib: 7900,
                power_limit_watts: Some(220),
                power_watts: Some(183.25),
            },
            DeviceRecord {
                index: 1,
                name: "GeForce RTX 3080".into(),
                memory_total_mib: 10240,
                memory_used_mib: 9800,
                power_limit_watts: None,
                power_watts: None,
            },
        ])
    }

    #[test]
    fn snapshot_table_lists_every_device_and_total() {
        let text = snapshot_table(&sample_snapshot());
        assert!(text.contains("GeForce RTX 3070"));
        assert!(text.contains("GeForce RTX 3080"));
        assert!(text.contains("183.2 W"));
        assert!(text.contains("Total GPU Power: 183.2 W"));
    }

    #[test]
    fn absent_telemetry_renders_as_na() {
        let text = snapshot_table(&sample_snapshot());
        let broken_row = text.lines().nth(2).unwrap();
        assert!(broken_row.contains("n/a"));
    }

    #[test]
    fn empty_snapshot_still_prints_zero_total() {
        let text = snapshot_table(&Snapshot::from_devices(Vec::new()));
        assert!(text.contains("Total GPU Power: 0.0 W"));
    }

    #[test]
    fn facts_table_includes_core_counts() {
        let facts = SystemFacts {
            hostname: "rig01".into(),
            os_name: "Linux".into(),
            os_version: "6.8".into(),
            kernel_version: "6.8.0-41".into(),
            arch: "x86_64".into(),
            cpu_brand: "AMD Ryzen 9 5950X".into(),
            physical_cores: Some(16),
            logical_cpus: 32,
            total_memory: 64 * 1024 * 1024 * 1024,
        };
        let text = facts_table(&facts);
        assert!(text.contains("16 cores / 32 threads"));
        assert!(text.contains("64.0 GiB"));
    }
}
