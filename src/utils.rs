//! Shared utility functions used across modules.

/// Truncate a string to `max_len` characters, appending "..." if truncated.
///
/// Counts characters rather than bytes: device names come straight from
/// the driver and may contain multi-byte UTF-8.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Format an optional power reading in watts. Absent telemetry renders
/// as "n/a" rather than a fake zero.
pub fn format_watts(watts: Option<f64>) -> String {
    match watts {
        Some(w) => format!("{:.1} W", w),
        None => "n/a".to_string(),
    }
}

/// Format an optional power limit in whole watts.
pub fn format_limit(watts: Option<u32>) -> String {
    match watts {
        Some(w) => format!("{} W", w),
        None => "n/a".to_string(),
    }
}

/// Format a MiB quantity, switching to GiB above 1024 MiB.
pub fn format_mib(mib: u64) -> String {
    if mib >= 1024 {
        format!("{:.1} GiB", mib as f64 / 1024.0)
    } else {
        format!("{} MiB", mib)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_str ──────────────────────────────────────────────

    #[test]
    fn truncate_str_short_string_unchanged() {
        assert_eq!(truncate_str("RTX 3080", 10), "RTX 3080");
    }

    #[test]
    fn truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_str_max_len_3_or_less() {
        // When max_len <= 3, no room for "...", just hard-cut
        assert_eq!(truncate_str("abcdef", 3), "abc");
        assert_eq!(truncate_str("abcdef", 1), "a");
    }

    #[test]
    fn truncate_str_empty_string() {
        assert_eq!(truncate_str("", 5), "");
    }

    #[test]
    fn truncate_str_multibyte_near_boundary() {
        // Byte-indexed slicing would panic inside the CJK characters here
        assert_eq!(truncate_str("GeForce グラフィックス", 10), "GeForce...");
        assert_eq!(truncate_str("グラフィックス", 5), "グラ...");
        assert_eq!(truncate_str("グラフィックス", 2), "グラ");
        assert_eq!(truncate_str("グラフィックス", 7), "グラフィックス");
    }

    // ── formatting ────────────────────────────────────────────────

    #[test]
    fn format_watts_present_and_absent() {
        assert_eq!(format_watts(Some(219.46)), "219.5 W");
        assert_eq!(format_watts(None), "n/a");
    }

    #[test]
    fn format_limit_present_and_absent() {
        assert_eq!(format_limit(Some(250)), "250 W");
        assert_eq!(format_limit(None), "n/a");
    }

    #[test]
    fn format_mib_switches_to_gib() {
        assert_eq!(format_mib(512), "512 MiB");
        assert_eq!(format_mib(1024), "1.0 GiB");
        assert_eq!(format_mib(10240), "10.0 GiB");
    }
}
