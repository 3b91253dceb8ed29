//! Application-wide constants.
//!
//! Centralizes magic numbers, defaults, and filesystem paths so they are
//! not scattered across the codebase.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Minimum allowed refresh interval (ms). The CPU usage figure is sampled
/// over a one-second window, so redrawing faster than that shows stale data.
pub const MIN_REFRESH_MS: u64 = 1000;
/// Default refresh interval (ms).
pub const DEFAULT_REFRESH_MS: u64 = 1000;
/// Initial system data settling delay (ms). sysinfo needs two refreshes
/// spaced apart before CPU usage is meaningful.
pub const INITIAL_SETTLE_MS: u64 = 250;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;

// ── Units ─────────────────────────────────────────────────────────
/// 1 MiB in bytes.
pub const ONE_MIB: u64 = 1024 * 1024;
/// Milliwatts per watt (NVML reports and accepts milliwatts).
pub const MILLIWATTS_PER_WATT: u32 = 1000;

// ── UI Layout ─────────────────────────────────────────────────────
/// Maximum GPU name width in the device table before truncation.
pub const GPU_NAME_WIDTH: usize = 28;

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/rigmon/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("rigmon")
}

/// Returns `~/.config/rigmon/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
