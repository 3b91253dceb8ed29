//! Display state for the continuous mode.

use std::time::Instant;

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::models::{ResourceUsage, Snapshot, SystemFacts};

use super::theme::Theme;

/// Everything the renderer needs to draw one frame.
///
/// The GPU snapshot is replaced wholesale each tick; nothing from the
/// previous tick survives except the status message and tick counter.
pub struct AppState {
    pub facts: SystemFacts,
    pub usage: ResourceUsage,
    /// Latest snapshot, None until the first successful capture.
    pub snapshot: Option<Snapshot>,
    /// Why GPU telemetry is missing, when it is (degraded mode).
    pub gpu_error: Option<String>,
    pub theme: Theme,
    pub tick_count: u64,
    status: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(facts: SystemFacts) -> Self {
        Self {
            facts,
            usage: ResourceUsage::default(),
            snapshot: None,
            gpu_error: None,
            theme: Theme::default(),
            tick_count: 0,
            status: None,
        }
    }

    /// Install the outcome of one capture tick.
    ///
    /// A snapshot has no identity beyond its tick: when a capture fails,
    /// the previous snapshot is discarded rather than left on screen as
    /// if it were live telemetry.
    pub fn update_snapshot(&mut self, result: Result<Snapshot, String>) {
        match result {
            Ok(snap) => {
                self.snapshot = Some(snap);
                self.gpu_error = None;
            }
            Err(e) => {
                self.snapshot = None;
                self.gpu_error = Some(e);
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some((message, Instant::now()));
    }

    /// Current status message, if it hasn't expired yet.
    pub fn status_line(&self) -> Option<&str> {
        match &self.status {
            Some((msg, set_at))
                if set_at.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS =>
            {
                Some(msg.as_str())
            }
            _ => None,
        }
    }
}
