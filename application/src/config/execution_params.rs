//! Execution parameters: timeout policy and optional workflow steps.
//!
//! [`ExecutionParams`] is the single place where apply and probe get their
//! time bounds, so both call sites share one policy. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts and optional steps for device configuration.
///
/// | Field | Used by |
/// |-------|---------|
/// | `apply_timeout` | apply, reapply URL |
/// | `probe_timeout` | probe, verify |
/// | `reapply_url`, `reapply_delay` | apply |
/// | `verify` | apply |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Upper bound for a configuration write. `None` waits indefinitely.
    pub apply_timeout: Option<Duration>,
    /// Upper bound for a version probe.
    pub probe_timeout: Duration,
    /// Issue a second, URL-only write after a successful apply.
    pub reapply_url: bool,
    /// Pause between the apply and the URL-only write.
    pub reapply_delay: Duration,
    /// Probe the device after a successful apply.
    pub verify: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            apply_timeout: Some(Duration::from_secs(60)),
            probe_timeout: Duration::from_millis(200),
            reapply_url: false,
            reapply_delay: Duration::from_secs(2),
            verify: false,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_apply_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.apply_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_reapply_url(mut self, enabled: bool) -> Self {
        self.reapply_url = enabled;
        self
    }

    pub fn with_reapply_delay(mut self, delay: Duration) -> Self {
        self.reapply_delay = delay;
        self
    }

    pub fn with_verify(mut self, enabled: bool) -> Self {
        self.verify = enabled;
        self
    }
}
