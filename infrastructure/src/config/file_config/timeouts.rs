//! Timeout configuration from TOML (`[timeouts]` section)
//!
//! ```toml
//! [timeouts]
//! apply_secs = 60     # 0 waits indefinitely
//! probe_millis = 200
//! ```

use oneshot_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    pub apply_secs: u64,
    pub probe_millis: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            apply_secs: 60,
            probe_millis: 200,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn apply_timeout(&self) -> Option<Duration> {
        (self.apply_secs > 0).then(|| Duration::from_secs(self.apply_secs))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_millis)
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.probe_millis == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout {
                    field: "timeouts.probe_millis".to_string(),
                },
                "timeouts.probe_millis is 0; every probe will report no response",
            ));
        }
        issues
    }
}
