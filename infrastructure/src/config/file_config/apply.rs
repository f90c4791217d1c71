//! Optional apply steps from TOML (`[apply]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw apply configuration from TOML
///
/// # Example
///
/// ```toml
/// [apply]
/// reapply_url = true          # write the channel URL a second time
/// reapply_delay_millis = 2000
/// verify = true               # probe the device afterwards
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApplyConfig {
    pub reapply_url: bool,
    pub reapply_delay_millis: u64,
    pub verify: bool,
}

impl Default for FileApplyConfig {
    fn default() -> Self {
        Self {
            reapply_url: false,
            reapply_delay_millis: 2000,
            verify: false,
        }
    }
}

impl FileApplyConfig {
    pub fn reapply_delay(&self) -> Duration {
        Duration::from_millis(self.reapply_delay_millis)
    }
}
