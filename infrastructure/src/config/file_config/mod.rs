//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod apply;
mod identity;
mod output;
mod timeouts;
mod tool;

pub use apply::FileApplyConfig;
pub use identity::FileIdentityConfig;
pub use output::FileOutputConfig;
pub use timeouts::FileTimeoutsConfig;
pub use tool::FileToolConfig;

use oneshot_application::ExecutionParams;
use oneshot_domain::{ConfigIssue, ConfigIssueCode, DeviceSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// External tool to run
    pub tool: FileToolConfig,
    /// Identity used when the command line omits one
    pub identity: FileIdentityConfig,
    /// Parameter set written with every apply
    pub device: DeviceSettings,
    /// Time bounds for apply and probe
    pub timeouts: FileTimeoutsConfig,
    /// Optional apply steps
    pub apply: FileApplyConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Empty tool command
    /// 2. Default short name outside the 0-4 letter rule
    /// 3. Zero probe timeout
    /// 4. Empty channel URL
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.tool.issues());
        issues.extend(self.identity.to_identity().1);
        issues.extend(self.timeouts.issues());

        if self.device.channel_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "device.channel_url".to_string(),
                },
                "device.channel_url cannot be empty",
            ));
        }

        issues
    }

    /// Fail on error-level issues; hand back the warnings.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(
                errors.into_iter().map(|issue| issue.message).collect(),
            ))
        }
    }

    /// Timeouts and optional steps for the use cases
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_apply_timeout(self.timeouts.apply_timeout())
            .with_probe_timeout(self.timeouts.probe_timeout())
            .with_reapply_url(self.apply.reapply_url)
            .with_reapply_delay(self.apply.reapply_delay())
            .with_verify(self.apply.verify)
    }
}
