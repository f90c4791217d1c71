//! External tool configuration from TOML (`[tool]` section)
//!
//! ```toml
//! [tool]
//! command = "meshtastic"
//! args = []            # e.g. ["-m", "meshtastic"] with command = "python3"
//! ```

use crate::process::{DEFAULT_TOOL_COMMAND, ProcessDeviceTool};
use oneshot_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw tool configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolConfig {
    /// Program to run
    pub command: String,
    /// Arguments placed before every invocation's own arguments
    pub args: Vec<String>,
}

impl Default for FileToolConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_TOOL_COMMAND.to_string(),
            args: Vec::new(),
        }
    }
}

impl FileToolConfig {
    /// Build the process adapter this section describes
    pub fn to_device_tool(&self) -> ProcessDeviceTool {
        ProcessDeviceTool::with_command(self.command.trim()).with_prefix_args(self.args.clone())
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        if self.command.trim().is_empty() {
            vec![ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "tool.command".to_string(),
                },
                "tool.command cannot be empty",
            )]
        } else {
            Vec::new()
        }
    }
}
