//! Process adapter for the external configuration tool.
//!
//! Implements [`DeviceToolPort`](oneshot_application::DeviceToolPort) by
//! spawning the tool with `tokio::process`, without a shell.

mod device_tool;

pub use device_tool::{DEFAULT_TOOL_COMMAND, ProcessDeviceTool};
