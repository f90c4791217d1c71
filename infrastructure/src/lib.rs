//! Infrastructure layer for meshtastic-oneshot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod process;
pub mod serial;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApplyConfig, FileConfig, FileIdentityConfig,
    FileOutputConfig, FileTimeoutsConfig, FileToolConfig,
};
pub use logging::JsonlInvocationLogger;
pub use process::{DEFAULT_TOOL_COMMAND, ProcessDeviceTool};
pub use serial::SerialPortEnumerator;
