//! Application layer for meshtastic-oneshot
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    device_tool::{DeviceToolPort, ToolRunError},
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    port_enumerator::{EnumerationError, PortEnumeratorPort},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::apply_config::{
    ApplyConfigError, ApplyConfigInput, ApplyConfigUseCase, ApplyReport, StepReport,
};
pub use use_cases::list_ports::ListPortsUseCase;
pub use use_cases::probe_device::{ProbeDeviceError, ProbeDeviceUseCase};
