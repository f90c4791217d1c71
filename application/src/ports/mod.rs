//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod device_tool;
pub mod invocation_logger;
pub mod port_enumerator;
pub mod progress;
