//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod apply_config;
pub mod list_ports;
pub mod probe_device;
pub(crate) mod shared;
