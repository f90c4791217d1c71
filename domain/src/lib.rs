//! Domain layer for meshtastic-oneshot
//!
//! This crate contains the value objects that describe a one-shot device
//! configuration. It has no dependencies on infrastructure or presentation
//! concerns and never spawns processes itself.
//!
//! # Core Concepts
//!
//! ## Device identity
//!
//! - **Long name**: free text, handed to the external tool untouched
//! - **Short name**: 0 to 4 ASCII letters, validated on construction
//!
//! ## Tool invocation
//!
//! A [`ToolInvocation`] is the ordered argument list for one run of the
//! external configuration tool (apply, reapply URL, or probe), together with
//! the timeout that bounds it.

pub mod config;
pub mod core;
pub mod device;
pub mod invocation;

// Re-export commonly used types
pub use config::{
    OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::{error::DomainError, string::truncate};
pub use device::{
    identity::{
        DEFAULT_LONG_NAME, DEFAULT_SHORT_NAME, DeviceIdentity, SHORT_NAME_MAX_LEN, ShortName,
    },
    port::{NO_PORTS_PLACEHOLDER, PortRef, PortSelection},
    settings::{DEFAULT_CHANNEL_URL, DeviceSettings},
};
pub use invocation::{
    entities::{InvocationKind, ToolInvocation},
    value_objects::{CommandOutput, ProbeOutcome},
};
