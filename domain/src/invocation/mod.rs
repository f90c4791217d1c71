//! Invocations of the external configuration tool and their results.
//!
//! - [`entities::ToolInvocation`]: ordered argument list plus timeout
//! - [`value_objects::CommandOutput`]: what a finished run produced
//! - [`value_objects::ProbeOutcome`]: interpretation of a version probe

pub mod entities;
pub mod value_objects;
