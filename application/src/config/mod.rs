//! Application-level configuration.
//!
//! - [`ExecutionParams`]: timeouts and optional steps shared by the use cases

pub mod execution_params;

pub use execution_params::ExecutionParams;
