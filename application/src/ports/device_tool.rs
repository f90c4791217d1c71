//! Device tool port
//!
//! Defines the interface for running the external configuration tool.

use async_trait::async_trait;
use oneshot_domain::{CommandOutput, ToolInvocation};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that prevent a tool run from producing an exit status
///
/// A run that exits non-zero is not an error at this level; it comes back
/// as a [`CommandOutput`] and the use case decides what it means.
#[derive(Error, Debug)]
pub enum ToolRunError {
    #[error("Configuration tool '{0}' not found in PATH")]
    NotFound(String),

    #[error("Failed to spawn configuration tool: {0}")]
    Spawn(String),

    #[error("Timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Invocation cancelled")]
    Cancelled,

    #[error("I/O error while waiting for tool: {0}")]
    Io(String),
}

impl ToolRunError {
    /// The tool never started (missing binary or spawn failure)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ToolRunError::NotFound(_) | ToolRunError::Spawn(_))
    }
}

/// Port for running the external configuration tool
///
/// Implementations apply the invocation's timeout, stop the process when
/// `cancel` fires, and capture stdout/stderr.
#[async_trait]
pub trait DeviceToolPort: Send + Sync {
    /// Program name used for diagnostics (e.g. `meshtastic`)
    fn program(&self) -> &str;

    /// Run one invocation to completion, timeout or cancellation
    async fn run(
        &self,
        invocation: &ToolInvocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, ToolRunError>;
}
