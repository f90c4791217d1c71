//! Probe Device use case
//!
//! Asks the external tool for its version on a port, bounded by a short
//! timeout. A timeout is an expected outcome ("no response"), not an error.

use crate::ports::device_tool::{DeviceToolPort, ToolRunError};
use crate::ports::invocation_logger::{InvocationLogger, NoInvocationLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::run_step;
use oneshot_domain::{CommandOutput, DomainError, PortRef, ProbeOutcome, ToolInvocation};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Errors that can occur during a probe
///
/// Everything else (timeout, missing tool, non-zero exit) is a
/// [`ProbeOutcome`].
#[derive(Error, Debug)]
pub enum ProbeDeviceError {
    #[error("Invalid target: {0}")]
    InvalidTarget(DomainError),

    #[error("Probe cancelled")]
    Cancelled,
}

/// Use case for probing a port
pub struct ProbeDeviceUseCase<T: DeviceToolPort + 'static> {
    tool: Arc<T>,
    timeout: Duration,
    cancellation: CancellationToken,
    logger: Arc<dyn InvocationLogger>,
}

impl<T: DeviceToolPort + 'static> ProbeDeviceUseCase<T> {
    pub fn new(tool: Arc<T>) -> Self {
        Self {
            tool,
            timeout: Duration::from_millis(200),
            cancellation: CancellationToken::new(),
            logger: Arc::new(NoInvocationLogger),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, port: &str) -> Result<ProbeOutcome, ProbeDeviceError> {
        self.execute_with_progress(port, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        port: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ProbeOutcome, ProbeDeviceError> {
        let port = PortRef::try_new(port).map_err(ProbeDeviceError::InvalidTarget)?;
        probe_port(
            self.tool.as_ref(),
            &port,
            self.timeout,
            &self.cancellation,
            progress,
            self.logger.as_ref(),
        )
        .await
    }
}

/// Probe an already validated port. Shared with the apply verification step.
pub(crate) async fn probe_port<T: DeviceToolPort + ?Sized>(
    tool: &T,
    port: &PortRef,
    timeout: Duration,
    cancel: &CancellationToken,
    progress: &dyn ProgressNotifier,
    logger: &dyn InvocationLogger,
) -> Result<ProbeOutcome, ProbeDeviceError> {
    let invocation = ToolInvocation::probe(port).with_timeout(Some(timeout));
    let result = run_step(tool, &invocation, cancel, progress, logger).await;
    let outcome = interpret_probe(result, timeout)?;

    if let ProbeOutcome::NoResponse { .. } = outcome {
        info!("No response from device on {}", port);
    }
    Ok(outcome)
}

/// Map a raw probe result to its outcome.
fn interpret_probe(
    result: Result<CommandOutput, ToolRunError>,
    timeout: Duration,
) -> Result<ProbeOutcome, ProbeDeviceError> {
    match result {
        Ok(output) if output.success() => Ok(ProbeOutcome::Responded {
            version: output.stdout.trim().to_string(),
        }),
        Ok(output) => Ok(ProbeOutcome::Failed {
            exit_code: output.code_or_signal(),
            stderr: output.stderr,
        }),
        Err(ToolRunError::Timeout(_)) => Ok(ProbeOutcome::no_response(timeout)),
        Err(ToolRunError::Cancelled) => Err(ProbeDeviceError::Cancelled),
        Err(e) if e.is_unavailable() => Ok(ProbeOutcome::Unavailable {
            reason: e.to_string(),
        }),
        // Started but lost while waiting
        Err(e) => Ok(ProbeOutcome::Failed {
            exit_code: -1,
            stderr: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::apply_config::tests::MockTool;

    #[tokio::test]
    async fn test_probe_responds_with_version() {
        let tool = Arc::new(MockTool::with_results(vec![Ok(CommandOutput::new(
            Some(0),
            "2.5.6\n",
            "",
            Duration::from_millis(80),
        ))]));
        let use_case = ProbeDeviceUseCase::new(Arc::clone(&tool));

        let outcome = use_case.execute("/dev/ttyUSB0").await.unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::Responded {
                version: "2.5.6".to_string()
            }
        );

        let calls = tool.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args(), &["--port", "/dev/ttyUSB0", "--ver"]);
        assert_eq!(calls[0].timeout(), Some(Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_probe_timeout_is_no_response() {
        let tool = Arc::new(MockTool::with_results(vec![Err(ToolRunError::Timeout(
            Duration::from_millis(50),
        ))]));
        let use_case = ProbeDeviceUseCase::new(tool).with_timeout(Duration::from_millis(50));

        let outcome = use_case.execute("COM3").await.unwrap();
        assert_eq!(outcome, ProbeOutcome::NoResponse { timeout_ms: 50 });
        assert_eq!(outcome.summary(), "No response from device");
    }

    #[tokio::test]
    async fn test_probe_missing_tool_is_unavailable() {
        let tool = Arc::new(MockTool::with_results(vec![Err(ToolRunError::NotFound(
            "meshtastic".to_string(),
        ))]));
        let outcome = ProbeDeviceUseCase::new(tool).execute("COM3").await.unwrap();
        assert!(matches!(outcome, ProbeOutcome::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_probe_io_error_after_spawn_is_failed() {
        let tool = Arc::new(MockTool::with_results(vec![Err(ToolRunError::Io(
            "broken pipe".to_string(),
        ))]));
        let outcome = ProbeDeviceUseCase::new(tool).execute("COM3").await.unwrap();
        assert!(matches!(
            outcome,
            ProbeOutcome::Failed { exit_code: -1, ref stderr } if stderr.contains("broken pipe")
        ));
    }

    #[tokio::test]
    async fn test_probe_nonzero_exit_is_failed() {
        let tool = Arc::new(MockTool::with_results(vec![Ok(CommandOutput::new(
            Some(1),
            "",
            "Serial port not found",
            Duration::ZERO,
        ))]));
        let outcome = ProbeDeviceUseCase::new(tool).execute("COM3").await.unwrap();
        assert_eq!(
            outcome,
            ProbeOutcome::Failed {
                exit_code: 1,
                stderr: "Serial port not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_probe_cancelled_is_error() {
        let tool = Arc::new(MockTool::with_results(vec![Err(ToolRunError::Cancelled)]));
        let result = ProbeDeviceUseCase::new(tool).execute("COM3").await;
        assert!(matches!(result, Err(ProbeDeviceError::Cancelled)));
    }

    #[tokio::test]
    async fn test_probe_placeholder_rejected_without_spawning() {
        let tool = Arc::new(MockTool::with_results(vec![]));
        let result = ProbeDeviceUseCase::new(Arc::clone(&tool))
            .execute(oneshot_domain::NO_PORTS_PLACEHOLDER)
            .await;
        assert!(matches!(result, Err(ProbeDeviceError::InvalidTarget(_))));
        assert!(tool.calls().is_empty());
    }
}
