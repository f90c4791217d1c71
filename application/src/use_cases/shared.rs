//! Shared utilities for use cases.
//!
//! Every tool run (apply, reapply URL, probe) goes through [`run_step`], so
//! progress, structured logging and the port's timeout/cancellation handling
//! stay identical across call sites.

use crate::ports::device_tool::{DeviceToolPort, ToolRunError};
use crate::ports::invocation_logger::{InvocationEvent, InvocationLogger};
use crate::ports::progress::ProgressNotifier;
use oneshot_domain::{CommandOutput, ToolInvocation, truncate};
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Longest stdout/stderr excerpt written to debug logs
const LOG_EXCERPT_LEN: usize = 512;

/// Run one invocation with progress and structured logging.
pub(crate) async fn run_step<T: DeviceToolPort + ?Sized>(
    tool: &T,
    invocation: &ToolInvocation,
    cancel: &CancellationToken,
    progress: &dyn ProgressNotifier,
    logger: &dyn InvocationLogger,
) -> Result<CommandOutput, ToolRunError> {
    let kind = invocation.kind();
    let command_line = invocation.command_line(tool.program());

    info!("Running {} step", kind);
    debug!("Command: {}", command_line);
    progress.on_step_start(kind, &command_line);
    logger.log(InvocationEvent::new(
        "tool_started",
        json!({
            "step": kind.as_str(),
            "command_line": command_line,
            "program": tool.program(),
            "args": invocation.args(),
            "timeout_ms": invocation.timeout().map(|t| t.as_millis() as u64),
        }),
    ));

    let result = tool.run(invocation, cancel).await;

    match &result {
        Ok(output) => {
            info!(
                "{} step exited with code {} after {} ms",
                kind,
                output.code_or_signal(),
                output.duration_ms
            );
            debug!("stdout: {}", truncate(output.stdout.trim(), LOG_EXCERPT_LEN));
            if !output.stderr.trim().is_empty() {
                debug!("stderr: {}", truncate(output.stderr.trim(), LOG_EXCERPT_LEN));
            }
            logger.log(InvocationEvent::new(
                "tool_finished",
                json!({
                    "step": kind.as_str(),
                    "exit_code": output.exit_code,
                    "duration_ms": output.duration_ms,
                    "stderr": output.stderr,
                }),
            ));
            progress.on_step_complete(kind, output.success());
        }
        Err(e) => {
            // Probe timeouts are routine; the probe use case reports them itself.
            if !matches!(e, ToolRunError::Timeout(_) | ToolRunError::Cancelled) {
                warn!("{} step failed: {}", kind, e);
            }
            logger.log(InvocationEvent::new(
                "tool_error",
                json!({
                    "step": kind.as_str(),
                    "error": e.to_string(),
                }),
            ));
            progress.on_step_complete(kind, false);
        }
    }

    result
}

/// Sleep for `delay` unless cancelled first.
///
/// Returns `false` when the token fired.
pub(crate) async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    if delay.is_zero() {
        return !cancel.is_cancelled();
    }
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
