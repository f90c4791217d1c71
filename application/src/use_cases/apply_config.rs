//! Apply Config use case
//!
//! Writes the owner names, the fixed radio/network settings and the channel
//! URL to a device in one invocation of the external tool, optionally
//! followed by a URL-only write and a verification probe.

use crate::config::ExecutionParams;
use crate::ports::device_tool::{DeviceToolPort, ToolRunError};
use crate::ports::invocation_logger::{InvocationLogger, NoInvocationLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::probe_device::{ProbeDeviceError, probe_port};
use crate::use_cases::shared::{pause, run_step};
use oneshot_domain::{
    CommandOutput, DeviceIdentity, DeviceSettings, DomainError, InvocationKind, PortRef,
    ProbeOutcome, ToolInvocation,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that can occur while applying a configuration
///
/// Every variant that involved a process carries the exact command line
/// that was attempted, and shows it in its `Display` output.
#[derive(Error, Debug)]
pub enum ApplyConfigError {
    #[error("{0}")]
    InvalidIdentity(DomainError),

    #[error("Invalid target: {0}")]
    InvalidTarget(DomainError),

    #[error(
        "An error occurred: {step} step exited with code {exit_code}\nFailed command: {command_line}\n{stderr}"
    )]
    ToolFailed {
        step: InvocationKind,
        command_line: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("An error occurred: {step} step timed out after {timeout_ms} ms\nFailed command: {command_line}")]
    Timeout {
        step: InvocationKind,
        command_line: String,
        timeout_ms: u64,
    },

    #[error("An error occurred: {reason}\nFailed command: {command_line}")]
    ToolUnavailable {
        step: InvocationKind,
        command_line: String,
        reason: String,
    },

    #[error("Configuration cancelled")]
    Cancelled,
}

impl ApplyConfigError {
    /// The attempted command line, when a process was involved
    pub fn command_line(&self) -> Option<&str> {
        match self {
            ApplyConfigError::ToolFailed { command_line, .. }
            | ApplyConfigError::Timeout { command_line, .. }
            | ApplyConfigError::ToolUnavailable { command_line, .. } => Some(command_line),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApplyConfigError::Cancelled)
    }
}

/// Input for the ApplyConfig use case
///
/// Names and port arrive as raw text and are validated by the use case,
/// so a placeholder port or a bad short name fails before anything runs.
#[derive(Debug, Clone)]
pub struct ApplyConfigInput {
    pub long_name: String,
    pub short_name: String,
    pub port: String,
    pub settings: DeviceSettings,
}

impl ApplyConfigInput {
    pub fn new(
        long_name: impl Into<String>,
        short_name: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            long_name: long_name.into(),
            short_name: short_name.into(),
            port: port.into(),
            settings: DeviceSettings::default(),
        }
    }

    pub fn from_identity(identity: &DeviceIdentity, port: impl Into<String>) -> Self {
        Self::new(
            identity.long_name.clone(),
            identity.short_name.as_str(),
            port,
        )
    }

    pub fn with_settings(mut self, settings: DeviceSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Command line and output of one successful step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub command_line: String,
    pub output: CommandOutput,
}

/// Result of a successful apply
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub identity: DeviceIdentity,
    pub port: PortRef,
    pub apply: StepReport,
    /// Present when the URL-only write was enabled
    pub reapply: Option<StepReport>,
    /// Present when verification was enabled
    pub verify: Option<ProbeOutcome>,
}

impl ApplyReport {
    /// Status line shown above the tool output
    pub fn summary(&self) -> String {
        format!(
            "Successfully set names and port: {}, {}, {}",
            self.identity.long_name, self.identity.short_name, self.port
        )
    }
}

/// Use case for applying a configuration to one device
pub struct ApplyConfigUseCase<T: DeviceToolPort + 'static> {
    tool: Arc<T>,
    params: ExecutionParams,
    cancellation: CancellationToken,
    logger: Arc<dyn InvocationLogger>,
}

impl<T: DeviceToolPort + 'static> ApplyConfigUseCase<T> {
    pub fn new(tool: Arc<T>) -> Self {
        Self {
            tool,
            params: ExecutionParams::default(),
            cancellation: CancellationToken::new(),
            logger: Arc::new(NoInvocationLogger),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
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
    pub async fn execute(&self, input: ApplyConfigInput) -> Result<ApplyReport, ApplyConfigError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ApplyConfigInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ApplyReport, ApplyConfigError> {
        // Short name is normally checked at input time; check again here.
        let identity = DeviceIdentity::try_new(input.long_name, input.short_name)
            .map_err(ApplyConfigError::InvalidIdentity)?;
        let port = PortRef::try_new(input.port).map_err(ApplyConfigError::InvalidTarget)?;

        info!("Applying configuration to {}", port);

        // Step 1: full configuration write
        let invocation = ToolInvocation::apply(&identity, &port, &input.settings)
            .with_timeout(self.params.apply_timeout);
        let apply = self.run_checked(&invocation, progress).await?;

        // Step 2: URL-only write (optional)
        let reapply = if self.params.reapply_url {
            progress.on_wait(self.params.reapply_delay);
            if !pause(self.params.reapply_delay, &self.cancellation).await {
                return Err(ApplyConfigError::Cancelled);
            }
            let invocation = ToolInvocation::reapply_url(&port, &input.settings.channel_url)
                .with_timeout(self.params.apply_timeout);
            Some(self.run_checked(&invocation, progress).await?)
        } else {
            None
        };

        // Step 3: verification probe (optional, never fails the apply)
        let verify = if self.params.verify {
            let outcome = probe_port(
                self.tool.as_ref(),
                &port,
                self.params.probe_timeout,
                &self.cancellation,
                progress,
                self.logger.as_ref(),
            )
            .await
            .map_err(|e| match e {
                ProbeDeviceError::Cancelled => ApplyConfigError::Cancelled,
                ProbeDeviceError::InvalidTarget(e) => ApplyConfigError::InvalidTarget(e),
            })?;
            if !outcome.is_responsive() {
                warn!("Verification probe on {}: {}", port, outcome.summary());
            }
            Some(outcome)
        } else {
            None
        };

        info!("Configuration applied to {}", port);

        Ok(ApplyReport {
            identity,
            port,
            apply,
            reapply,
            verify,
        })
    }

    /// Run a write step and turn anything but exit code 0 into an error
    async fn run_checked(
        &self,
        invocation: &ToolInvocation,
        progress: &dyn ProgressNotifier,
    ) -> Result<StepReport, ApplyConfigError> {
        let step = invocation.kind();
        let command_line = invocation.command_line(self.tool.program());

        let result = run_step(
            self.tool.as_ref(),
            invocation,
            &self.cancellation,
            progress,
            self.logger.as_ref(),
        )
        .await;

        match result {
            Ok(output) if output.success() => Ok(StepReport {
                command_line,
                output,
            }),
            Ok(output) => Err(ApplyConfigError::ToolFailed {
                step,
                command_line,
                exit_code: output.code_or_signal(),
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            Err(ToolRunError::Timeout(timeout)) => Err(ApplyConfigError::Timeout {
                step,
                command_line,
                timeout_ms: timeout.as_millis() as u64,
            }),
            Err(ToolRunError::Cancelled) => Err(ApplyConfigError::Cancelled),
            Err(e) => Err(ApplyConfigError::ToolUnavailable {
                step,
                command_line,
                reason: e.to_string(),
            }),
        }
    }
}
