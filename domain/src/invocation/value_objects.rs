//! Results of tool invocations

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Captured result of a finished tool run (Value Object)
///
/// Exists only for one invocation; rendered to the operator and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl CommandOutput {
    pub fn new(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code for display (`-1` for signal termination)
    pub fn code_or_signal(&self) -> i32 {
        self.exit_code.unwrap_or(-1)
    }
}

/// What a version probe revealed about a port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The tool answered in time; `version` is its trimmed stdout
    Responded { version: String },
    /// The timeout elapsed first. Expected when nothing is attached.
    NoResponse { timeout_ms: u64 },
    /// The tool could not be started (e.g. not installed)
    Unavailable { reason: String },
    /// The tool ran and exited non-zero
    Failed { exit_code: i32, stderr: String },
}

impl ProbeOutcome {
    pub fn no_response(timeout: Duration) -> Self {
        ProbeOutcome::NoResponse {
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    pub fn is_responsive(&self) -> bool {
        matches!(self, ProbeOutcome::Responded { .. })
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Responded { version } => Some(version),
            _ => None,
        }
    }

    /// One-line description for the operator
    pub fn summary(&self) -> String {
        match self {
            ProbeOutcome::Responded { version } => version.clone(),
            ProbeOutcome::NoResponse { .. } => "No response from device".to_string(),
            ProbeOutcome::Unavailable { reason } => {
                format!("Configuration tool unavailable: {}", reason)
            }
            ProbeOutcome::Failed { exit_code, stderr } => {
                format!("Probe exited with code {}: {}", exit_code, stderr.trim())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let ok = CommandOutput::new(Some(0), "done", "", Duration::from_millis(1500));
        assert!(ok.success());
        assert_eq!(ok.duration_ms, 1500);

        let failed = CommandOutput::new(Some(1), "", "boom", Duration::ZERO);
        assert!(!failed.success());

        let killed = CommandOutput::new(None, "", "", Duration::ZERO);
        assert!(!killed.success());
        assert_eq!(killed.code_or_signal(), -1);
    }

    #[test]
    fn test_probe_outcome_summary() {
        let outcome = ProbeOutcome::no_response(Duration::from_millis(200));
        assert_eq!(outcome, ProbeOutcome::NoResponse { timeout_ms: 200 });
        assert_eq!(outcome.summary(), "No response from device");
        assert!(!outcome.is_responsive());

        let responded = ProbeOutcome::Responded {
            version: "meshtastic v2.3.11".to_string(),
        };
        assert!(responded.is_responsive());
        assert_eq!(responded.version(), Some("meshtastic v2.3.11"));
    }

    #[test]
    fn test_probe_outcome_serialize_tagged() {
        let json = serde_json::to_string(&ProbeOutcome::no_response(Duration::from_millis(200)))
            .unwrap();
        assert_eq!(json, r#"{"status":"no_response","timeout_ms":200}"#);
    }
}
