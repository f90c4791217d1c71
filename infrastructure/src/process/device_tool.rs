//! Device tool adapter backed by a child process.
//!
//! Every run is bounded by the invocation's timeout and by a
//! [`CancellationToken`]. The child is spawned with `kill_on_drop`, so
//! abandoning the wait (timeout or cancellation) also ends the process.
//!
//! # Configuration
//!
//! ```toml
//! [tool]
//! command = "meshtastic"
//! # Run through an interpreter instead:
//! # command = "python3"
//! # args = ["-m", "meshtastic"]
//! ```

use async_trait::async_trait;
use oneshot_application::ports::device_tool::{DeviceToolPort, ToolRunError};
use oneshot_domain::{CommandOutput, ToolInvocation};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Program invoked when nothing else is configured
pub const DEFAULT_TOOL_COMMAND: &str = "meshtastic";

/// Maximum captured size per stream (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Runs the configuration tool as a child process
#[derive(Debug, Clone)]
pub struct ProcessDeviceTool {
    command: String,
    /// Arguments placed before every invocation's own arguments
    prefix_args: Vec<String>,
    /// `command` and `prefix_args` joined, for diagnostics
    display_name: String,
}

impl ProcessDeviceTool {
    /// Create a tool that runs `meshtastic` from `PATH`
    pub fn new() -> Self {
        Self::with_command(DEFAULT_TOOL_COMMAND)
    }

    /// Create a tool that runs a custom program
    pub fn with_command(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            display_name: command.clone(),
            command,
            prefix_args: Vec::new(),
        }
    }

    /// Arguments inserted before each invocation (e.g. `-m meshtastic`)
    pub fn with_prefix_args(mut self, args: Vec<String>) -> Self {
        self.display_name = std::iter::once(self.command.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        self.prefix_args = args;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Check if the configured program can be found
    pub fn is_available(&self) -> bool {
        which::which(&self.command).is_ok()
    }

    fn build_command(&self, invocation: &ToolInvocation) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.prefix_args)
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for ProcessDeviceTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceToolPort for ProcessDeviceTool {
    fn program(&self) -> &str {
        &self.display_name
    }

    async fn run(
        &self,
        invocation: &ToolInvocation,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, ToolRunError> {
        if cancel.is_cancelled() {
            return Err(ToolRunError::Cancelled);
        }

        let start = Instant::now();
        let child = self.build_command(invocation).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolRunError::NotFound(self.command.clone())
            } else {
                ToolRunError::Spawn(e.to_string())
            }
        })?;
        debug!("Spawned {} (pid {:?})", self.command, child.id());

        let wait = async {
            match invocation.timeout() {
                Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                    Ok(result) => result.map_err(|e| ToolRunError::Io(e.to_string())),
                    Err(_) => Err(ToolRunError::Timeout(limit)),
                },
                None => child
                    .wait_with_output()
                    .await
                    .map_err(|e| ToolRunError::Io(e.to_string())),
            }
        };

        // Dropping `wait` drops the child, which kills it.
        let output = tokio::select! {
            _ = cancel.cancelled() => Err(ToolRunError::Cancelled),
            result = wait => result,
        }?;

        Ok(CommandOutput::new(
            output.status.code(),
            capture(&output.stdout),
            capture(&output.stderr),
            start.elapsed(),
        ))
    }
}

/// Decode a captured stream, truncating oversized output
fn capture(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() > MAX_OUTPUT_SIZE {
        let mut end = MAX_OUTPUT_SIZE;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("\n... (output truncated)");
    }
    text
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use oneshot_domain::{DeviceIdentity, DeviceSettings, PortRef};
    use std::time::Duration;

    /// A stand-in for the real tool: `sh -c <script> meshtastic <args...>`
    fn fake_tool(script: &str) -> ProcessDeviceTool {
        ProcessDeviceTool::with_command("sh").with_prefix_args(vec![
            "-c".to_string(),
            script.to_string(),
            "meshtastic".to_string(),
        ])
    }

    fn port() -> PortRef {
        PortRef::try_new("COM3").unwrap()
    }

    #[tokio::test]
    async fn test_arguments_reach_the_tool() {
        let tool = fake_tool(r#"echo "$@""#);
        let output = tool
            .run(&ToolInvocation::probe(&port()), &CancellationToken::new())
            .await
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, "--port COM3 --ver\n");
    }

    #[tokio::test]
    async fn test_long_name_arrives_unmodified() {
        let long = "Node \"#1\"; $(reboot) `id` 台北 *";
        let identity = DeviceIdentity::try_new(long, "AB").unwrap();
        let invocation = ToolInvocation::apply(&identity, &port(), &DeviceSettings::default());

        // $1 is --set-owner, $2 is the long name
        let tool = fake_tool(r#"printf '%s' "$2""#);
        let output = tool
            .run(&invocation, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output.stdout, long);
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_captured() {
        let tool = fake_tool("echo 'no device' >&2; exit 3");
        let output = tool
            .run(&ToolInvocation::probe(&port()), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "no device\n");
    }

    #[tokio::test]
    async fn test_timeout_kills_the_tool() {
        let tool = fake_tool("exec sleep 5");
        let invocation =
            ToolInvocation::probe(&port()).with_timeout(Some(Duration::from_millis(100)));

        let start = Instant::now();
        let result = tool.run(&invocation, &CancellationToken::new()).await;

        assert!(matches!(result, Err(ToolRunError::Timeout(d)) if d == Duration::from_millis(100)));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_cancellation_stops_the_tool() {
        let tool = fake_tool("exec sleep 5");
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let result = tool.run(&ToolInvocation::probe(&port()), &token).await;

        assert!(matches!(result, Err(ToolRunError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_already_cancelled_does_not_spawn() {
        let token = CancellationToken::new();
        token.cancel();
        let result = ProcessDeviceTool::with_command("definitely_not_a_real_command_xyz123")
            .run(&ToolInvocation::probe(&port()), &token)
            .await;
        assert!(matches!(result, Err(ToolRunError::Cancelled)));
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let tool = ProcessDeviceTool::with_command("definitely_not_a_real_command_xyz123");
        assert!(!tool.is_available());

        let result = tool
            .run(&ToolInvocation::probe(&port()), &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(ToolRunError::NotFound(name)) if name == "definitely_not_a_real_command_xyz123"));
    }

    #[test]
    fn test_program_includes_prefix_args() {
        let tool = ProcessDeviceTool::with_command("python3")
            .with_prefix_args(vec!["-m".to_string(), "meshtastic".to_string()]);
        assert_eq!(tool.program(), "python3 -m meshtastic");
        assert_eq!(tool.command(), "python3");
        assert_eq!(ProcessDeviceTool::new().program(), "meshtastic");
    }

    #[test]
    fn test_capture_truncates_large_output() {
        let big = vec![b'x'; MAX_OUTPUT_SIZE + 10];
        let text = capture(&big);
        assert!(text.ends_with("(output truncated)"));
        assert!(text.len() < MAX_OUTPUT_SIZE + 64);
    }

    #[test]
    fn test_is_available_for_sh() {
        assert!(ProcessDeviceTool::with_command("sh").is_available());
    }
}
