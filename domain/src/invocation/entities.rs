//! Tool invocation entity

use crate::device::identity::DeviceIdentity;
use crate::device::port::PortRef;
use crate::device::settings::DeviceSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which step of the workflow an invocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationKind {
    /// Full configuration write (names, settings, URL)
    Apply,
    /// Second write carrying only the channel URL
    ReapplyUrl,
    /// Version query used to detect a responsive device
    Probe,
}

impl InvocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationKind::Apply => "apply",
            InvocationKind::ReapplyUrl => "reapply_url",
            InvocationKind::Probe => "probe",
        }
    }
}

impl std::fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One run of the external tool (Entity)
///
/// Arguments are kept as a list and handed to the process without a shell,
/// so every value reaches the tool byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    kind: InvocationKind,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ToolInvocation {
    /// Full configuration write
    ///
    /// Argument order is fixed; the short name appears twice (owner short
    /// name and ham identifier).
    pub fn apply(identity: &DeviceIdentity, port: &PortRef, settings: &DeviceSettings) -> Self {
        let short = identity.short_name.as_str();
        let args = vec![
            "--set-owner".to_string(),
            identity.long_name.clone(),
            "--set-owner-short".to_string(),
            short.to_string(),
            "--set-ham".to_string(),
            short.to_string(),
            "--set".to_string(),
            "lora.region".to_string(),
            settings.region.clone(),
            "--set".to_string(),
            "mqtt.enabled".to_string(),
            settings.mqtt_enabled.to_string(),
            "--set".to_string(),
            "mqtt.proxy_to_client_enabled".to_string(),
            settings.mqtt_proxy_to_client_enabled.to_string(),
            "--set".to_string(),
            "mqtt.map_reporting_enabled".to_string(),
            settings.mqtt_map_reporting_enabled.to_string(),
            "--seturl".to_string(),
            settings.channel_url.clone(),
            "--port".to_string(),
            port.to_string(),
            "--set".to_string(),
            "lora.txPower".to_string(),
            settings.tx_power.to_string(),
        ];
        Self {
            kind: InvocationKind::Apply,
            args,
            timeout: None,
        }
    }

    /// Channel URL only, issued after a successful apply
    pub fn reapply_url(port: &PortRef, channel_url: &str) -> Self {
        Self {
            kind: InvocationKind::ReapplyUrl,
            args: vec![
                "--port".to_string(),
                port.to_string(),
                "--seturl".to_string(),
                channel_url.to_string(),
            ],
            timeout: None,
        }
    }

    /// Version query
    pub fn probe(port: &PortRef) -> Self {
        Self {
            kind: InvocationKind::Probe,
            args: vec!["--port".to_string(), port.to_string(), "--ver".to_string()],
            timeout: None,
        }
    }

    /// Bound the run; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn kind(&self) -> InvocationKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Command line for diagnostics: program and arguments joined by spaces
    ///
    /// Not meant to be re-parsed by a shell.
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
