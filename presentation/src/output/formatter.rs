//! Output formatter trait

use crate::output::console::ConsoleFormatter;
use oneshot_application::{ApplyConfigError, ApplyReport};
use oneshot_domain::{
    DeviceIdentity, DeviceSettings, OutputFormat, PortRef, PortSelection, ProbeOutcome,
    ToolInvocation,
};
use serde_json::{Value, json};

/// Trait for formatting command results
pub trait OutputFormatter {
    /// Port list, or the placeholder when nothing was found
    fn ports(&self, selection: &PortSelection) -> String;

    fn probe(&self, port: &str, outcome: &ProbeOutcome) -> String;

    fn apply(&self, report: &ApplyReport) -> String;

    fn apply_error(&self, error: &ApplyConfigError) -> String;

    /// Default identity and settings, with the command they produce
    fn defaults(&self, identity: &DeviceIdentity, settings: &DeviceSettings, program: &str)
    -> String;
}

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Port shown in the command preview of `defaults`
pub(crate) const PREVIEW_PORT: &str = "<PORT>";

/// Command line `defaults` would run, with a stand-in port
pub(crate) fn preview_command(
    identity: &DeviceIdentity,
    settings: &DeviceSettings,
    program: &str,
) -> Option<String> {
    let port = PortRef::try_new(PREVIEW_PORT).ok()?;
    Some(ToolInvocation::apply(identity, &port, settings).command_line(program))
}

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: Value) -> String {
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
        format!("{}\n", text)
    }
}

impl OutputFormatter for JsonFormatter {
    fn ports(&self, selection: &PortSelection) -> String {
        Self::render(json!({
            "ports": selection.entries(),
            "default": selection.default_entry(),
            "available": !selection.is_empty(),
        }))
    }

    fn probe(&self, port: &str, outcome: &ProbeOutcome) -> String {
        Self::render(json!({
            "port": port,
            "outcome": outcome,
            "version": outcome.version(),
            "summary": outcome.summary(),
        }))
    }

    fn apply(&self, report: &ApplyReport) -> String {
        Self::render(json!({
            "success": true,
            "summary": report.summary(),
            "report": report,
        }))
    }

    fn apply_error(&self, error: &ApplyConfigError) -> String {
        let (exit_code, stdout, stderr) = match error {
            ApplyConfigError::ToolFailed {
                exit_code,
                stdout,
                stderr,
                ..
            } => (Some(*exit_code), Some(stdout.as_str()), Some(stderr.as_str())),
            _ => (None, None, None),
        };
        Self::render(json!({
            "success": false,
            "error": error.to_string(),
            "command_line": error.command_line(),
            "exit_code": exit_code,
            "stdout": stdout,
            "stderr": stderr,
        }))
    }

    fn defaults(
        &self,
        identity: &DeviceIdentity,
        settings: &DeviceSettings,
        program: &str,
    ) -> String {
        Self::render(json!({
            "identity": identity,
            "settings": settings,
            "command_line": preview_command(identity, settings, program),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneshot_domain::{CommandOutput, InvocationKind, NO_PORTS_PLACEHOLDER};
    use std::time::Duration;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_json_ports_empty_uses_placeholder() {
        let value = parse(&JsonFormatter.ports(&PortSelection::empty()));
        assert_eq!(value["ports"], json!([NO_PORTS_PLACEHOLDER]));
        assert_eq!(value["default"], NO_PORTS_PLACEHOLDER);
        assert_eq!(value["available"], false);
    }

    #[test]
    fn test_json_ports() {
        let selection = PortSelection::new(vec![
            PortRef::try_new("COM3").unwrap(),
            PortRef::try_new("COM4").unwrap(),
        ]);
        let value = parse(&JsonFormatter.ports(&selection));
        assert_eq!(value["ports"], json!(["COM3", "COM4"]));
        assert_eq!(value["default"], "COM3");
        assert_eq!(value["available"], true);
    }

    #[test]
    fn test_json_probe_no_response() {
        let outcome = ProbeOutcome::no_response(Duration::from_millis(200));
        let value = parse(&JsonFormatter.probe("COM3", &outcome));
        assert_eq!(value["outcome"]["status"], "no_response");
        assert_eq!(value["summary"], "No response from device");
        assert!(value["version"].is_null());
    }

    #[test]
    fn test_json_probe_reports_version() {
        let outcome = ProbeOutcome::Responded {
            version: "2.5.6".to_string(),
        };
        let value = parse(&JsonFormatter.probe("COM3", &outcome));
        assert_eq!(value["version"], "2.5.6");
        assert_eq!(value["outcome"]["status"], "responded");
    }

    #[test]
    fn test_json_apply_error_carries_command_line() {
        let error = ApplyConfigError::ToolFailed {
            step: InvocationKind::Apply,
            command_line: "meshtastic --set-owner X --port COM3".to_string(),
            exit_code: 1,
            stdout: "Connected".to_string(),
            stderr: "Timed out waiting for connection".to_string(),
        };
        let value = parse(&JsonFormatter.apply_error(&error));
        assert_eq!(value["success"], false);
        assert_eq!(value["command_line"], "meshtastic --set-owner X --port COM3");
        assert_eq!(value["exit_code"], 1);
        assert_eq!(value["stderr"], "Timed out waiting for connection");
    }

    #[test]
    fn test_json_apply_report() {
        let report = ApplyReport {
            identity: DeviceIdentity::default(),
            port: PortRef::try_new("COM3").unwrap(),
            apply: oneshot_application::StepReport {
                command_line: "meshtastic ...".to_string(),
                output: CommandOutput::new(Some(0), "ok", "", Duration::from_millis(10)),
            },
            reapply: None,
            verify: None,
        };
        let value = parse(&JsonFormatter.apply(&report));
        assert_eq!(value["success"], true);
        assert_eq!(value["report"]["apply"]["output"]["stdout"], "ok");
        assert_eq!(value["report"]["identity"]["short_name"], "BCMI");
    }

    #[test]
    fn test_json_defaults_preview() {
        let value = parse(&JsonFormatter.defaults(
            &DeviceIdentity::default(),
            &DeviceSettings::default(),
            "meshtastic",
        ));
        let command = value["command_line"].as_str().unwrap();
        assert!(command.starts_with("meshtastic --set-owner OneShot Configurator"));
        assert!(command.contains("--port <PORT>"));
        assert_eq!(value["settings"]["region"], "TW");
    }

    #[test]
    fn test_formatter_for_json() {
        let text = formatter_for(OutputFormat::Json).ports(&PortSelection::empty());
        assert!(parse(&text).is_object());
    }
}
