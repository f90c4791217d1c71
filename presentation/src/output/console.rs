//! Console output formatter for device configuration results

use crate::output::formatter::{OutputFormatter, preview_command};
use colored::Colorize;
use oneshot_application::{ApplyConfigError, ApplyReport, StepReport};
use oneshot_domain::{DeviceIdentity, DeviceSettings, PortSelection, ProbeOutcome};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn field(name: &str, value: impl std::fmt::Display) -> String {
        format!("  {:<28} {}\n", format!("{}:", name).dimmed(), value)
    }

    /// Tool output of one step, skipped when the tool printed nothing
    fn step_output(title: &str, step: &StepReport) -> String {
        let stdout = step.output.stdout.trim_end();
        if stdout.is_empty() {
            return String::new();
        }
        format!("{}{}\n", Self::section_header(title), stdout)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn ports(&self, selection: &PortSelection) -> String {
        let entries = selection.entries();
        if selection.is_empty() {
            return entries
                .iter()
                .map(|entry| format!("{}\n", entry.yellow()))
                .collect();
        }

        let mut output = format!("{}\n", "Available ports:".cyan().bold());
        for (i, entry) in entries.iter().enumerate() {
            if i == 0 {
                output.push_str(&format!("  {} {}\n", entry, "(default)".dimmed()));
            } else {
                output.push_str(&format!("  {}\n", entry));
            }
        }
        output
    }

    fn probe(&self, port: &str, outcome: &ProbeOutcome) -> String {
        let summary = outcome.summary();
        let status = match outcome {
            ProbeOutcome::Responded { .. } => summary.green().to_string(),
            ProbeOutcome::NoResponse { .. } => summary.yellow().to_string(),
            _ => summary.red().to_string(),
        };
        format!("{} {}\n", format!("{}:", port).bold(), status)
    }

    fn apply(&self, report: &ApplyReport) -> String {
        let mut output = format!("{}\n", report.summary().green().bold());

        output.push_str(&Self::step_output("Tool output", &report.apply));
        if let Some(ref reapply) = report.reapply {
            output.push_str(&Self::step_output("Channel URL re-applied", reapply));
        }
        if let Some(ref outcome) = report.verify {
            output.push_str(&format!(
                "\n{} {}\n",
                "Verify:".cyan().bold(),
                outcome.summary()
            ));
        }
        output
    }

    fn apply_error(&self, error: &ApplyConfigError) -> String {
        let mut output = format!("{}\n", error.to_string().trim_end().red());

        if let ApplyConfigError::ToolFailed { stdout, .. } = error {
            let stdout = stdout.trim_end();
            if !stdout.is_empty() {
                output.push_str(&Self::section_header("Tool output"));
                output.push_str(stdout);
                output.push('\n');
            }
        }
        output
    }

    fn defaults(
        &self,
        identity: &DeviceIdentity,
        settings: &DeviceSettings,
        program: &str,
    ) -> String {
        let mut output = Self::section_header("Identity");
        output.push_str(&Self::field("Long name", &identity.long_name));
        output.push_str(&Self::field("Short name", &identity.short_name));

        output.push_str(&Self::section_header("Settings"));
        output.push_str(&Self::field("lora.region", &settings.region));
        output.push_str(&Self::field("lora.txPower", settings.tx_power));
        output.push_str(&Self::field("mqtt.enabled", settings.mqtt_enabled));
        output.push_str(&Self::field(
            "mqtt.proxy_to_client_enabled",
            settings.mqtt_proxy_to_client_enabled,
        ));
        output.push_str(&Self::field(
            "mqtt.map_reporting_enabled",
            settings.mqtt_map_reporting_enabled,
        ));
        output.push_str(&Self::field("Channel URL", &settings.channel_url));

        if let Some(command) = preview_command(identity, settings, program) {
            output.push_str(&Self::section_header("Command"));
            output.push_str(&command);
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneshot_domain::{CommandOutput, InvocationKind, NO_PORTS_PLACEHOLDER, PortRef};
    use std::time::Duration;

    fn report(stdout: &str) -> ApplyReport {
        ApplyReport {
            identity: DeviceIdentity::try_new("Rooftop", "RT").unwrap(),
            port: PortRef::try_new("COM3").unwrap(),
            apply: StepReport {
                command_line: "meshtastic ...".to_string(),
                output: CommandOutput::new(Some(0), stdout, "", Duration::from_millis(900)),
            },
            reapply: None,
            verify: None,
        }
    }

    #[test]
    fn test_ports_placeholder() {
        let text = ConsoleFormatter.ports(&PortSelection::empty());
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains(NO_PORTS_PLACEHOLDER));
        assert!(!text.contains("Available ports:"));
    }

    #[test]
    fn test_ports_lists_every_port() {
        let selection = PortSelection::new(vec![
            PortRef::try_new("/dev/ttyUSB0").unwrap(),
            PortRef::try_new("/dev/ttyACM0").unwrap(),
        ]);
        let text = ConsoleFormatter.ports(&selection);
        assert!(text.contains("/dev/ttyUSB0"));
        assert!(text.contains("/dev/ttyACM0"));
        assert!(text.contains("(default)"));
    }

    #[test]
    fn test_apply_shows_summary_and_output() {
        let text = ConsoleFormatter.apply(&report("Connected to radio\nWriting modified preferences"));
        assert!(text.contains("Successfully set names and port: Rooftop, RT, COM3"));
        assert!(text.contains("Writing modified preferences"));
    }

    #[test]
    fn test_apply_skips_empty_output() {
        let text = ConsoleFormatter.apply(&report(""));
        assert!(!text.contains("Tool output"));
    }

    #[test]
    fn test_apply_with_verify() {
        let mut report = report("ok");
        report.verify = Some(ProbeOutcome::Responded {
            version: "2.5.6".to_string(),
        });
        let text = ConsoleFormatter.apply(&report);
        assert!(text.contains("Verify:"));
        assert!(text.contains("2.5.6"));
    }

    #[test]
    fn test_apply_error_shows_failed_command() {
        let error = ApplyConfigError::ToolFailed {
            step: InvocationKind::Apply,
            command_line: "meshtastic --port COM9".to_string(),
            exit_code: 1,
            stdout: "Connecting...".to_string(),
            stderr: "Serial port not found".to_string(),
        };
        let text = ConsoleFormatter.apply_error(&error);
        assert!(text.contains("Failed command: meshtastic --port COM9"));
        assert!(text.contains("Serial port not found"));
        assert!(text.contains("Connecting..."));
    }

    #[test]
    fn test_probe_no_response() {
        let outcome = ProbeOutcome::no_response(Duration::from_millis(200));
        let text = ConsoleFormatter.probe("COM3", &outcome);
        assert!(text.contains("COM3:"));
        assert!(text.contains("No response from device"));
    }

    #[test]
    fn test_defaults_lists_settings_and_command() {
        let text = ConsoleFormatter.defaults(
            &DeviceIdentity::default(),
            &DeviceSettings::default(),
            "meshtastic",
        );
        assert!(text.contains("OneShot Configurator"));
        assert!(text.contains("BCMI"));
        assert!(text.contains("TW"));
        assert!(text.contains("--set lora.txPower 20"));
    }
}
