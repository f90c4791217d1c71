//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use oneshot_domain::ShortName;
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for oneshot_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => oneshot_domain::OutputFormat::Text,
            OutputFormat::Json => oneshot_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for meshtastic-oneshot
#[derive(Parser, Debug)]
#[command(name = "meshtastic-oneshot")]
#[command(author, version, about = "Configure a Meshtastic device in one shot")]
#[command(long_about = r#"
Writes owner names, region, MQTT settings, transmit power and the channel URL
to a Meshtastic device over a serial port with a single call to the
`meshtastic` command-line tool.

Configuration files are loaded from (in priority order):
1. ONESHOT_* environment variables (e.g. ONESHOT_TIMEOUTS__PROBE_MILLIS=500)
2. --config <path>     Explicit config file
3. ./oneshot.toml      Project-level config
4. ~/.config/meshtastic-oneshot/config.toml   Global config

Example:
  meshtastic-oneshot ports
  meshtastic-oneshot probe --port /dev/ttyUSB0
  meshtastic-oneshot apply --port COM3 --long-name "Rooftop Relay" --short-name RR
"#)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Omitted only together with --show-config
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Append a JSONL record of every tool run to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List serial ports a device could be attached to
    Ports(PortsArgs),

    /// Ask the device on a port for its firmware version
    Probe(ProbeArgs),

    /// Write names and settings to the device
    Apply(ApplyArgs),

    /// Show the default identity and settings
    Defaults,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PortsArgs {
    /// Only list USB-attached ports
    #[arg(long)]
    pub usb_only: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ProbeArgs {
    /// Serial port (defaults to the first one found)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<String>,

    /// Probe timeout in milliseconds (at least 1)
    #[arg(long, value_name = "MILLIS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ApplyArgs {
    /// Serial port (defaults to the first one found)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<String>,

    /// Long name; passed to the tool exactly as given
    #[arg(short, long, value_name = "NAME")]
    pub long_name: Option<String>,

    /// Short name: up to 4 ASCII letters
    #[arg(short, long, value_name = "NAME", value_parser = parse_short_name)]
    pub short_name: Option<ShortName>,

    /// Write the channel URL a second time after the main apply
    #[arg(long)]
    pub reapply_url: bool,

    /// Probe the device after applying
    #[arg(long)]
    pub verify: bool,

    /// Apply timeout in seconds (0 waits indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

fn parse_short_name(value: &str) -> Result<ShortName, String> {
    ShortName::try_new(value).map_err(|e| e.to_string())
}
