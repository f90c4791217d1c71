//! Presentation layer for meshtastic-oneshot
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{ApplyArgs, Cli, Command, OutputFormat, PortsArgs, ProbeArgs};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::{JsonFormatter, OutputFormatter, formatter_for};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
