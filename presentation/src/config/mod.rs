//! Presentation-level configuration
//!
//! Resolves how results are shown from the command line and the
//! `[output]` section of the config file.

use oneshot_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Merge command-line flags over file settings.
    ///
    /// JSON output never shows progress, so stdout stays machine-readable.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        quiet: bool,
        file_format: Option<OutputFormat>,
        file_color: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color: file_color,
            show_progress: !quiet && format == OutputFormat::Text,
        }
    }

    /// Turn off colored output process-wide when disabled
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
