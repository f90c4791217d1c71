//! Progress reporting while the configuration tool runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use oneshot_application::ports::progress::ProgressNotifier;
use oneshot_domain::InvocationKind;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per step
///
/// The spinner draws on stderr, so stdout carries only the result.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn step_display_name(kind: InvocationKind) -> &'static str {
        match kind {
            InvocationKind::Apply => "Applying configuration",
            InvocationKind::ReapplyUrl => "Re-applying channel URL",
            InvocationKind::Probe => "Probing device",
        }
    }

    fn start_spinner(&self, prefix: &str, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix.to_string());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_step_start(&self, kind: InvocationKind, command_line: &str) {
        self.start_spinner(Self::step_display_name(kind), command_line.dimmed().to_string());
    }

    fn on_step_complete(&self, kind: InvocationKind, success: bool) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            let status = if success {
                format!("{} {}", "v".green(), "done".green())
            } else {
                format!("{} {}", "x".red(), "failed".red())
            };
            pb.set_prefix(Self::step_display_name(kind).to_string());
            pb.finish_with_message(status);
        }
    }

    fn on_wait(&self, delay: Duration) {
        self.start_spinner(
            "Waiting",
            format!("{} ms before re-applying channel URL", delay.as_millis()),
        );
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so piped stdout stays clean.
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_step_start(&self, kind: InvocationKind, command_line: &str) {
        eprintln!(
            "{} {}: {}",
            "->".cyan(),
            ProgressReporter::step_display_name(kind).bold(),
            command_line
        );
    }

    fn on_step_complete(&self, kind: InvocationKind, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), kind);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), kind);
        }
    }

    fn on_wait(&self, delay: Duration) {
        eprintln!("  waiting {} ms", delay.as_millis());
    }
}
