//! Progress notification port
//!
//! Defines the interface for reporting progress while the external tool runs.

use oneshot_domain::InvocationKind;
use std::time::Duration;

/// Callback for progress updates during a configuration workflow
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the tool is spawned
    fn on_step_start(&self, kind: InvocationKind, command_line: &str);

    /// Called when the run finished, timed out or failed to start
    fn on_step_complete(&self, kind: InvocationKind, success: bool);

    /// Called before the pause that precedes the URL-only write
    fn on_wait(&self, _delay: Duration) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_step_start(&self, _kind: InvocationKind, _command_line: &str) {}
    fn on_step_complete(&self, _kind: InvocationKind, _success: bool) {}
}
