//! Alerts shown on the terminal.

use dropfetch_core::alert::Alerter;

/// Prints alerts to stderr, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalAlerter;

impl Alerter for TerminalAlerter {
    fn show_alert(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
        tracing::warn!(title, "alert shown: {}", message);
    }
}
