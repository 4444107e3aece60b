//! User-facing notification boundary.

/// Shows a short modal-style message to the user.
pub trait Alerter: Send + Sync {
    fn show_alert(&self, title: &str, message: &str);
}

/// Alerter for headless use: the alert only goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlerter;

impl Alerter for LogAlerter {
    fn show_alert(&self, title: &str, message: &str) {
        tracing::warn!(title, "{}", message);
    }
}
