//! Failure notification.

use tracing::error;

use crate::Error;

/// Surfaces fetch failures to the user.
///
/// Collections call this once per failed fetch; they never build the
/// user-facing message themselves.
pub trait Notifier: Send + Sync {
    /// A fetch for the collection labelled `label` failed.
    fn fetch_failed(&self, label: &str, error: &Error);
}

/// Notifier that records failures as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn fetch_failed(&self, label: &str, error: &Error) {
        error!(collection = label, error = %error, "Failed to load page");
    }
}
