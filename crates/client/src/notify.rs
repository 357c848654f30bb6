//! UI feedback boundary.
//!
//! The client shows toasts and a blocking loading indicator as side effects
//! of request classification. Rendering is the host application's business,
//! so those effects cross this trait; the SDK ships a silent default and a
//! log-backed implementation for headless use.

use tracing::{debug, info};

/// Sink for user-visible feedback emitted during a request.
///
/// `show_loading` and `hide_loading` are always invoked symmetrically: one
/// hide per show, on every exit path.
pub trait UiNotifier: Send + Sync {
    /// Show a transient notice to the user.
    fn toast(&self, message: &str);

    /// Show a blocking loading indicator with the given label.
    fn show_loading(&self, text: &str);

    /// Hide the loading indicator.
    fn hide_loading(&self);
}

/// Discards all feedback. Default when no notifier is injected.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl UiNotifier for NoopNotifier {
    fn toast(&self, _message: &str) {}
    fn show_loading(&self, _text: &str) {}
    fn hide_loading(&self) {}
}

/// Routes feedback to the log stream instead of a screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl UiNotifier for TracingNotifier {
    fn toast(&self, message: &str) {
        info!(target: "lostfound_client::ui", %message, "toast");
    }

    fn show_loading(&self, text: &str) {
        debug!(target: "lostfound_client::ui", %text, "loading shown");
    }

    fn hide_loading(&self) {
        debug!(target: "lostfound_client::ui", "loading hidden");
    }
}
