use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("push request failed: {0}")]
    Transport(String),
    #[error("push service returned status {0}")]
    Status(u16),
    #[error("dispatch queue full, message dropped")]
    QueueFull,
    #[error("dispatch worker is gone")]
    WorkerGone,
}

/// Outbound push-notification channel.
///
/// Best effort: implementations bound their own timeouts and must never
/// block indefinitely. Errors are reported to the caller, which absorbs
/// them; a failed notification is not retried.
pub trait Notifier: Send {
    fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// What the alert stage did for one processed frame.
///
/// Exposed as a value (rather than only log lines) so callers and tests can
/// assert on suppressed detections and swallowed send failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertOutcome {
    /// No qualifying detection on this frame.
    Quiet,
    /// Detection inside the cooldown window; dropped.
    Suppressed,
    /// Notification dispatched.
    Sent,
    /// Dispatch attempted but the notifier failed; the cooldown still
    /// advanced.
    Failed,
}
