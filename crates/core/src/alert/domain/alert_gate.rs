use std::time::{Duration, Instant};

/// Decides, once per processed frame, whether a detection should trigger an
/// outbound notification.
///
/// The gate enforces a minimum interval (`cooldown`) between two dispatch
/// *attempts*: when it fires, `last_alert` advances immediately, before the
/// send result is known, so a failed send is not retried until the next
/// qualifying detection after the cooldown. Suppressed detections are
/// dropped, never deferred or batched.
///
/// Single-writer: one gate instance per pipeline, mutated only by the frame
/// loop. Time is an explicit input so the gate is testable without sleeping.
#[derive(Debug)]
pub struct AlertGate {
    cooldown: Duration,
    last_alert: Option<Instant>,
}

impl AlertGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_alert: None,
        }
    }

    /// Returns `true` iff a notification should be dispatched for this frame.
    ///
    /// Fires when `detected` is true and strictly more than `cooldown` has
    /// elapsed since the last attempt (or no attempt has been made yet). At
    /// exactly `cooldown` elapsed it does not fire. A zero cooldown fires on
    /// every detected frame.
    pub fn check(&mut self, detected: bool, now: Instant) -> bool {
        if !detected {
            return false;
        }
        let ready = match self.last_alert {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.cooldown,
        };
        if ready {
            self.last_alert = Some(now);
        }
        ready
    }

    /// Time of the last dispatch attempt, `None` if none has occurred.
    pub fn last_alert(&self) -> Option<Instant> {
        self.last_alert
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}
