use std::thread::JoinHandle;

use crate::alert::domain::notifier::{Notifier, NotifyError};

const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// Decorator that dispatches notifications on a worker thread.
///
/// `notify` enqueues and returns immediately, so the network call never
/// stalls the frame loop. The caller still updates its cooldown state at
/// enqueue time, which preserves the attempt-time semantics: a send that
/// later fails on the worker is logged and dropped, not retried.
///
/// The queue is bounded; when it is full the message is dropped with
/// `NotifyError::QueueFull` rather than deferred.
pub struct ThreadedNotifier {
    tx: Option<crossbeam_channel::Sender<String>>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadedNotifier {
    pub fn new(inner: Box<dyn Notifier>) -> Self {
        Self::with_capacity(inner, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(inner: Box<dyn Notifier>, capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded::<String>(capacity.max(1));
        let worker = std::thread::spawn(move || {
            for message in rx {
                if let Err(e) = inner.notify(&message) {
                    log::warn!("push alert failed: {e}");
                }
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }
}

impl Notifier for ThreadedNotifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(NotifyError::WorkerGone);
        };
        match tx.try_send(message.to_string()) {
            Ok(()) => Ok(()),
            Err(crossbeam_channel::TrySendError::Full(_)) => Err(NotifyError::QueueFull),
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => Err(NotifyError::WorkerGone),
        }
    }
}

impl Drop for ThreadedNotifier {
    fn drop(&mut self) {
        // Close the channel first so the worker drains and exits.
        self.tx.take();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
