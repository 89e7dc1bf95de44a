use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Single-slot cancellable timer.
///
/// At most one message is pending at a time: scheduling again aborts the
/// previous timer instead of stacking another one. When a timer fires its
/// message is sent on the channel given to [`Debouncer::new`].
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(tx: UnboundedSender<T>) -> Self {
        Self { tx, pending: None }
    }

    /// Send `msg` after `delay`, unless rescheduled or cancelled first
    pub fn schedule(&mut self, delay: Duration, msg: T) {
        self.cancel();

        // Deadline is fixed now, not when the task first gets polled
        let deadline = Instant::now() + delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // A closed channel just means nobody is listening any more
            let _ = tx.send(msg);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a timer is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
