use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Delays values until input has been quiet for a fixed window.
///
/// Each [`schedule`](Debouncer::schedule) cancels the pending value, if
/// any, and starts a new window. Only a value whose window elapses is
/// delivered on the receiver returned by [`Debouncer::new`].
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                window,
                pending: None,
                tx,
            },
            rx,
        )
    }

    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            sleep(window).await;
            // Receiver may already be gone when the view was abandoned
            let _ = tx.send(value);
        }));
    }

    /// Cancel the pending value. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                debug!("Debounce window reset");
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
