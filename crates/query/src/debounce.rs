//! Input debouncing with explicit timer cancellation.
//!
//! Each submitted value starts a timer for the quiet period; a newer
//! submission cancels the previous token before scheduling its own, so
//! superseded values never surface. Only the value whose timer runs to
//! completion is emitted.

use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// Coalesces a stream of rapidly changing values down to the ones that
/// stayed unchanged for a quiet period.
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Mutex<Option<CancellationToken>>,
    tx: mpsc::UnboundedSender<T>,
    rx: Mutex<mpsc::UnboundedReceiver<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            quiet_period,
            pending: Mutex::new(None),
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Submit a new value, resetting the quiet-period timer.
    ///
    /// Any previously pending value is cancelled and will never be
    /// emitted.
    pub async fn submit(&self, value: T) {
        let token = CancellationToken::new();
        if let Some(previous) = self.pending.lock().await.replace(token.clone()) {
            previous.cancel();
        }

        let tx = self.tx.clone();
        let quiet_period = self.quiet_period;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet_period) => {
                    // Receiver dropped means the session is gone; fine.
                    let _ = tx.send(value);
                }
            }
        });
    }

    /// Cancel any pending value without submitting a new one.
    pub async fn cancel_pending(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.cancel();
        }
    }

    /// Wait for the next value that survives its quiet period.
    pub async fn settled(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }
}
