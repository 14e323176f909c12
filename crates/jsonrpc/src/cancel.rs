//! Explicit cooperative cancellation for in-flight calls.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::Notify;

/// Cancellation signal shared between a caller and an in-flight call.
///
/// Cancelling aborts the current transport attempt and any pending backoff
/// wait; the call then resolves to [`RpcClientError::Cancelled`]. The signal
/// is explicit rather than relying on dropped futures, so fan-out code can
/// thread one token through every branch it owns.
///
/// [`RpcClientError::Cancelled`]: crate::client::RpcClientError::Cancelled
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        // Register interest before the final flag check so a concurrent
        // cancel() cannot slip between check and await.
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
