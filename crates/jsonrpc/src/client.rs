//! Retrying JSON-RPC client.

use std::time::Duration;

use causeway_config::RetryConfig;
use thiserror::Error;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, warn};

use crate::{
    cancel::CancelToken,
    transport::{Transport, TransportError},
    types::{JsonRpcRequest, RpcResult},
};

/// Failure of a whole logical call, distinct from a JSON-RPC error response
/// (which is a normal [`RpcResult`] outcome handed back to the caller).
#[derive(Debug, Error)]
pub enum RpcClientError {
    /// Every attempt failed at the transport level; carries the last failure.
    #[error("transport failed after {attempts} attempt(s): {last}")]
    TransportExhausted { attempts: u32, last: TransportError },

    /// The deadline elapsed before any outcome was observed.
    #[error("no outcome observed within {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the call.
    #[error("call cancelled")]
    Cancelled,
}

/// What a call has most recently produced.
enum LastObserved {
    Outcome(RpcResult),
    Failure(TransportError),
}

/// JSON-RPC client wrapping a [`Transport`] with attempt counting, flat
/// backoff and an overall deadline.
///
/// One logical call performs at most `max_retries + 1` strictly sequential
/// attempts, all bounded by a deadline fixed at call start. Whether an
/// outcome ends the loop is decided by a caller-supplied classifier; by
/// default only the success branch does. Exhausting the retry budget is not
/// itself an error: the last observed outcome is returned and callers must
/// inspect it.
#[derive(Debug, Clone)]
pub struct RetryingClient<T> {
    transport: T,
    retry: RetryConfig,
}

impl<T: Transport> RetryingClient<T> {
    pub fn new(transport: T, retry: RetryConfig) -> Self {
        Self { transport, retry }
    }

    /// Sends with the default classifier: only a success outcome is terminal.
    pub async fn send(&self, request: JsonRpcRequest) -> Result<RpcResult, RpcClientError> {
        self.send_with(request, |outcome: &RpcResult| outcome.is_ok())
            .await
    }

    /// Sends with a caller-supplied terminal-outcome classifier.
    ///
    /// This separates "the exchange mechanically completed" from "the response
    /// content is acceptable": callers can stop retrying on specific error
    /// codes while retrying others.
    pub async fn send_with<F>(
        &self,
        request: JsonRpcRequest,
        is_terminal: F,
    ) -> Result<RpcResult, RpcClientError>
    where
        F: Fn(&RpcResult) -> bool + Send + Sync,
    {
        let cancel = CancelToken::new();
        self.send_with_cancel(request, is_terminal, &cancel).await
    }

    /// Sends with an explicit cancellation signal.
    ///
    /// Cancellation aborts an in-flight attempt or a pending backoff wait
    /// immediately and resolves the call to [`RpcClientError::Cancelled`].
    pub async fn send_with_cancel<F>(
        &self,
        request: JsonRpcRequest,
        is_terminal: F,
        cancel: &CancelToken,
    ) -> Result<RpcResult, RpcClientError>
    where
        F: Fn(&RpcResult) -> bool + Send + Sync,
    {
        // The deadline covers the whole call: every attempt and every backoff
        // wait. It is not reset per attempt.
        let deadline = Instant::now() + self.retry.timeout();
        let mut last = None;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let attempt = tokio::select! {
                _ = cancel.cancelled() => return Err(RpcClientError::Cancelled),
                res = timeout_at(deadline, self.transport.send_request(&request)) => res,
            };

            match attempt {
                // Deadline fired mid-attempt.
                Err(_) => return self.resolve(last, attempts),
                Ok(Ok(outcome)) => {
                    if is_terminal(&outcome) {
                        return Ok(outcome);
                    }
                    debug!(
                        method = %request.method,
                        attempt = attempts,
                        "non-terminal outcome, retrying"
                    );
                    last = Some(LastObserved::Outcome(outcome));
                }
                Ok(Err(err)) => {
                    warn!(
                        method = %request.method,
                        attempt = attempts,
                        %err,
                        "transport attempt failed"
                    );
                    last = Some(LastObserved::Failure(err));
                }
            }

            if attempts > self.retry.max_retries || Instant::now() >= deadline {
                return self.resolve(last, attempts);
            }

            let backoff = tokio::select! {
                _ = cancel.cancelled() => return Err(RpcClientError::Cancelled),
                res = timeout_at(deadline, sleep(self.retry.backoff_delay())) => res,
            };
            // Deadline fired during the backoff wait.
            if backoff.is_err() {
                return self.resolve(last, attempts);
            }
        }
    }

    fn resolve(
        &self,
        last: Option<LastObserved>,
        attempts: u32,
    ) -> Result<RpcResult, RpcClientError> {
        match last {
            Some(LastObserved::Outcome(outcome)) => Ok(outcome),
            Some(LastObserved::Failure(err)) => Err(RpcClientError::TransportExhausted {
                attempts,
                last: err,
            }),
            None => Err(RpcClientError::Timeout(self.retry.timeout())),
        }
    }
}
