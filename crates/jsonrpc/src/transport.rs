//! Transport seam between the retrying client and the network.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{parse_response, JsonRpcRequest, ResponseParseError, RpcResult};

/// Failures observed before a JSON-RPC outcome exists.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection or HTTP-level failure.
    #[error("http transport failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The peer answered with something that is not a JSON-RPC response.
    #[error("malformed response: {0}")]
    Malformed(#[from] ResponseParseError),
}

/// One-shot request/response channel for JSON-RPC exchanges.
///
/// Implementations carry no retry or timeout logic of their own; all of that
/// lives in [`RetryingClient`](crate::client::RetryingClient).
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a single request and returns the parsed outcome.
    async fn send_request(&self, request: &JsonRpcRequest) -> Result<RpcResult, TransportError>;
}

/// HTTP POST binding, `Content-Type: application/json`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Uses a preconfigured [`reqwest::Client`] (connection pooling, TLS,
    /// proxy settings).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_request(&self, request: &JsonRpcRequest) -> Result<RpcResult, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok(parse_response(&body)?)
    }
}
