//! JSON-RPC 2.0 client core.
//!
//! Splits the concern three ways: envelope [`types`] parsed once at the
//! boundary, a [`Transport`] seam carrying a single request/response exchange,
//! and a [`RetryingClient`] owning every retry, deadline and cancellation
//! decision.

pub mod cancel;
pub mod client;
pub mod transport;
pub mod types;

pub use cancel::CancelToken;
pub use client::{RetryingClient, RpcClientError};
#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{
    parse_response, JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcSuccessResponse,
    ResponseParseError, RpcResult,
};
