//! Typed operations over the state manager's JSON-RPC API.

use std::sync::atomic::{AtomicU64, Ordering};

use causeway_config::StateManagerConfig;
use causeway_jsonrpc::{
    HttpTransport, JsonRpcRequest, RetryingClient, RpcClientError, RpcResult, Transport,
};
use causeway_primitives::BlockInterval;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::{
    error::{classify_rpc_error, ClassifiedError},
    types::{MerkleProofResponse, GET_HEAD_BLOCK_NUMBER_METHOD, GET_STATE_MERKLE_PROOF_METHOD},
};

/// Failure of a state manager operation.
///
/// [`Remote`](Self::Remote) is an expected outcome callers branch on by kind;
/// the decode variants indicate a protocol mismatch this client cannot reason
/// about and are never retried.
#[derive(Debug, Error)]
pub enum StateManagerError {
    /// Caller passed an inverted interval; no request was issued.
    #[error("invalid block interval {0}")]
    InvalidInterval(BlockInterval),

    /// The service rejected the request with a recognized domain error.
    #[error("state manager rejected request: {0}")]
    Remote(ClassifiedError),

    /// Response payload does not match the expected schema.
    #[error("malformed response payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// Head block number result is not a 0x hex quantity.
    #[error("malformed block number {0:?}")]
    MalformedBlockNumber(String),

    /// The underlying call failed: transport exhaustion, timeout, or
    /// cancellation.
    #[error("rpc failure: {0}")]
    Rpc(#[from] RpcClientError),
}

impl StateManagerError {
    /// The classified remote error, if that is what this is.
    pub fn as_remote(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Remote(classified) => Some(classified),
            _ => None,
        }
    }
}

/// A well-formed response will not change on retry; only transport failures
/// are worth another attempt.
fn any_response_is_terminal(_outcome: &RpcResult) -> bool {
    true
}

/// Client for the state manager's rollup API.
///
/// Wraps a [`RetryingClient`] with the typed operations the coordinator
/// needs: Merkle proofs over block intervals and the head block number.
#[derive(Debug)]
pub struct StateManagerClient<T> {
    rpc: RetryingClient<T>,
    version: String,
    next_id: AtomicU64,
}

impl StateManagerClient<HttpTransport> {
    /// Connects over HTTP to the configured endpoint.
    pub fn connect(config: StateManagerConfig) -> Self {
        let transport = HttpTransport::new(config.endpoint.clone());
        Self::new(transport, config)
    }
}

impl<T: Transport> StateManagerClient<T> {
    pub fn new(transport: T, config: StateManagerConfig) -> Self {
        Self {
            rpc: RetryingClient::new(transport, config.request_retry),
            version: config.version,
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Fetches the state Merkle proof covering `interval`.
    ///
    /// The interval must be well-formed; inverted intervals are rejected
    /// locally without issuing a request.
    pub async fn get_merkle_proof(
        &self,
        interval: BlockInterval,
    ) -> Result<MerkleProofResponse, StateManagerError> {
        if !interval.is_well_formed() {
            return Err(StateManagerError::InvalidInterval(interval));
        }

        let params = vec![json!({
            "startBlockNumber": interval.start_block_number(),
            "endBlockNumber": interval.end_block_number(),
            "zkStateManagerVersion": self.version,
        })];
        let request = JsonRpcRequest::new(self.next_id(), GET_STATE_MERKLE_PROOF_METHOD, params);

        debug!(%interval, "requesting state merkle proof");
        match self.rpc.send_with(request, any_response_is_terminal).await? {
            Ok(success) => {
                serde_json::from_value(success.result).map_err(StateManagerError::Decode)
            }
            Err(response) => Err(StateManagerError::Remote(classify_rpc_error(
                &response.error,
            ))),
        }
    }

    /// Fetches the service's head block number.
    pub async fn get_head_block_number(&self) -> Result<u64, StateManagerError> {
        let request =
            JsonRpcRequest::new(self.next_id(), GET_HEAD_BLOCK_NUMBER_METHOD, Vec::new());

        match self.rpc.send_with(request, any_response_is_terminal).await? {
            Ok(success) => {
                let raw: String =
                    serde_json::from_value(success.result).map_err(StateManagerError::Decode)?;
                parse_hex_quantity(&raw)
                    .ok_or_else(|| StateManagerError::MalformedBlockNumber(raw))
            }
            Err(response) => Err(StateManagerError::Remote(classify_rpc_error(
                &response.error,
            ))),
        }
    }
}

fn parse_hex_quantity(s: &str) -> Option<u64> {
    u64::from_str_radix(s.strip_prefix("0x")?, 16).ok()
}

#[cfg(test)]
mod tests {
    use causeway_config::RetryConfig;
    use causeway_jsonrpc::{parse_response, MockTransport};
    use causeway_primitives::Buf32;
    use serde_json::Value;

    use super::*;
    use crate::error::StateManagerErrorKind;

    const PARENT_ROOT: &str =
        "0x112233445566778899aabbccddeeff00112233445566778899aabbccddeeff00";
    const END_ROOT: &str = "0x00ffeeddccbbaa99887766554433221100ffeeddccbbaa998877665544332211";

    fn config() -> StateManagerConfig {
        StateManagerConfig {
            endpoint: "http://127.0.0.1:8545".to_string(),
            version: "0.0.1-dev-3e607237".to_string(),
            request_retry: RetryConfig {
                max_retries: 1,
                timeout_ms: 2_000,
                backoff_delay_ms: 10,
            },
        }
    }

    fn client(transport: MockTransport) -> StateManagerClient<MockTransport> {
        StateManagerClient::new(transport, config())
    }

    fn proof_response_body() -> Vec<u8> {
        format!(
            r#"{{
                "jsonrpc": "2.0",
                "id": "1",
                "result": {{
                    "zkStateManagerVersion": "0.0.1-dev-3e607237",
                    "zkStateMerkleProof": [
                        {{"leafIndex": 22, "proofRelatedNodes": ["0x0001"]}},
                        {{"leafIndex": 38, "proofRelatedNodes": ["0x0002", "0x0003"]}}
                    ],
                    "zkParentStateRootHash": "{PARENT_ROOT}",
                    "zkEndStateRootHash": "{END_ROOT}"
                }}
            }}"#
        )
        .into_bytes()
    }

    fn expects_proof_request(request: &JsonRpcRequest, start: u64, end: u64) -> bool {
        let param = &request.params[0];
        request.method == GET_STATE_MERKLE_PROOF_METHOD
            && param["startBlockNumber"] == Value::from(start)
            && param["endBlockNumber"] == Value::from(end)
            && param["zkStateManagerVersion"] == Value::from("0.0.1-dev-3e607237")
    }

    #[tokio::test]
    async fn test_get_merkle_proof_success() {
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .withf(|request| expects_proof_request(request, 50, 100))
            .returning(|_| Ok(parse_response(&proof_response_body()).unwrap()));

        let proof = client(transport)
            .get_merkle_proof(BlockInterval::new(50, 100))
            .await
            .unwrap();

        assert_eq!(proof.version, "0.0.1-dev-3e607237");
        assert_eq!(proof.proof.len(), 2);
        assert_eq!(proof.parent_state_root_hash, Buf32::from_hex(PARENT_ROOT).unwrap());
        assert_eq!(proof.end_state_root_hash, Buf32::from_hex(END_ROOT).unwrap());
    }

    #[tokio::test]
    async fn test_get_merkle_proof_block_missing() {
        let body = br#"{
            "jsonrpc": "2.0",
            "id": "1",
            "error": {"code": -32600, "message": "BLOCK_MISSING_IN_CHAIN - block 1 is missing"}
        }"#;
        let mut transport = MockTransport::new();
        // A well-formed error response is terminal: exactly one attempt.
        transport
            .expect_send_request()
            .times(1)
            .returning(|_| Ok(parse_response(body).unwrap()));

        let err = client(transport)
            .get_merkle_proof(BlockInterval::new(50, 100))
            .await
            .unwrap_err();

        let classified = err.as_remote().expect("should be a remote error");
        assert_eq!(
            classified.kind(),
            StateManagerErrorKind::BlockMissingInChain
        );
        assert_eq!(
            classified.detail(),
            "BLOCK_MISSING_IN_CHAIN - block 1 is missing"
        );
    }

    #[tokio::test]
    async fn test_get_merkle_proof_unsupported_version() {
        let body = br#"{
            "jsonrpc": "2.0",
            "id": "1",
            "error": {
                "code": -32602,
                "message": "UNSUPPORTED_VERSION",
                "data": {
                    "requestedVersion": "0.0.1-dev-3e607217",
                    "supportedVersion": "0.0.1-dev-3e607237"
                }
            }
        }"#;
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .returning(|_| Ok(parse_response(body).unwrap()));

        let err = client(transport)
            .get_merkle_proof(BlockInterval::new(50, 100))
            .await
            .unwrap_err();

        let classified = err.as_remote().expect("should be a remote error");
        assert_eq!(classified.kind(), StateManagerErrorKind::UnsupportedVersion);
        assert!(classified.detail().contains("0.0.1-dev-3e607217"));
        assert!(classified.detail().contains("0.0.1-dev-3e607237"));
    }

    #[tokio::test]
    async fn test_get_merkle_proof_unknown_error() {
        let body = br#"{
            "jsonrpc": "2.0",
            "id": "1",
            "error": {
                "code": -999,
                "message": "BRA_BRA_BRA_SOME_UNKNOWN_ERROR",
                "data": {"xyz": "1234", "abc": 100}
            }
        }"#;
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .returning(|_| Ok(parse_response(body).unwrap()));

        let err = client(transport)
            .get_merkle_proof(BlockInterval::new(50, 100))
            .await
            .unwrap_err();

        let classified = err.as_remote().expect("should be a remote error");
        assert_eq!(classified.kind(), StateManagerErrorKind::Unknown);
        assert!(classified
            .detail()
            .contains("BRA_BRA_BRA_SOME_UNKNOWN_ERROR"));
        assert!(classified.detail().contains("1234"));
    }

    #[tokio::test]
    async fn test_get_merkle_proof_rejects_inverted_interval_locally() {
        let mut transport = MockTransport::new();
        // Local validation failure: no request goes out.
        transport.expect_send_request().times(0);

        let err = client(transport)
            .get_merkle_proof(BlockInterval::new(100, 50))
            .await
            .unwrap_err();

        assert!(matches!(err, StateManagerError::InvalidInterval(_)));
    }

    #[tokio::test]
    async fn test_get_merkle_proof_decode_failure_is_fatal() {
        let body = br#"{"jsonrpc": "2.0", "id": "1", "result": {"unexpected": "shape"}}"#;
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .returning(|_| Ok(parse_response(body).unwrap()));

        let err = client(transport)
            .get_merkle_proof(BlockInterval::new(50, 100))
            .await
            .unwrap_err();

        assert!(matches!(err, StateManagerError::Decode(_)));
    }

    #[tokio::test]
    async fn test_get_head_block_number_decodes_hex() {
        let body = br#"{"jsonrpc": "2.0", "id": 1, "result": "0xf1"}"#;
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .withf(|request| {
                request.method == GET_HEAD_BLOCK_NUMBER_METHOD && request.params.is_empty()
            })
            .returning(|_| Ok(parse_response(body).unwrap()));

        let head = client(transport).get_head_block_number().await.unwrap();
        assert_eq!(head, 241);
    }

    #[tokio::test]
    async fn test_get_head_block_number_error_response() {
        let body = br#"{
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32603, "message": "Internal error"}
        }"#;
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .returning(|_| Ok(parse_response(body).unwrap()));

        let err = client(transport).get_head_block_number().await.unwrap_err();

        let classified = err.as_remote().expect("should be a remote error");
        assert_eq!(classified.kind(), StateManagerErrorKind::Unknown);
        assert!(classified.detail().contains("Internal error"));
    }

    #[tokio::test]
    async fn test_get_head_block_number_rejects_bad_quantity() {
        let body = br#"{"jsonrpc": "2.0", "id": 1, "result": "f1"}"#;
        let mut transport = MockTransport::new();
        transport
            .expect_send_request()
            .times(1)
            .returning(|_| Ok(parse_response(body).unwrap()));

        let err = client(transport).get_head_block_number().await.unwrap_err();
        assert!(matches!(err, StateManagerError::MalformedBlockNumber(_)));
    }
}
