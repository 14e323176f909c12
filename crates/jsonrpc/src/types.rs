//! JSON-RPC 2.0 envelope types.
//!
//! Responses are parsed into the two-variant [`RpcResult`] exactly once, at
//! the transport boundary; nothing downstream inspects untyped JSON nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Protocol version tag carried by every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// The `error` member of an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Success branch of a completed exchange.
///
/// The response id is kept as raw JSON; servers have been observed answering
/// with both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcSuccessResponse {
    #[serde(default)]
    pub id: Value,
    pub result: Value,
}

/// Error branch of a completed exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    #[serde(default)]
    pub id: Value,
    pub error: JsonRpcError,
}

/// Either branch of a completed JSON-RPC exchange.
///
/// Both branches are normal outcomes: the retrying client hands back whichever
/// it last observed, and callers must inspect it.
pub type RpcResult = Result<JsonRpcSuccessResponse, JsonRpcErrorResponse>;

/// A response body that is not a JSON-RPC response.
#[derive(Debug, Error)]
pub enum ResponseParseError {
    #[error("response body is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a json object")]
    NotAnObject,

    #[error("response carries neither result nor error")]
    MissingOutcome,
}

/// Parses a raw response body into the typed result.
///
/// A body with an `error` member takes the error branch; otherwise `result`
/// is required (it may be JSON null, which is a legal success payload).
pub fn parse_response(body: &[u8]) -> Result<RpcResult, ResponseParseError> {
    let raw: Value = serde_json::from_slice(body)?;
    let Some(obj) = raw.as_object() else {
        return Err(ResponseParseError::NotAnObject);
    };
    let id = obj.get("id").cloned().unwrap_or(Value::Null);

    if let Some(error) = obj.get("error") {
        let error: JsonRpcError = serde_json::from_value(error.clone())?;
        return Ok(Err(JsonRpcErrorResponse { id, error }));
    }

    match obj.get("result") {
        Some(result) => Ok(Ok(JsonRpcSuccessResponse {
            id,
            result: result.clone(),
        })),
        None => Err(ResponseParseError::MissingOutcome),
    }
}
