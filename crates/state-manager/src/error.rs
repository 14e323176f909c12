//! Classification of state manager error payloads.

use std::fmt;

use causeway_jsonrpc::JsonRpcError;
use thiserror::Error;

/// Marker the service embeds when a requested block is not in its chain view.
const BLOCK_MISSING_MARKER: &str = "BLOCK_MISSING_IN_CHAIN";

/// Prefix the service uses to reject an unsupported protocol version.
const UNSUPPORTED_VERSION_MARKER: &str = "UNSUPPORTED_VERSION";

/// Closed set of domain error categories the state manager reports.
///
/// Extend only by explicit design decision: [`classify_rpc_error`] is the one
/// place server error strings are interpreted, and an unrecognized message
/// lands in [`Unknown`](Self::Unknown) rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateManagerErrorKind {
    /// A block in the requested interval is missing from the service's chain.
    BlockMissingInChain,
    /// The service does not speak the protocol version we requested.
    UnsupportedVersion,
    /// Anything the taxonomy does not recognize.
    Unknown,
}

impl fmt::Display for StateManagerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BlockMissingInChain => BLOCK_MISSING_MARKER,
            Self::UnsupportedVersion => UNSUPPORTED_VERSION_MARKER,
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A server-reported error after classification.
///
/// The detail keeps the server message verbatim, with the structured `data`
/// member appended when present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ClassifiedError {
    kind: StateManagerErrorKind,
    detail: String,
}

impl ClassifiedError {
    pub fn new(kind: StateManagerErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> StateManagerErrorKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Maps a raw JSON-RPC error payload onto the closed kind set.
///
/// First match wins: a message containing the block-missing marker, then a
/// message starting with the unsupported-version prefix, then unknown.
pub fn classify_rpc_error(error: &JsonRpcError) -> ClassifiedError {
    if error.message.contains(BLOCK_MISSING_MARKER) {
        return ClassifiedError::new(
            StateManagerErrorKind::BlockMissingInChain,
            error.message.clone(),
        );
    }

    let kind = if error.message.starts_with(UNSUPPORTED_VERSION_MARKER) {
        StateManagerErrorKind::UnsupportedVersion
    } else {
        StateManagerErrorKind::Unknown
    };
    let detail = match &error.data {
        Some(data) => format!("{}: {data}", error.message),
        None => error.message.clone(),
    };
    ClassifiedError::new(kind, detail)
}
