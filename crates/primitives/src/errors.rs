//! Errors during parsing/handling of primitives.

use thiserror::Error;

/// Failure to parse a primitive from its textual representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected 0x-prefixed hex string")]
    MissingHexPrefix,

    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
