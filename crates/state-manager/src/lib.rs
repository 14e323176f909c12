//! Typed client for the external state manager service.
//!
//! The state manager serves Merkle proofs of execution state over block
//! intervals and the chain head block number. Domain errors arrive as
//! plain-text message prefixes inside the generic JSON-RPC error envelope;
//! [`error::classify_rpc_error`] is the single place those strings are known.

pub mod client;
pub mod error;
pub mod types;

pub use client::{StateManagerClient, StateManagerError};
pub use error::{classify_rpc_error, ClassifiedError, StateManagerErrorKind};
pub use types::MerkleProofResponse;
