//! Wire types for the state manager's rollup API.

use causeway_primitives::Buf32;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Method fetching the state Merkle proof for a block interval.
///
/// Method names and parameter shapes are protocol constants agreed with the
/// service; changing them breaks wire compatibility.
pub const GET_STATE_MERKLE_PROOF_METHOD: &str = "rollup_getZkEVMStateMerkleProofV0";

/// Method fetching the head block number, returned as a hex quantity string.
pub const GET_HEAD_BLOCK_NUMBER_METHOD: &str = "rollup_getZkEVMBlockNumber";

/// Merkle proof material for a block interval.
///
/// The proof elements are opaque to the coordinator; they are carried through
/// to settlement transaction encoding untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProofResponse {
    #[serde(rename = "zkStateManagerVersion")]
    pub version: String,

    #[serde(rename = "zkStateMerkleProof")]
    pub proof: Vec<Value>,

    #[serde(rename = "zkParentStateRootHash")]
    pub parent_state_root_hash: Buf32,

    #[serde(rename = "zkEndStateRootHash")]
    pub end_state_root_hash: Buf32,
}
