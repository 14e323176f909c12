//! Read access to the settlement contract.

use async_trait::async_trait;
use causeway_primitives::Buf32;
use thiserror::Error;

/// Failure talking to the settlement-layer read client.
#[derive(Debug, Error)]
pub enum ChainQueryError {
    #[error("chain query failed: {0}")]
    Query(String),

    #[error(transparent)]
    Other(#[from] eyre::Error),
}

impl ChainQueryError {
    /// Creates a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }
}

/// View of the settlement contract's record of submitted batches.
///
/// Backed by a contract read client; implementations do their own connection
/// management and timeouts.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ChainQueryClient: Send + Sync {
    /// Checks whether `commitment` is already recorded on the settlement
    /// layer.
    async fn is_commitment_present(&self, commitment: Buf32) -> Result<bool, ChainQueryError>;
}
