//! Reconciliation of candidate batches against settlement-layer state.
//!
//! Decides which locally-produced blob records still need to be published,
//! by querying the settlement contract for commitments it already recorded.

pub mod filter;
pub mod query;

pub use filter::AlreadySubmittedBlobFilter;
#[cfg(any(test, feature = "test-utils"))]
pub use query::MockChainQueryClient;
pub use query::{ChainQueryClient, ChainQueryError};
