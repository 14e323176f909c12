//! High-water-mark filtering of already-submitted blobs.

use causeway_primitives::BlobRecord;
use futures::future::try_join_all;
use tracing::debug;

use crate::query::{ChainQueryClient, ChainQueryError};

/// Prunes blob records whose data is already covered by an earlier
/// settlement submission.
///
/// The settlement contract records only the final blob of a multi-blob
/// transaction: after submitting b1\[10..19\], b2\[20..30\], b3\[31..40\]
/// together, only b3's commitment is present, with the earlier blobs implied
/// covered. A single high-water mark over the present records is therefore
/// the filter condition rather than per-record presence, and it also
/// tolerates presence results arriving in any order.
#[derive(Debug)]
pub struct AlreadySubmittedBlobFilter<C> {
    chain: C,
}

impl<C: ChainQueryClient> AlreadySubmittedBlobFilter<C> {
    pub fn new(chain: C) -> Self {
        Self { chain }
    }

    /// Returns the records still in need of submission, preserving input
    /// order.
    ///
    /// Issues one concurrent presence query per record and fails as a whole
    /// if any query fails: filtering from incomplete chain information could
    /// resubmit data that is already settled.
    pub async fn filter(
        &self,
        records: Vec<BlobRecord>,
    ) -> Result<Vec<BlobRecord>, ChainQueryError> {
        let queries = records.iter().map(|record| async {
            let present = self
                .chain
                .is_commitment_present(record.expected_commitment())
                .await?;
            Ok::<_, ChainQueryError>(present.then_some(record.end_block_number()))
        });
        let end_blocks_found = try_join_all(queries).await?;

        let Some(high_water_mark) = end_blocks_found.into_iter().flatten().max() else {
            return Ok(records);
        };
        debug!(%high_water_mark, "found already-submitted blobs on settlement layer");

        Ok(records
            .into_iter()
            .filter(|record| record.start_block_number() > high_water_mark)
            .collect())
    }
}
