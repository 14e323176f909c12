use std::fmt;

use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use crate::buf::Buf32;

/// An inclusive range of L2 block numbers.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary, Serialize, Deserialize,
)]
pub struct BlockInterval {
    start_block_number: u64,
    end_block_number: u64,
}

impl BlockInterval {
    pub fn new(start_block_number: u64, end_block_number: u64) -> Self {
        Self {
            start_block_number,
            end_block_number,
        }
    }

    pub fn start_block_number(&self) -> u64 {
        self.start_block_number
    }

    pub fn end_block_number(&self) -> u64 {
        self.end_block_number
    }

    /// Checks the `start <= end` invariant.
    ///
    /// Consumers that cross a network boundary validate this before issuing
    /// any request.
    pub fn is_well_formed(&self) -> bool {
        self.start_block_number <= self.end_block_number
    }
}

impl fmt::Display for BlockInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_block_number, self.end_block_number)
    }
}

impl fmt::Debug for BlockInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockInterval({self})")
    }
}

/// A candidate batch of compressed L2 data pending settlement on L1.
///
/// A collection of these is ordered by ascending start block and covers
/// contiguous, non-overlapping ranges; both are upheld by the producer and
/// assumed here.
#[derive(Clone, Eq, PartialEq, Hash, Arbitrary, Serialize, Deserialize)]
pub struct BlobRecord {
    start_block_number: u64,
    end_block_number: u64,
    expected_commitment: Buf32,
}

impl BlobRecord {
    pub fn new(start_block_number: u64, end_block_number: u64, expected_commitment: Buf32) -> Self {
        Self {
            start_block_number,
            end_block_number,
            expected_commitment,
        }
    }

    pub fn start_block_number(&self) -> u64 {
        self.start_block_number
    }

    pub fn end_block_number(&self) -> u64 {
        self.end_block_number
    }

    /// The commitment the settlement contract will record for this batch.
    pub fn expected_commitment(&self) -> Buf32 {
        self.expected_commitment
    }

    pub fn interval(&self) -> BlockInterval {
        BlockInterval::new(self.start_block_number, self.end_block_number)
    }
}

impl fmt::Debug for BlobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlobRecord({}, commitment={})",
            self.interval(),
            self.expected_commitment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_well_formed() {
        assert!(BlockInterval::new(10, 10).is_well_formed());
        assert!(BlockInterval::new(10, 20).is_well_formed());
        assert!(!BlockInterval::new(20, 10).is_well_formed());
    }

    #[test]
    fn test_blob_record_interval() {
        let record = BlobRecord::new(10, 19, Buf32::new([7; 32]));
        assert_eq!(record.interval(), BlockInterval::new(10, 19));
        assert_eq!(record.expected_commitment(), Buf32::new([7; 32]));
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(BlockInterval::new(50, 100).to_string(), "50..=100");
    }
}
