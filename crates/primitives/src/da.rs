use alloy_primitives::Bytes;
use scroll_alloy_consensus::TxL1Message;
use scroll_codec::Chunk;

/// A batch lifecycle event decoded from the L1 data availability layer.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum DaEntry {
    /// A committed batch, with its decoded chunks and L1 messages.
    CommitBatch(CommitBatchDa),
    /// A reverted batch.
    RevertBatch(RevertBatchDa),
    /// A finalized batch.
    FinalizeBatch(FinalizeBatchDa),
}

impl DaEntry {
    /// Returns the L1 block number of the log the entry originates from.
    pub const fn l1_block_number(&self) -> u64 {
        match self {
            Self::CommitBatch(da) => da.l1_block_number,
            Self::RevertBatch(da) => da.l1_block_number,
            Self::FinalizeBatch(da) => da.l1_block_number,
        }
    }

    /// Returns the index of the batch the entry refers to.
    pub const fn batch_index(&self) -> u64 {
        match self {
            Self::CommitBatch(da) => da.batch_index,
            Self::RevertBatch(da) => da.batch_index,
            Self::FinalizeBatch(da) => da.batch_index,
        }
    }

    /// Returns the name of the entry kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CommitBatch(_) => "commit",
            Self::RevertBatch(_) => "revert",
            Self::FinalizeBatch(_) => "finalize",
        }
    }
}

/// The data of a committed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitBatchDa {
    /// The codec version of the batch.
    pub version: u8,
    /// The index of the batch.
    pub batch_index: u64,
    /// The total count of L1 messages popped before this batch.
    pub parent_total_l1_message_popped: u64,
    /// The raw skipped L1 messages bitmap of the batch.
    pub skipped_l1_message_bitmap: Bytes,
    /// The chunks of the batch.
    pub chunks: Vec<Chunk>,
    /// The L1 messages included by the batch, in increasing queue index order.
    pub l1_messages: Vec<TxL1Message>,
    /// The L1 block number of the commit log.
    pub l1_block_number: u64,
}

impl CommitBatchDa {
    /// Returns the commit of the genesis batch, which carries no data.
    pub fn genesis(l1_block_number: u64) -> Self {
        Self {
            version: 0,
            batch_index: 0,
            parent_total_l1_message_popped: 0,
            skipped_l1_message_bitmap: Bytes::new(),
            chunks: Vec::new(),
            l1_messages: Vec::new(),
            l1_block_number,
        }
    }

    /// Returns true if the commit is the genesis batch.
    pub const fn is_genesis(&self) -> bool {
        self.batch_index == 0
    }

    /// Returns the total count of L1 messages popped including this batch, or [`None`] if it
    /// overflows.
    pub fn total_l1_message_popped(&self) -> Option<u64> {
        self.parent_total_l1_message_popped
            .checked_add(self.chunks.iter().map(|c| c.num_l1_messages()).sum::<u64>())
    }
}

/// The data of a reverted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertBatchDa {
    /// The index of the batch.
    pub batch_index: u64,
    /// The L1 block number of the revert log.
    pub l1_block_number: u64,
}

/// The data of a finalized batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizeBatchDa {
    /// The index of the batch.
    pub batch_index: u64,
    /// The L1 block number of the finalize log.
    pub l1_block_number: u64,
}
