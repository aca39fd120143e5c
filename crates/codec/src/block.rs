//! L2 block, block context and chunk implementations.

use alloy_primitives::{Bytes, U256};

/// A chunk of L2 blocks, as committed to L1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// The blocks of the chunk.
    pub blocks: Vec<L2Block>,
}

impl Chunk {
    /// Returns a new instance of a [`Chunk`].
    pub const fn new(blocks: Vec<L2Block>) -> Self {
        Self { blocks }
    }

    /// Returns the count of L1 messages in the chunk, included or skipped.
    pub fn num_l1_messages(&self) -> u64 {
        self.blocks.iter().map(|b| b.context.num_l1_messages as u64).sum()
    }

    /// Returns the count of L2 transactions expected in the chunk.
    pub fn num_l2_transactions(&self) -> usize {
        self.blocks.iter().map(|b| b.context.num_l2_transactions()).sum()
    }
}

/// A L2 block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct L2Block {
    /// The RLP-encoded L2 transactions of the block.
    pub transactions: Vec<Bytes>,
    /// The context for the block.
    pub context: BlockContext,
}

impl L2Block {
    /// Returns a new instance of a [`L2Block`].
    pub const fn new(transactions: Vec<Bytes>, context: BlockContext) -> Self {
        Self { transactions, context }
    }
}

/// The block's context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext {
    /// The block number.
    pub number: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The block base fee.
    pub base_fee: U256,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The block's transaction count, including L1 messages.
    pub num_transactions: u16,
    /// The block's l1 message count.
    pub num_l1_messages: u16,
}

impl BlockContext {
    /// The length in bytes of an encoded block context.
    pub const BYTES_LENGTH: usize = 60;

    /// Returns the L2 transaction count for the block, excluding L1 messages.
    pub const fn num_l2_transactions(&self) -> usize {
        self.num_transactions.saturating_sub(self.num_l1_messages) as usize
    }
}
