//! Test utils for the data availability syncer.

use crate::blob::compute_blob_versioned_hash;
use std::sync::Arc;

use alloy_eips::eip4844::Blob;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::{SolCall, SolEvent};
use rollup_node_providers::{
    test_utils::{
        rpc_log, MockBlobProvider, MockL1ChainReader, MockL1MessageProvider, MockTransaction,
    },
    FullL1Provider,
};
use scroll_alloy_consensus::TxL1Message;
use scroll_codec::test_utils::encode_batch_header;
use scroll_l1::{
    abi::calls::{commitBatchCall, commitBatchWithBlobProofCall},
    CommitBatch, FinalizeBatch, RevertBatch,
};

/// The provider built by the [`MockL1`].
pub type MockL1Provider =
    FullL1Provider<Arc<MockL1ChainReader>, Arc<MockL1MessageProvider>, Arc<MockBlobProvider>>;

/// Returns the calldata of a `commitBatch` call, or of a `commitBatchWithBlobProof` call if
/// `with_proof` is set.
pub fn commit_batch_calldata(
    version: u8,
    parent_total_l1_message_popped: u64,
    chunks: Vec<Bytes>,
    skipped_l1_message_bitmap: Bytes,
    with_proof: bool,
) -> Bytes {
    let parent_batch_header = encode_batch_header(version, 0, parent_total_l1_message_popped);
    if with_proof {
        commitBatchWithBlobProofCall {
            version,
            parent_batch_header,
            chunks,
            skipped_l1_message_bitmap,
            blob_data_proof: Bytes::from(vec![0u8; 160]),
        }
        .abi_encode()
        .into()
    } else {
        commitBatchCall { version, parent_batch_header, chunks, skipped_l1_message_bitmap }
            .abi_encode()
            .into()
    }
}

/// Returns a skipped L1 messages bitmap covering `total` messages, with the provided offsets set.
pub fn skipped_bitmap(total: u64, skipped: &[u64]) -> Bytes {
    let mut bitmap = vec![0u8; total.div_ceil(256) as usize * 32];
    for offset in skipped {
        let word = (offset / 256) as usize;
        let bit = offset % 256;
        bitmap[word * 32 + 31 - (bit / 8) as usize] |= 1 << (bit % 8);
    }
    bitmap.into()
}

/// Returns a L1 message at the provided queue index.
pub fn l1_message(queue_index: u64) -> TxL1Message {
    TxL1Message {
        queue_index,
        gas_limit: 21_000,
        to: Address::with_last_byte(1),
        value: U256::ZERO,
        sender: Address::with_last_byte(2),
        input: Bytes::new(),
    }
}

/// Returns the transaction hash of the n-th test transaction.
pub fn tx_hash(n: u64) -> B256 {
    B256::from(U256::from(n + 1))
}

/// An in-memory L1 for the data availability syncer.
#[derive(Debug, Clone, Default)]
pub struct MockL1 {
    /// The chain reader.
    pub chain: Arc<MockL1ChainReader>,
    /// The L1 message store.
    pub messages: Arc<MockL1MessageProvider>,
    /// The blob provider.
    pub blobs: Arc<MockBlobProvider>,
}

impl MockL1 {
    /// Returns a provider reading from the mocked L1.
    pub fn provider(&self) -> MockL1Provider {
        FullL1Provider::new(self.chain.clone(), self.messages.clone(), self.blobs.clone())
    }

    /// Inserts the L1 messages in the queue index range.
    pub fn insert_l1_messages(&self, range: std::ops::Range<u64>) {
        for index in range {
            self.messages.insert(l1_message(index));
        }
    }

    /// Emits a `CommitBatch` log at the block from the transaction `tx`, registering the
    /// transaction and its blob. Returns the emitted log.
    pub fn commit_batch(
        &self,
        block_number: u64,
        tx: u64,
        batch_index: u64,
        input: Bytes,
        blob: Option<Blob>,
    ) -> Log {
        let blob_versioned_hash = blob.map(|blob| {
            let hash = compute_blob_versioned_hash(&blob).expect("valid blob");
            self.blobs.insert(hash, blob);
            hash
        });
        self.chain.insert_transaction(tx_hash(tx), MockTransaction { input, blob_versioned_hash });

        let event = CommitBatch {
            batch_index: U256::from(batch_index),
            batch_hash: B256::with_last_byte(batch_index as u8),
        };
        self.push_log(event.encode_log_data(), block_number, tx)
    }

    /// Emits a `RevertBatch` log at the block. Returns the emitted log.
    pub fn revert_batch(&self, block_number: u64, tx: u64, batch_index: u64) -> Log {
        let event = RevertBatch {
            batch_index: U256::from(batch_index),
            batch_hash: B256::with_last_byte(batch_index as u8),
        };
        self.push_log(event.encode_log_data(), block_number, tx)
    }

    /// Emits a `FinalizeBatch` log at the block. Returns the emitted log.
    pub fn finalize_batch(&self, block_number: u64, tx: u64, batch_index: u64) -> Log {
        let event = FinalizeBatch {
            batch_index: U256::from(batch_index),
            batch_hash: B256::with_last_byte(batch_index as u8),
            state_root: B256::ZERO,
            withdraw_root: B256::ZERO,
        };
        self.push_log(event.encode_log_data(), block_number, tx)
    }

    fn push_log(&self, data: alloy_primitives::LogData, block_number: u64, tx: u64) -> Log {
        let log = rpc_log(
            alloy_primitives::Log { address: Address::ZERO, data },
            block_number,
            tx_hash(tx),
        );
        self.chain.push_log(log.clone());
        log
    }
}
