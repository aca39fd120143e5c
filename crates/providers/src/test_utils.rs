//! In-memory providers with failure injection.

use crate::{
    l1::chain::log_transaction_hash, BlobProvider, L1ChainReader, L1MessageProvider,
    L1ProviderError,
};
use std::{collections::HashMap, sync::Arc};

use alloy_eips::eip4844::Blob;
use alloy_primitives::{Bytes, B256};
use alloy_rpc_types_eth::{BlockNumberOrTag, Log};
use parking_lot::Mutex;
use scroll_alloy_consensus::TxL1Message;

/// The error returned by the providers on an injected failure.
pub const INJECTED_FAILURE: L1ProviderError = L1ProviderError::Other("injected failure");

/// Returns an RPC log wrapping the provided log, emitted at the block by the transaction.
pub fn rpc_log(inner: alloy_primitives::Log, block_number: u64, transaction_hash: B256) -> Log {
    Log {
        inner,
        block_number: Some(block_number),
        transaction_hash: Some(transaction_hash),
        ..Default::default()
    }
}

/// Pops an injected failure from the counter.
fn check_failure(failures: &mut usize) -> Result<(), L1ProviderError> {
    if *failures > 0 {
        *failures -= 1;
        return Err(INJECTED_FAILURE)
    }
    Ok(())
}

/// The calls of the [`MockL1ChainReader`] which can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainReaderCall {
    /// [`L1ChainReader::finalized_block_number`].
    FinalizedBlockNumber,
    /// [`L1ChainReader::rollup_logs`].
    RollupLogs,
    /// [`L1ChainReader::transaction_input`].
    TransactionInput,
    /// [`L1ChainReader::transaction_blob_versioned_hash`].
    TransactionBlobVersionedHash,
    /// [`L1ChainReader::block_timestamp`].
    BlockTimestamp,
}

/// A transaction known to the [`MockL1ChainReader`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockTransaction {
    /// The transaction input.
    pub input: Bytes,
    /// The first blob versioned hash of the transaction.
    pub blob_versioned_hash: Option<B256>,
}

#[derive(Debug, Default)]
struct ChainState {
    finalized: u64,
    logs: Vec<Log>,
    transactions: HashMap<B256, MockTransaction>,
    timestamps: HashMap<u64, u64>,
    failures: HashMap<ChainReaderCall, usize>,
    log_requests: Vec<(u64, u64)>,
    transaction_requests: usize,
}

impl ChainState {
    fn check_failure(&mut self, call: ChainReaderCall) -> Result<(), L1ProviderError> {
        check_failure(self.failures.entry(call).or_default())
    }

    fn transaction(&mut self, log: &Log) -> Result<MockTransaction, L1ProviderError> {
        self.transaction_requests += 1;
        let hash = log_transaction_hash(log)?;
        self.transactions.get(&hash).cloned().ok_or(L1ProviderError::MissingTransaction(hash))
    }
}

/// An in-memory [`L1ChainReader`].
#[derive(Debug, Default)]
pub struct MockL1ChainReader {
    state: Mutex<ChainState>,
}

impl MockL1ChainReader {
    /// Sets the finalized block number.
    pub fn set_finalized(&self, number: u64) {
        self.state.lock().finalized = number;
    }

    /// Appends the log to the chain. Logs must be pushed in chain order.
    pub fn push_log(&self, log: Log) {
        self.state.lock().logs.push(log);
    }

    /// Inserts the transaction at the provided hash.
    pub fn insert_transaction(&self, hash: B256, transaction: MockTransaction) {
        self.state.lock().transactions.insert(hash, transaction);
    }

    /// Inserts the timestamp of the block.
    pub fn insert_block_timestamp(&self, number: u64, timestamp: u64) {
        self.state.lock().timestamps.insert(number, timestamp);
    }

    /// The next `count` calls to `call` fail.
    pub fn fail_next(&self, call: ChainReaderCall, count: usize) {
        self.state.lock().failures.insert(call, count);
    }

    /// Returns the block ranges requested through [`L1ChainReader::rollup_logs`].
    pub fn log_requests(&self) -> Vec<(u64, u64)> {
        self.state.lock().log_requests.clone()
    }

    /// Returns the count of transaction lookups.
    pub fn transaction_requests(&self) -> usize {
        self.state.lock().transaction_requests
    }
}

#[async_trait::async_trait]
impl L1ChainReader for MockL1ChainReader {
    async fn finalized_block_number(&self) -> Result<u64, L1ProviderError> {
        let mut state = self.state.lock();
        state.check_failure(ChainReaderCall::FinalizedBlockNumber)?;
        Ok(state.finalized)
    }

    async fn rollup_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError> {
        let mut state = self.state.lock();
        state.check_failure(ChainReaderCall::RollupLogs)?;
        state.log_requests.push((from, to));
        Ok(state
            .logs
            .iter()
            .filter(|log| log.block_number.is_some_and(|n| (from..=to).contains(&n)))
            .cloned()
            .collect())
    }

    async fn transaction_input(&self, log: &Log) -> Result<Bytes, L1ProviderError> {
        let mut state = self.state.lock();
        state.check_failure(ChainReaderCall::TransactionInput)?;
        Ok(state.transaction(log)?.input)
    }

    async fn transaction_blob_versioned_hash(&self, log: &Log) -> Result<B256, L1ProviderError> {
        let mut state = self.state.lock();
        state.check_failure(ChainReaderCall::TransactionBlobVersionedHash)?;
        let hash = log_transaction_hash(log)?;
        state
            .transaction(log)?
            .blob_versioned_hash
            .ok_or(L1ProviderError::MissingBlobVersionedHash(hash))
    }

    async fn block_timestamp(&self, number: u64) -> Result<u64, L1ProviderError> {
        let mut state = self.state.lock();
        state.check_failure(ChainReaderCall::BlockTimestamp)?;
        state
            .timestamps
            .get(&number)
            .copied()
            .ok_or(L1ProviderError::MissingBlock(BlockNumberOrTag::Number(number)))
    }
}

#[derive(Debug, Default)]
struct MessageState {
    messages: HashMap<u64, TxL1Message>,
    failures: usize,
    requests: Vec<u64>,
}

/// An in-memory [`L1MessageProvider`].
#[derive(Debug, Default)]
pub struct MockL1MessageProvider {
    state: Mutex<MessageState>,
}

impl MockL1MessageProvider {
    /// Inserts the message at its queue index.
    pub fn insert(&self, message: TxL1Message) {
        self.state.lock().messages.insert(message.queue_index, message);
    }

    /// The next `count` lookups fail.
    pub fn fail_next(&self, count: usize) {
        self.state.lock().failures = count;
    }

    /// Returns the queue indexes requested, in order.
    pub fn requests(&self) -> Vec<u64> {
        self.state.lock().requests.clone()
    }
}

#[async_trait::async_trait]
impl L1MessageProvider for MockL1MessageProvider {
    async fn l1_message(&self, queue_index: u64) -> Result<Option<TxL1Message>, L1ProviderError> {
        let mut state = self.state.lock();
        check_failure(&mut state.failures)?;
        state.requests.push(queue_index);
        Ok(state.messages.get(&queue_index).cloned())
    }
}

#[derive(Debug, Default)]
struct BlobState {
    blobs: HashMap<B256, Arc<Blob>>,
    failures: usize,
    requests: Vec<(u64, B256)>,
}

/// An in-memory [`BlobProvider`].
#[derive(Debug, Default)]
pub struct MockBlobProvider {
    state: Mutex<BlobState>,
}

impl MockBlobProvider {
    /// Inserts the blob at the provided versioned hash.
    pub fn insert(&self, hash: B256, blob: Blob) {
        self.state.lock().blobs.insert(hash, Arc::new(blob));
    }

    /// The next `count` lookups fail.
    pub fn fail_next(&self, count: usize) {
        self.state.lock().failures = count;
    }

    /// Returns the block timestamps and versioned hashes requested, in order.
    pub fn requests(&self) -> Vec<(u64, B256)> {
        self.state.lock().requests.clone()
    }
}

#[async_trait::async_trait]
impl BlobProvider for MockBlobProvider {
    async fn blob(
        &self,
        block_timestamp: u64,
        hash: B256,
    ) -> Result<Option<Arc<Blob>>, L1ProviderError> {
        let mut state = self.state.lock();
        check_failure(&mut state.failures)?;
        state.requests.push((block_timestamp, hash));
        Ok(state.blobs.get(&hash).cloned())
    }
}
